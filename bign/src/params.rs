//! bign domain parameters.
//!
//! A parameter set fixes the security level `l`, the curve
//! `y² = x³ + ax + b` over `GF(p)`, its base point `G` and the prime group
//! order `q`. All integers are little-endian octet strings of `l/4` bytes,
//! as in STB 34.101.45.

use crate::{
    Error, Result,
    arithmetic::CurveGroup,
    oid::{self, ObjectIdentifier},
};
use alloc::vec::Vec;
use hex_literal::hex;
use subtle::ConstantTimeEq;

/// Security level `l` of a parameter set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Level {
    /// `l = 128`, 256-bit curves.
    L128,
    /// `l = 192`, 384-bit curves.
    L192,
    /// `l = 256`, 512-bit curves.
    L256,
}

impl Level {
    /// Level for the given number of bits.
    pub fn from_bits(bits: usize) -> Result<Self> {
        match bits {
            128 => Ok(Level::L128),
            192 => Ok(Level::L192),
            256 => Ok(Level::L256),
            _ => Err(Error::InvalidParams),
        }
    }

    /// `l`
    pub const fn bits(self) -> usize {
        match self {
            Level::L128 => 128,
            Level::L192 => 192,
            Level::L256 => 256,
        }
    }

    /// Size of `p`, `q`, field elements, scalars and secret keys: `l/4` bytes.
    pub const fn field_size(self) -> usize {
        self.bits() / 4
    }

    /// Size of a public key `⟨Qx⟩ ‖ ⟨Qy⟩`: `l/2` bytes.
    pub const fn public_key_size(self) -> usize {
        self.bits() / 2
    }

    /// Size of a message digest: `l/4` bytes.
    pub const fn digest_size(self) -> usize {
        self.bits() / 4
    }

    /// Size of the first signature component `S0`: `l/8` bytes.
    pub const fn s0_size(self) -> usize {
        self.bits() / 8
    }

    /// Size of a signature `S0 ‖ S1`: `3l/8` bytes.
    pub const fn signature_size(self) -> usize {
        3 * self.bits() / 8
    }
}

/// Raw domain parameters for [`ParamSet::new`].
///
/// Every integer is a little-endian octet string of `level.field_size()`
/// bytes.
#[derive(Clone, Copy, Debug)]
pub struct CurveParams<'a> {
    /// Security level.
    pub level: Level,
    /// Field modulus.
    pub p: &'a [u8],
    /// 𝒂-coefficient.
    pub a: &'a [u8],
    /// 𝒃-coefficient.
    pub b: &'a [u8],
    /// Group order.
    pub q: &'a [u8],
    /// x-coordinate of the base point.
    pub x_g: &'a [u8],
    /// y-coordinate of the base point.
    pub y_g: &'a [u8],
}

/// bign-curve256v1 (STB 34.101.45, table B.1).
const CURVE256V1: CurveParams<'static> = CurveParams {
    level: Level::L128,
    p: &hex!("43FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"),
    a: &hex!("40FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"),
    b: &hex!("F1039CD66B7D2EB253928B976950F54CBEFBD8E4AB3AC1D2EDA8F315156CCE77"),
    q: &hex!("07663D2699BF5A7EFC4DFB0DD68E5CD9FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"),
    x_g: &[0; 32],
    y_g: &hex!("936A510418CF291E52F608C4663991785D83D651A3C9E45C9FD616FB3CFCF76B"),
};

/// bign-curve384v1 (STB 34.101.45, table B.2).
const CURVE384V1: CurveParams<'static> = CurveParams {
    level: Level::L192,
    p: &hex!(
        "C3FEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    ),
    a: &hex!(
        "C0FEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    ),
    b: &hex!(
        "64BF736823FCA7BC7CBDCEF3F0E2BD143A2E71E9F96A21A696B1FB0F"
        "BB482771D2345D65AB5A073320EF9C95E1DF753C"
    ),
    q: &hex!(
        "B7A70CF33FDCB73D0AFFA4A6E7DA4680BB7BAF7303C4CC6CFEFFFFFF"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    ),
    x_g: &[0; 48],
    y_g: &hex!(
        "51C433F731CB5EEAF9422A6B273E408455D3B1669EE74905A0FF86DC"
        "119A723A89BF2D437E1130639E9E2EA82482435D"
    ),
};

/// bign-curve512v1 (STB 34.101.45, table B.3).
const CURVE512V1: CurveParams<'static> = CurveParams {
    level: Level::L256,
    p: &hex!(
        "C7FDFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    ),
    a: &hex!(
        "C4FDFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    ),
    b: &hex!(
        "909C13D6986934097AA2493A272286EA43A2AC878C003329955E24C4B5DC1127"
        "88B0ADDAE313CE1751255DDDEEA9C65B8958FD606A5D8CD8438C3B934459B46C"
    ),
    q: &hex!(
        "F18E060D49ADFFDC32DF5695E5CA1B36F413212EB0EB6BF24E0098012C09C0B2"
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
    ),
    x_g: &[0; 64],
    y_g: &hex!(
        "BDEDEFCE6FAE92B7040D4CC9B983AA676122E8EE957377FFD26FFA0EE2DD7369"
        "DACACC001BF8EDD2E2BC61B3B341ABB0AB8FD1A0F7E682B1817603E47AFF26A8"
    ),
};

/// Standard parameter sets by OID.
const STANDARD: &[(&str, CurveParams<'static>)] = &[
    (oid::BIGN_CURVE256V1, CURVE256V1),
    (oid::BIGN_CURVE384V1, CURVE384V1),
    (oid::BIGN_CURVE512V1, CURVE512V1),
];

/// Bound on the embedding degree checked against MOV reduction.
const MOV_THRESHOLD: usize = 50;

/// Validated, immutable bign domain parameters.
#[derive(Clone, Debug)]
pub struct ParamSet {
    oid: ObjectIdentifier,
    level: Level,
    p: Vec<u8>,
    a: Vec<u8>,
    b: Vec<u8>,
    q: Vec<u8>,
    x_g: Vec<u8>,
    y_g: Vec<u8>,
    curve: CurveGroup,
}

impl ParamSet {
    /// Load a standard parameter set by its dotted decimal OID.
    ///
    /// Fails with [`Error::UnknownParameters`] for anything outside the
    /// table of [`ParamSet::standard_oids`].
    pub fn load(oid: &str) -> Result<Self> {
        let requested: ObjectIdentifier =
            oid.parse().map_err(|_| Error::UnknownParameters)?;

        for (name, params) in STANDARD {
            let known: ObjectIdentifier = name.parse()?;
            if known == requested {
                return Self::from_params(known, params);
            }
        }
        Err(Error::UnknownParameters)
    }

    /// OIDs of the standard parameter sets [`ParamSet::load`] knows.
    pub fn standard_oids() -> impl Iterator<Item = &'static str> {
        STANDARD.iter().map(|(name, _)| *name)
    }

    /// Validate custom domain parameters and name them `oid`.
    ///
    /// Checks that:
    /// - all lengths match the level,
    /// - `p` and `q` are odd primes of full bit length and `p ≠ q`,
    /// - `p ≡ 3 (mod 4)`,
    /// - `0 < a, b < p` and `4a³ + 27b² ≠ 0`,
    /// - `G` lies on the curve and `qG = O`,
    /// - `p^i ≢ 1 (mod q)` for small `i`.
    ///
    /// Any failure yields [`Error::InvalidParams`].
    pub fn new(oid: ObjectIdentifier, params: CurveParams<'_>) -> Result<Self> {
        let set = Self::from_params(oid, &params)?;
        set.validate()?;
        Ok(set)
    }

    fn from_params(oid: ObjectIdentifier, params: &CurveParams<'_>) -> Result<Self> {
        let size = params.level.field_size();
        let fields = [params.p, params.a, params.b, params.q, params.x_g, params.y_g];
        if fields.iter().any(|f| f.len() != size) {
            return Err(Error::InvalidParams);
        }

        let curve = CurveGroup::new(
            params.p, params.a, params.b, params.q, params.x_g, params.y_g,
        )?;

        Ok(Self {
            oid,
            level: params.level,
            p: params.p.to_vec(),
            a: params.a.to_vec(),
            b: params.b.to_vec(),
            q: params.q.to_vec(),
            x_g: params.x_g.to_vec(),
            y_g: params.y_g.to_vec(),
            curve,
        })
    }

    fn validate(&self) -> Result<()> {
        let top = self.level.field_size() - 1;
        let full_length = |n: &[u8]| n[0] & 1 == 1 && n[top] & 0x80 != 0;
        if !full_length(&self.p) || !full_length(&self.q) || self.p[0] & 3 != 3 || self.p == self.q {
            return Err(Error::InvalidParams);
        }

        let curve = &self.curve;
        if !curve.field().is_prime_vartime() || !curve.scalar_field().is_prime_vartime() {
            return Err(Error::InvalidParams);
        }

        let f = curve.field();
        let (a, b) = (curve.equation_a(), curve.equation_b());
        if bool::from(f.is_zero(a) | f.is_zero(b)) {
            return Err(Error::InvalidParams);
        }

        let a3 = f.mul(&f.square(a), a);
        let b2 = f.square(b);
        let discriminant = f.add(&f.mul(&f.from_u64(4), &a3), &f.mul(&f.from_u64(27), &b2));
        if bool::from(f.is_zero(&discriminant)) {
            return Err(Error::InvalidParams);
        }

        let g = curve.generator();
        if !bool::from(curve.is_on_curve(&g)) {
            return Err(Error::InvalidParams);
        }

        // (q - 1)G = -G  <=>  qG = O
        let s = curve.scalar_field();
        let q_minus_one = s.neg(&s.one());
        let p = curve.to_affine(&curve.mul(&curve.to_projective(&g), &q_minus_one));
        if !bool::from(p.ct_eq(&curve.neg_affine(&g))) {
            return Err(Error::InvalidParams);
        }

        let p_mod_q = s.reduce_le_bytes(&self.p)?;
        let mut power = s.one();
        for _ in 0..MOV_THRESHOLD {
            power = s.mul(&power, &p_mod_q);
            if power == s.one() {
                return Err(Error::InvalidParams);
            }
        }

        Ok(())
    }

    /// Security level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Identifier of the parameter set.
    pub fn oid(&self) -> &ObjectIdentifier {
        &self.oid
    }

    /// Field modulus `p`.
    pub fn p(&self) -> &[u8] {
        &self.p
    }

    /// 𝒂-coefficient.
    pub fn a(&self) -> &[u8] {
        &self.a
    }

    /// 𝒃-coefficient.
    pub fn b(&self) -> &[u8] {
        &self.b
    }

    /// Group order `q`.
    pub fn q(&self) -> &[u8] {
        &self.q
    }

    /// x-coordinate of the base point.
    pub fn x_g(&self) -> &[u8] {
        &self.x_g
    }

    /// y-coordinate of the base point.
    pub fn y_g(&self) -> &[u8] {
        &self.y_g
    }

    /// Group arithmetic for these parameters.
    pub fn curve(&self) -> &CurveGroup {
        &self.curve
    }

    /// Borrow the parameters in raw form.
    pub fn as_curve_params(&self) -> CurveParams<'_> {
        CurveParams {
            level: self.level,
            p: &self.p,
            a: &self.a,
            b: &self.b,
            q: &self.q,
            x_g: &self.x_g,
            y_g: &self.y_g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn standard_sets_validate() {
        for oid in ParamSet::standard_oids() {
            let params = ParamSet::load(oid).unwrap();
            params.validate().unwrap();
            assert_eq!(params.oid().to_string(), oid);
        }
    }

    #[test]
    fn level_sizes() {
        assert_eq!(Level::L128.field_size(), 32);
        assert_eq!(Level::L128.signature_size(), 48);
        assert_eq!(Level::L192.public_key_size(), 96);
        assert_eq!(Level::L256.s0_size(), 32);
        assert_eq!(Level::from_bits(160), Err(Error::InvalidParams));
    }
}
