//! Arithmetic modulo a runtime-selected odd prime, implemented using
//! `crypto-bigint`'s [`DynResidue`].
//!
//! Every modulus up to 512 bits shares the [`U512`] representation. An
//! element is only meaningful together with the [`PrimeField`] that
//! produced it.

use crate::{Error, Result};
use alloc::vec::Vec;
use bigint::{
    Encoding, Integer, U512,
    modular::runtime_mod::{DynResidue, DynResidueParams},
};
use core::{fmt, marker::PhantomData};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess, CtOption};

/// Number of limbs of the shared integer representation.
pub const LIMBS: usize = U512::LIMBS;

/// Largest supported encoding of a modulus, in bytes.
const MAX_BYTES: usize = U512::BYTES;

/// Marker for the base field `GF(p)` over which the curve is defined.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Base {}

/// Marker for the scalar field `GF(q)`, where `q` is the group order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Order {}

/// Element of the base field.
pub type FieldElement = Element<Base>;

/// Element of the scalar field.
pub type Scalar = Element<Order>;

/// Field element in Montgomery form.
pub struct Element<K> {
    inner: DynResidue<LIMBS>,
    _field: PhantomData<K>,
}

impl<K> Element<K> {
    const fn new(inner: DynResidue<LIMBS>) -> Self {
        Self {
            inner,
            _field: PhantomData,
        }
    }
}

impl<K> Clone for Element<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Element<K> {}

impl<K> fmt::Debug for Element<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element(0x{:X})", self.inner.retrieve())
    }
}

impl<K> ConditionallySelectable for Element<K> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(DynResidue::conditional_select(&a.inner, &b.inner, choice))
    }
}

impl<K> ConstantTimeEq for Element<K> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.inner.ct_eq(&other.inner)
    }
}

impl<K> PartialEq for Element<K> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<K> Eq for Element<K> {}

/// Prime field with a modulus chosen at runtime.
#[derive(Clone)]
pub struct PrimeField<K> {
    params: DynResidueParams<LIMBS>,
    modulus: U512,
    /// Size of an encoded element in bytes.
    byte_size: usize,
    _field: PhantomData<K>,
}

impl<K> fmt::Debug for PrimeField<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimeField")
            .field("modulus", &format_args!("0x{:X}", self.modulus))
            .field("byte_size", &self.byte_size)
            .finish_non_exhaustive()
    }
}

impl<K> PrimeField<K> {
    /// Set up Montgomery arithmetic for the modulus given as a little-endian
    /// octet string.
    ///
    /// The length must be a positive multiple of eight not exceeding 64 and
    /// the most significant eight bytes must not all be zero. The modulus
    /// must be odd and greater than one. Primality is the caller's
    /// responsibility.
    pub fn new(modulus_le: &[u8]) -> Result<Self> {
        let len = modulus_le.len();
        if len == 0 || len % 8 != 0 || len > MAX_BYTES {
            return Err(Error::InvalidParams);
        }
        if modulus_le[len - 8..].iter().all(|&b| b == 0) {
            return Err(Error::InvalidParams);
        }

        let modulus = uint_from_le_slice(modulus_le);
        if modulus.bits_vartime() < 2 {
            return Err(Error::InvalidParams);
        }
        if !bool::from(modulus.is_odd()) {
            return Err(Error::InvalidParams);
        }

        Ok(Self {
            params: DynResidueParams::new(&modulus),
            modulus,
            byte_size: len,
            _field: PhantomData,
        })
    }

    /// Size in bytes of an encoded element.
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// The modulus as a little-endian octet string.
    pub fn modulus_bytes(&self) -> Vec<u8> {
        self.modulus.to_le_bytes()[..self.byte_size].to_vec()
    }

    /// The additive identity.
    pub fn zero(&self) -> Element<K> {
        Element::new(DynResidue::zero(self.params))
    }

    /// The multiplicative identity.
    pub fn one(&self) -> Element<K> {
        Element::new(DynResidue::one(self.params))
    }

    /// Returns `value mod m` for a small integer.
    pub fn from_u64(&self, value: u64) -> Element<K> {
        Element::new(DynResidue::new(&U512::from_u64(value), self.params))
    }

    /// Decode a canonical little-endian element.
    ///
    /// Returns `None` if the length is wrong or the value is not less than
    /// the modulus.
    pub fn from_le_bytes(&self, bytes: &[u8]) -> CtOption<Element<K>> {
        if bytes.len() != self.byte_size {
            return CtOption::new(self.zero(), Choice::from(0));
        }
        let uint = uint_from_le_slice(bytes);
        let is_some = uint.ct_lt(&self.modulus);
        CtOption::new(Element::new(DynResidue::new(&uint, self.params)), is_some)
    }

    /// Interpret a little-endian octet string of at most `byte_size()` bytes
    /// as an integer and reduce it modulo `m`.
    pub fn reduce_le_bytes(&self, bytes: &[u8]) -> Result<Element<K>> {
        if bytes.len() > self.byte_size {
            return Err(Error::InvalidParams);
        }
        Ok(Element::new(DynResidue::new(
            &uint_from_le_slice(bytes),
            self.params,
        )))
    }

    /// Encode as a canonical little-endian octet string of `byte_size()` bytes.
    pub fn to_le_bytes(&self, a: &Element<K>) -> Vec<u8> {
        self.to_canonical(a)[..self.byte_size].to_vec()
    }

    /// Canonical (non-Montgomery) representation as 64 little-endian bytes.
    pub(crate) fn to_canonical(&self, a: &Element<K>) -> [u8; MAX_BYTES] {
        a.inner.retrieve().to_le_bytes()
    }

    /// Determine if the element is zero.
    pub fn is_zero(&self, a: &Element<K>) -> Choice {
        a.ct_eq(&self.zero())
    }

    /// Returns `a + b mod m`.
    pub fn add(&self, a: &Element<K>, b: &Element<K>) -> Element<K> {
        Element::new(a.inner + b.inner)
    }

    /// Returns `2a mod m`.
    pub fn double(&self, a: &Element<K>) -> Element<K> {
        self.add(a, a)
    }

    /// Returns `a - b mod m`.
    pub fn sub(&self, a: &Element<K>, b: &Element<K>) -> Element<K> {
        Element::new(a.inner - b.inner)
    }

    /// Returns `-a mod m`.
    pub fn neg(&self, a: &Element<K>) -> Element<K> {
        Element::new(-a.inner)
    }

    /// Returns `a * b mod m`.
    pub fn mul(&self, a: &Element<K>, b: &Element<K>) -> Element<K> {
        Element::new(a.inner * b.inner)
    }

    /// Returns `a * a mod m`.
    pub fn square(&self, a: &Element<K>) -> Element<K> {
        Element::new(a.inner.square())
    }

    /// Returns the multiplicative inverse, if the element is non-zero.
    pub fn invert(&self, a: &Element<K>) -> CtOption<Element<K>> {
        // Fermat: a^(m-2) * a = a^(m-1) = 1 for prime m.
        let exp = self.modulus.wrapping_sub(&U512::from_u64(2));
        CtOption::new(Element::new(a.inner.pow(&exp)), !self.is_zero(a))
    }

    /// Miller-Rabin test of the modulus against the first twelve prime bases.
    ///
    /// **This operation is variable time.** It is only applied to public
    /// domain parameters.
    pub(crate) fn is_prime_vartime(&self) -> bool {
        const BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

        let m_minus_one = self.modulus.wrapping_sub(&U512::ONE);
        let s = m_minus_one.trailing_zeros_vartime();
        let d = m_minus_one >> s;
        let one = self.one();
        let minus_one = self.neg(&one);

        'bases: for base in BASES {
            let mut x = Element::<K>::new(self.from_u64(base).inner.pow(&d));
            if x == one || x == minus_one {
                continue;
            }
            for _ in 1..s {
                x = self.square(&x);
                if x == minus_one {
                    continue 'bases;
                }
            }
            return false;
        }
        true
    }
}

/// Zero-extend a little-endian octet string of at most 64 bytes.
fn uint_from_le_slice(bytes: &[u8]) -> U512 {
    let mut buf = [0u8; MAX_BYTES];
    buf[..bytes.len()].copy_from_slice(bytes);
    U512::from_le_slice(&buf)
}

#[cfg(test)]
mod tests {
    use super::{Base, PrimeField};
    use hex_literal::hex;
    use proptest::prelude::*;
    use subtle::ConstantTimeEq;

    /// bign-curve256v1 field modulus `2^256 - 189`.
    const P256: [u8; 32] =
        hex!("43FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF");

    /// brainpoolP512r1 group order, little-endian.
    fn p512() -> [u8; 64] {
        let mut bytes = hex!(
            "aadd9db8dbe9c48b3fd4e6ae33c9fc07cb308db3b3c9d20ed6639cca70330870"
            "553e5c414ca92619418661197fac10471db1d381085ddaddb58796829ca90069"
        );
        bytes.reverse();
        bytes
    }

    fn field256() -> PrimeField<Base> {
        PrimeField::new(&P256).unwrap()
    }

    #[test]
    fn rejects_unusable_moduli() {
        assert!(PrimeField::<Base>::new(&[]).is_err());
        assert!(PrimeField::<Base>::new(&[0x43; 7]).is_err());
        assert!(PrimeField::<Base>::new(&[0x42; 32]).is_err());
        let mut top_zero = P256;
        top_zero[31] = 0;
        top_zero[30] = 0;
        top_zero[29] = 0;
        top_zero[28] = 0;
        top_zero[27] = 0;
        top_zero[26] = 0;
        top_zero[25] = 0;
        top_zero[24] = 0;
        assert!(PrimeField::<Base>::new(&top_zero).is_err());
    }

    #[test]
    fn one_and_zero() {
        let f = field256();
        let one = f.one();
        assert_eq!(f.mul(&one, &one), one);
        assert!(bool::from(f.is_zero(&f.zero())));
        assert_eq!(f.add(&f.neg(&one), &one), f.zero());
        let mut expected = [0u8; 32];
        expected[0] = 1;
        assert_eq!(f.to_le_bytes(&one), expected);
    }

    #[test]
    fn non_canonical_encoding_rejected() {
        let f = field256();
        assert!(bool::from(f.from_le_bytes(&P256).is_none()));
        let mut below = P256;
        below[0] -= 1;
        assert!(bool::from(f.from_le_bytes(&below).is_some()));
        assert!(bool::from(f.from_le_bytes(&P256[..31]).is_none()));
    }

    #[test]
    fn reduce_wraps_modulus() {
        let f = field256();
        let all_ones = [0xFF; 32];
        // 2^256 - 1 = p + 188
        assert_eq!(f.reduce_le_bytes(&all_ones).unwrap(), f.from_u64(188));
    }

    #[test]
    fn small_products() {
        let f = field256();
        let six = f.mul(&f.from_u64(2), &f.from_u64(3));
        assert_eq!(six, f.from_u64(6));
        assert_eq!(f.sub(&f.from_u64(2), &f.from_u64(5)), f.neg(&f.from_u64(3)));
    }

    #[test]
    fn primality() {
        assert!(field256().is_prime_vartime());
        assert!(PrimeField::<Base>::new(&p512()).unwrap().is_prime_vartime());
        // 2^256 - 1 is divisible by 3
        assert!(!PrimeField::<Base>::new(&[0xFF; 32]).unwrap().is_prime_vartime());
    }

    prop_compose! {
        fn element()(bytes in any::<[u8; 32]>()) -> [u8; 32] {
            bytes
        }
    }

    proptest! {
        #[test]
        fn distributive(a in element(), b in element(), c in element()) {
            let f = field256();
            let a = f.reduce_le_bytes(&a).unwrap();
            let b = f.reduce_le_bytes(&b).unwrap();
            let c = f.reduce_le_bytes(&c).unwrap();
            let lhs = f.mul(&a, &f.add(&b, &c));
            let rhs = f.add(&f.mul(&a, &b), &f.mul(&a, &c));
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn invert_256(a in element()) {
            let f = field256();
            let a = f.reduce_le_bytes(&a).unwrap();
            prop_assume!(!bool::from(f.is_zero(&a)));
            let inv = f.invert(&a).unwrap();
            prop_assert!(bool::from(f.mul(&a, &inv).ct_eq(&f.one())));
        }

        #[test]
        fn invert_512(bytes in any::<[u8; 32]>()) {
            let f = PrimeField::<Base>::new(&p512()).unwrap();
            let a = f.reduce_le_bytes(&bytes).unwrap();
            prop_assume!(!bool::from(f.is_zero(&a)));
            let inv = f.invert(&a).unwrap();
            prop_assert_eq!(f.mul(&a, &inv), f.one());
            prop_assert_eq!(f.to_le_bytes(&f.mul(&inv, &a)).len(), 64);
        }

        #[test]
        fn canonical_roundtrip(a in element()) {
            let f = field256();
            let x = f.reduce_le_bytes(&a).unwrap();
            let bytes = f.to_le_bytes(&x);
            prop_assert_eq!(f.from_le_bytes(&bytes).unwrap(), x);
        }
    }
}
