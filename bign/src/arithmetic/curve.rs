//! Group law of a short Weierstrass curve `y² = x³ + ax + b` over `GF(p)`
//! with prime order `q`.
//!
//! Points are held in homogeneous projective coordinates and combined with
//! the complete formulas of [Renes-Costello-Batina 2015] for a generic
//! 𝒂-coefficient, so no input (including the identity) needs special
//! casing.
//!
//! [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060

#![allow(clippy::needless_range_loop)]

use super::field::{Base, FieldElement, Order, PrimeField, Scalar};
use crate::{Error, Result};
use alloc::vec::Vec;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

/// Point on the curve in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) infinity: u8,
}

impl AffinePoint {
    /// Is this point the identity?
    pub fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }
}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        let both_identity = self.is_identity() & other.is_identity();
        let same_point = !self.is_identity()
            & !other.is_identity()
            & self.x.ct_eq(&other.x)
            & self.y.ct_eq(&other.y);
        both_identity | same_point
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for AffinePoint {}

/// Point on the curve in homogeneous projective coordinates `(X : Y : Z)`,
/// representing `(X/Z, Y/Z)`.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl ConditionallySelectable for ProjectivePoint {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

/// Prime order elliptic curve group chosen at runtime.
#[derive(Clone, Debug)]
pub struct CurveGroup {
    field: PrimeField<Base>,
    scalars: PrimeField<Order>,
    a: FieldElement,
    b: FieldElement,
    /// `3b`, shared by all three formulas.
    b3: FieldElement,
    generator: AffinePoint,
}

impl CurveGroup {
    /// Build the group from little-endian octet strings.
    ///
    /// Only the encodings are checked here: every coordinate and
    /// coefficient must be a canonical element of `GF(p)`. Mathematical
    /// validation of the domain parameters is done by
    /// [`ParamSet`](crate::ParamSet).
    pub fn new(p: &[u8], a: &[u8], b: &[u8], q: &[u8], gx: &[u8], gy: &[u8]) -> Result<Self> {
        let field = PrimeField::<Base>::new(p)?;
        let scalars = PrimeField::<Order>::new(q)?;
        let decode = |bytes: &[u8]| -> Result<FieldElement> {
            Option::from(field.from_le_bytes(bytes)).ok_or(Error::InvalidParams)
        };

        let a = decode(a)?;
        let b = decode(b)?;
        let b3 = field.add(&field.double(&b), &b);
        let generator = AffinePoint {
            x: decode(gx)?,
            y: decode(gy)?,
            infinity: 0,
        };

        Ok(Self {
            field,
            scalars,
            a,
            b,
            b3,
            generator,
        })
    }

    /// Base field `GF(p)`.
    pub fn field(&self) -> &PrimeField<Base> {
        &self.field
    }

    /// Scalar field `GF(q)`.
    pub fn scalar_field(&self) -> &PrimeField<Order> {
        &self.scalars
    }

    /// The 𝒂-coefficient of the curve equation.
    pub fn equation_a(&self) -> &FieldElement {
        &self.a
    }

    /// The 𝒃-coefficient of the curve equation.
    pub fn equation_b(&self) -> &FieldElement {
        &self.b
    }

    /// Additive identity of the group a.k.a. the point at infinity.
    pub fn identity(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.field.zero(),
            y: self.field.one(),
            z: self.field.zero(),
        }
    }

    /// Identity in affine form.
    pub fn affine_identity(&self) -> AffinePoint {
        AffinePoint {
            x: self.field.zero(),
            y: self.field.zero(),
            infinity: 1,
        }
    }

    /// Base point of the group.
    pub fn generator(&self) -> AffinePoint {
        self.generator
    }

    /// Is the projective point the identity?
    pub fn is_identity(&self, point: &ProjectivePoint) -> Choice {
        self.field.is_zero(&point.z)
    }

    /// Does the affine point satisfy the curve equation?
    ///
    /// The identity is considered to be on the curve.
    pub fn is_on_curve(&self, point: &AffinePoint) -> Choice {
        let f = &self.field;
        let lhs = f.square(&point.y);
        let x3 = f.mul(&f.square(&point.x), &point.x);
        let rhs = f.add(&f.add(&x3, &f.mul(&self.a, &point.x)), &self.b);
        point.is_identity() | lhs.ct_eq(&rhs)
    }

    /// Decode `⟨x⟩ ‖ ⟨y⟩` (little-endian coordinates) into a point on the curve.
    ///
    /// Returns `None` for non-canonical coordinates or points off the curve.
    pub fn point_from_le_bytes(&self, bytes: &[u8]) -> CtOption<AffinePoint> {
        let size = self.field.byte_size();
        if bytes.len() != 2 * size {
            return CtOption::new(self.affine_identity(), Choice::from(0));
        }
        let (x_bytes, y_bytes) = bytes.split_at(size);
        let x = self.field.from_le_bytes(x_bytes);
        let y = self.field.from_le_bytes(y_bytes);
        let point = AffinePoint {
            x: x.unwrap_or(self.field.zero()),
            y: y.unwrap_or(self.field.zero()),
            infinity: 0,
        };
        CtOption::new(point, x.is_some() & y.is_some() & self.is_on_curve(&point))
    }

    /// Encode as `⟨x⟩ ‖ ⟨y⟩` with little-endian coordinates.
    pub fn point_to_le_bytes(&self, point: &AffinePoint) -> Vec<u8> {
        let mut out = self.field.to_le_bytes(&point.x);
        out.extend_from_slice(&self.field.to_le_bytes(&point.y));
        out
    }

    /// Convert an affine point to projective coordinates.
    pub fn to_projective(&self, point: &AffinePoint) -> ProjectivePoint {
        let projective = ProjectivePoint {
            x: point.x,
            y: point.y,
            z: self.field.one(),
        };
        ProjectivePoint::conditional_select(&projective, &self.identity(), point.is_identity())
    }

    /// Returns the affine representation of this point.
    pub fn to_affine(&self, point: &ProjectivePoint) -> AffinePoint {
        let f = &self.field;
        let zinv = f.invert(&point.z);
        let affine = AffinePoint {
            x: f.mul(&point.x, &zinv.unwrap_or(f.zero())),
            y: f.mul(&point.y, &zinv.unwrap_or(f.zero())),
            infinity: 0,
        };
        AffinePoint::conditional_select(&self.affine_identity(), &affine, zinv.is_some())
    }

    /// Returns `-point`.
    pub fn neg(&self, point: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint {
            x: point.x,
            y: self.field.neg(&point.y),
            z: point.z,
        }
    }

    /// Returns `-point`.
    pub fn neg_affine(&self, point: &AffinePoint) -> AffinePoint {
        AffinePoint {
            x: point.x,
            y: self.field.neg(&point.y),
            infinity: point.infinity,
        }
    }

    /// Implements complete addition for any curve
    ///
    /// Implements the complete addition formula from [Renes-Costello-Batina 2015]
    /// (Algorithm 1). The comments after each line indicate which algorithm steps
    /// are being performed.
    ///
    /// [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060
    pub fn add(&self, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> ProjectivePoint {
        let f = &self.field;
        let (a, b3) = (&self.a, &self.b3);

        let t0 = f.mul(&lhs.x, &rhs.x); // 1
        let t1 = f.mul(&lhs.y, &rhs.y); // 2
        let t2 = f.mul(&lhs.z, &rhs.z); // 3
        let t3 = f.add(&lhs.x, &lhs.y); // 4
        let t4 = f.add(&rhs.x, &rhs.y); // 5
        let t3 = f.mul(&t3, &t4); // 6
        let t4 = f.add(&t0, &t1); // 7
        let t3 = f.sub(&t3, &t4); // 8
        let t4 = f.add(&lhs.x, &lhs.z); // 9
        let t5 = f.add(&rhs.x, &rhs.z); // 10
        let t4 = f.mul(&t4, &t5); // 11
        let t5 = f.add(&t0, &t2); // 12
        let t4 = f.sub(&t4, &t5); // 13
        let t5 = f.add(&lhs.y, &lhs.z); // 14
        let x3 = f.add(&rhs.y, &rhs.z); // 15
        let t5 = f.mul(&t5, &x3); // 16
        let x3 = f.add(&t1, &t2); // 17
        let t5 = f.sub(&t5, &x3); // 18
        let z3 = f.mul(a, &t4); // 19
        let x3 = f.mul(b3, &t2); // 20
        let z3 = f.add(&x3, &z3); // 21
        let x3 = f.sub(&t1, &z3); // 22
        let z3 = f.add(&t1, &z3); // 23
        let y3 = f.mul(&x3, &z3); // 24
        let t1 = f.add(&t0, &t0); // 25
        let t1 = f.add(&t1, &t0); // 26
        let t2 = f.mul(a, &t2); // 27
        let t4 = f.mul(b3, &t4); // 28
        let t1 = f.add(&t1, &t2); // 29
        let t2 = f.sub(&t0, &t2); // 30
        let t2 = f.mul(a, &t2); // 31
        let t4 = f.add(&t4, &t2); // 32
        let t0 = f.mul(&t1, &t4); // 33
        let y3 = f.add(&y3, &t0); // 34
        let t0 = f.mul(&t5, &t4); // 35
        let x3 = f.mul(&t3, &x3); // 36
        let x3 = f.sub(&x3, &t0); // 37
        let t0 = f.mul(&t3, &t1); // 38
        let z3 = f.mul(&t5, &z3); // 39
        let z3 = f.add(&z3, &t0); // 40

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Implements complete mixed addition for curves with any `a`
    ///
    /// Implements the complete mixed addition formula from [Renes-Costello-Batina 2015]
    /// (Algorithm 2). The comments after each line indicate which algorithm
    /// steps are being performed.
    ///
    /// [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060
    pub fn add_mixed(&self, lhs: &ProjectivePoint, rhs: &AffinePoint) -> ProjectivePoint {
        let f = &self.field;
        let (a, b3) = (&self.a, &self.b3);

        let t0 = f.mul(&lhs.x, &rhs.x); // 1
        let t1 = f.mul(&lhs.y, &rhs.y); // 2
        let t3 = f.add(&rhs.x, &rhs.y); // 3
        let t4 = f.add(&lhs.x, &lhs.y); // 4
        let t3 = f.mul(&t3, &t4); // 5
        let t4 = f.add(&t0, &t1); // 6
        let t3 = f.sub(&t3, &t4); // 7
        let t4 = f.mul(&rhs.x, &lhs.z); // 8
        let t4 = f.add(&t4, &lhs.x); // 9
        let t5 = f.mul(&rhs.y, &lhs.z); // 10
        let t5 = f.add(&t5, &lhs.y); // 11
        let z3 = f.mul(a, &t4); // 12
        let x3 = f.mul(b3, &lhs.z); // 13
        let z3 = f.add(&x3, &z3); // 14
        let x3 = f.sub(&t1, &z3); // 15
        let z3 = f.add(&t1, &z3); // 16
        let y3 = f.mul(&x3, &z3); // 17
        let t1 = f.add(&t0, &t0); // 18
        let t1 = f.add(&t1, &t0); // 19
        let t2 = f.mul(a, &lhs.z); // 20
        let t4 = f.mul(b3, &t4); // 21
        let t1 = f.add(&t1, &t2); // 22
        let t2 = f.sub(&t0, &t2); // 23
        let t2 = f.mul(a, &t2); // 24
        let t4 = f.add(&t4, &t2); // 25
        let t0 = f.mul(&t1, &t4); // 26
        let y3 = f.add(&y3, &t0); // 27
        let t0 = f.mul(&t5, &t4); // 28
        let x3 = f.mul(&t3, &x3); // 29
        let x3 = f.sub(&x3, &t0); // 30
        let t0 = f.mul(&t3, &t1); // 31
        let z3 = f.mul(&t5, &z3); // 32
        let z3 = f.add(&z3, &t0); // 33

        let ret = ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        };
        ProjectivePoint::conditional_select(&ret, lhs, rhs.is_identity())
    }

    /// Implements point doubling for curves with any `a`
    ///
    /// Implements the exception-free point doubling formula from [Renes-Costello-Batina 2015]
    /// (Algorithm 3). The comments after each line indicate which algorithm
    /// steps are being performed.
    ///
    /// [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060
    pub fn double(&self, point: &ProjectivePoint) -> ProjectivePoint {
        let f = &self.field;
        let (a, b3) = (&self.a, &self.b3);

        let t0 = f.mul(&point.x, &point.x); // 1
        let t1 = f.mul(&point.y, &point.y); // 2
        let t2 = f.mul(&point.z, &point.z); // 3
        let t3 = f.mul(&point.x, &point.y); // 4
        let t3 = f.add(&t3, &t3); // 5
        let z3 = f.mul(&point.x, &point.z); // 6
        let z3 = f.add(&z3, &z3); // 7
        let x3 = f.mul(a, &z3); // 8
        let y3 = f.mul(b3, &t2); // 9
        let y3 = f.add(&x3, &y3); // 10
        let x3 = f.sub(&t1, &y3); // 11
        let y3 = f.add(&t1, &y3); // 12
        let y3 = f.mul(&x3, &y3); // 13
        let x3 = f.mul(&t3, &x3); // 14
        let z3 = f.mul(b3, &z3); // 15
        let t2 = f.mul(a, &t2); // 16
        let t3 = f.sub(&t0, &t2); // 17
        let t3 = f.mul(a, &t3); // 18
        let t3 = f.add(&t3, &z3); // 19
        let z3 = f.add(&t0, &t0); // 20
        let t0 = f.add(&z3, &t0); // 21
        let t0 = f.add(&t0, &t2); // 22
        let t0 = f.mul(&t0, &t3); // 23
        let y3 = f.add(&y3, &t0); // 24
        let t2 = f.mul(&point.y, &point.z); // 25
        let t2 = f.add(&t2, &t2); // 26
        let t0 = f.mul(&t2, &t3); // 27
        let x3 = f.sub(&x3, &t0); // 28
        let z3 = f.mul(&t2, &t1); // 29
        let z3 = f.add(&z3, &z3); // 30
        let z3 = f.add(&z3, &z3); // 31

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `[k] point` for any scalar, in constant time.
    pub fn mul(&self, point: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
        let mut k = self.scalars.to_canonical(k);

        let mut pc = [self.identity(); 16];
        pc[1] = *point;
        for i in 2..16 {
            pc[i] = if i % 2 == 0 {
                self.double(&pc[i / 2])
            } else {
                self.add(&pc[i - 1], point)
            };
        }

        let mut q = self.identity();
        let mut pos = self.scalars.byte_size() * 8 - 4;

        loop {
            let slot = (k[pos / 8] >> (pos % 8)) & 0xf;

            let mut t = self.identity();
            for i in 1..16 {
                t.conditional_assign(&pc[i], slot.ct_eq(&(i as u8)));
            }

            q = self.add(&q, &t);

            if pos == 0 {
                break;
            }

            q = self.double(&self.double(&self.double(&self.double(&q))));
            pos -= 4;
        }

        k.zeroize();
        q
    }

    /// Returns `[k] point` for a little-endian scalar `k` with `0 < k < q`.
    ///
    /// Fails with [`Error::InvalidScalar`] for a wrongly sized, zero or
    /// out-of-range scalar.
    pub fn scalar_mul(&self, point: &ProjectivePoint, k_le: &[u8]) -> Result<ProjectivePoint> {
        let k = self.scalar_from_le_bytes(k_le)?;
        Ok(self.mul(point, &k))
    }

    /// Returns `[k] G`.
    pub fn mul_by_generator(&self, k: &Scalar) -> ProjectivePoint {
        self.mul(&self.to_projective(&self.generator), k)
    }

    /// Decode a scalar in `(0, q)`.
    pub(crate) fn scalar_from_le_bytes(&self, k_le: &[u8]) -> Result<Scalar> {
        let k: Option<Scalar> = self.scalars.from_le_bytes(k_le).into();
        match k {
            Some(k) if !bool::from(self.scalars.is_zero(&k)) => Ok(k),
            _ => Err(Error::InvalidScalar),
        }
    }
}
