//! Projective arithmetic tests.

use bign::{Error, ParamSet, oid};
use proptest::prelude::*;

fn params() -> ParamSet {
    ParamSet::load(oid::BIGN_CURVE256V1).unwrap()
}

#[test]
fn identity_encoding() {
    let params = params();
    let curve = params.curve();
    let identity = curve.to_affine(&curve.identity());
    assert!(bool::from(identity.is_identity()));
    assert!(bool::from(curve.is_identity(&curve.double(&curve.identity()))));
}

#[test]
fn generator_has_order_q() {
    let params = params();
    let curve = params.curve();
    let s = curve.scalar_field();
    let g = curve.to_projective(&curve.generator());

    let q_minus_one = s.neg(&s.one());
    let almost = curve.mul(&g, &q_minus_one);
    assert!(bool::from(curve.is_identity(&curve.add(&almost, &g))));
}

#[test]
fn scalar_mul_range_checks() {
    let params = params();
    let curve = params.curve();
    let g = curve.to_projective(&curve.generator());

    assert_eq!(
        curve.scalar_mul(&g, &[0u8; 32]).unwrap_err(),
        Error::InvalidScalar
    );
    assert_eq!(
        curve.scalar_mul(&g, params.q()).unwrap_err(),
        Error::InvalidScalar
    );

    let mut q_minus_one = params.q().to_vec();
    q_minus_one[0] -= 1;
    let p = curve.scalar_mul(&g, &q_minus_one).unwrap();
    assert_eq!(curve.to_affine(&p), curve.neg_affine(&curve.generator()));
}

proptest! {
    #[test]
    fn scalar_mul_distributes(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let params = params();
        let curve = params.curve();
        let s = curve.scalar_field();
        let a = s.reduce_le_bytes(&a).unwrap();
        let b = s.reduce_le_bytes(&b).unwrap();
        let g = curve.to_projective(&curve.generator());

        let lhs = curve.mul_by_generator(&s.add(&a, &b));
        let rhs = curve.add(&curve.mul(&g, &a), &curve.mul(&g, &b));
        prop_assert_eq!(curve.to_affine(&lhs), curve.to_affine(&rhs));
    }

    #[test]
    fn mixed_addition_agrees(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let params = params();
        let curve = params.curve();
        let s = curve.scalar_field();
        let p = curve.mul_by_generator(&s.reduce_le_bytes(&a).unwrap());
        let q = curve.to_affine(&curve.mul_by_generator(&s.reduce_le_bytes(&b).unwrap()));

        let full = curve.add(&p, &curve.to_projective(&q));
        let mixed = curve.add_mixed(&p, &q);
        prop_assert_eq!(curve.to_affine(&full), curve.to_affine(&mixed));
        prop_assert!(bool::from(curve.is_on_curve(&curve.to_affine(&mixed))));
    }
}
