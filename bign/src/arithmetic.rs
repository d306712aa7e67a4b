//! Pure Rust implementation of the group operations on bign curves.
//!
//! Unlike a fixed-curve crate, the moduli are only known at runtime: each
//! [`ParamSet`](crate::ParamSet) owns a [`CurveGroup`] holding the
//! Montgomery contexts for `p` and `q`.

pub mod curve;
pub mod field;

pub use self::{
    curve::{AffinePoint, CurveGroup, ProjectivePoint},
    field::{FieldElement, PrimeField, Scalar},
};
