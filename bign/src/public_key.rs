//! Public key types

use crate::{
    Error, ParamSet, Result,
    arithmetic::{AffinePoint, ProjectivePoint},
};
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

/// bign public key: a point `Q ≠ O` on the curve, encoded as
/// `⟨Qx⟩ ‖ ⟨Qy⟩` with little-endian coordinates (`l/2` bytes).
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Parse and fully validate a public key.
    ///
    /// Fails with [`Error::InvalidKey`] unless `bytes` has length `l/2`,
    /// both coordinates are reduced modulo `p` and the point lies on the
    /// curve.
    pub fn from_bytes(params: &ParamSet, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != params.level().public_key_size() {
            return Err(Error::InvalidKey);
        }
        let point: Option<AffinePoint> = params.curve().point_from_le_bytes(bytes).into();
        point.ok_or(Error::InvalidKey)?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Convert an [`AffinePoint`] into a [`PublicKey`].
    ///
    /// Fails with [`Error::InvalidKey`] for the identity or a point off the
    /// curve of `params`.
    pub fn from_affine(params: &ParamSet, point: &AffinePoint) -> Result<Self> {
        let curve = params.curve();
        if bool::from(point.is_identity() | !curve.is_on_curve(point)) {
            return Err(Error::InvalidKey);
        }
        Ok(Self {
            bytes: curve.point_to_le_bytes(point),
        })
    }

    /// Decode the point.
    pub fn to_affine(&self, params: &ParamSet) -> Result<AffinePoint> {
        Option::from(params.curve().point_from_le_bytes(&self.bytes)).ok_or(Error::InvalidKey)
    }

    /// Decode the point in projective form.
    pub fn to_projective(&self, params: &ParamSet) -> Result<ProjectivePoint> {
        Ok(params.curve().to_projective(&self.to_affine(params)?))
    }

    /// Borrow the encoded point.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get bytes from [`PublicKey`]
    pub fn to_bytes(&self) -> Box<[u8]> {
        self.bytes.clone().into_boxed_slice()
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(")?;
        for byte in &self.bytes {
            write!(f, "{byte:02X}")?;
        }
        write!(f, ")")
    }
}
