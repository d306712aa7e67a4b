//! bign secret key.

use crate::{Error, ParamSet, PublicKey, Result, arithmetic::Scalar};
use alloc::vec::Vec;
use core::fmt;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

/// Bound on rejection sampling of random scalars.
///
/// `q` has its top bit set, so each draw is accepted with probability
/// above one half.
pub(crate) const MAX_DRAWS: usize = 128;

/// Secret key: an integer `0 < d < q` stored as `l/4` little-endian bytes.
///
/// The bytes are zeroized on drop.
#[derive(Clone)]
pub struct SecretKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl SecretKey {
    /// Generate a random [`SecretKey`] for `params`.
    ///
    /// Fails with [`Error::SigningFailed`] only if `rng` keeps producing
    /// out-of-range values.
    pub fn random(params: &ParamSet, rng: &mut impl CryptoRngCore) -> Result<Self> {
        let mut bytes = Zeroizing::new(alloc::vec![0u8; params.level().field_size()]);
        for _ in 0..MAX_DRAWS {
            rng.fill_bytes(&mut bytes);
            if params.curve().scalar_from_le_bytes(&bytes).is_ok() {
                return Ok(Self { bytes });
            }
        }
        Err(Error::SigningFailed)
    }

    /// Deserialize a secret key from `l/4` little-endian bytes.
    ///
    /// Fails with [`Error::InvalidKey`] on a length mismatch or when the
    /// integer is zero or not less than `q`.
    pub fn from_bytes(params: &ParamSet, bytes: &[u8]) -> Result<Self> {
        params
            .curve()
            .scalar_from_le_bytes(bytes)
            .map_err(|_| Error::InvalidKey)?;
        Ok(Self {
            bytes: Zeroizing::new(bytes.to_vec()),
        })
    }

    /// Serialize the secret scalar as little-endian bytes.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.bytes.clone()
    }

    /// Get the [`PublicKey`] `Q = dG` which corresponds to this secret key.
    pub fn public_key(&self, params: &ParamSet) -> Result<PublicKey> {
        let d = self.to_scalar(params)?;
        let curve = params.curve();
        PublicKey::from_affine(params, &curve.to_affine(&curve.mul_by_generator(&d)))
    }

    /// Secret scalar `d` in the scalar field of `params`.
    pub(crate) fn to_scalar(&self, params: &ParamSet) -> Result<Scalar> {
        params
            .curve()
            .scalar_from_le_bytes(&self.bytes)
            .map_err(|_| Error::InvalidKey)
    }
}

impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice())
    }
}

/// Constant-time comparison
impl Eq for SecretKey {}
impl PartialEq for SecretKey {
    fn eq(&self, other: &SecretKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}
