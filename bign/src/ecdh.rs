//! bign Diffie-Hellman key agreement (STB 34.101.45 § 6.2.4).
//!
//! The shared key is a prefix of `⟨dQ⟩ = ⟨x⟩ ‖ ⟨y⟩` where `d` is our secret
//! key and `Q` the peer's public key.
//!
//! # Usage
//!
//! This usage example is from the perspective of two participants in the
//! exchange, nicknamed "Alice" and "Bob".
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bign::{ParamSet, ecdh::EphemeralSecret};
//! use rand_core::OsRng; // requires 'getrandom' feature
//!
//! let params = ParamSet::load("1.2.112.0.2.0.34.101.45.3.1")?;
//!
//! // Alice
//! let alice_secret = EphemeralSecret::random(&params, &mut OsRng)?;
//! let alice_pk = alice_secret.public_key()?;
//!
//! // Bob
//! let bob_secret = EphemeralSecret::random(&params, &mut OsRng)?;
//! let bob_pk = bob_secret.public_key()?;
//!
//! // Both participants arrive on the same shared secret
//! let alice_shared = alice_secret.diffie_hellman(&bob_pk, 32)?;
//! let bob_shared = bob_secret.diffie_hellman(&alice_pk, 32)?;
//! assert_eq!(alice_shared.raw_secret_bytes(), bob_shared.raw_secret_bytes());
//! # Ok(())
//! # }
//! ```

use crate::{Error, ParamSet, PublicKey, Result, SecretKey};
use alloc::vec::Vec;
use core::fmt;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

/// Compute the first `key_len` bytes of `⟨privkey · pubkey⟩`.
///
/// `key_len` may be at most `l/2`; larger values fail with
/// [`Error::InvalidParams`]. Keys are validated as in
/// [`SecretKey::from_bytes`] and [`PublicKey::from_bytes`].
pub fn diffie_hellman(
    params: &ParamSet,
    privkey: &[u8],
    pubkey: &[u8],
    key_len: usize,
) -> Result<SharedSecret> {
    let secret_key = SecretKey::from_bytes(params, privkey)?;
    let public_key = PublicKey::from_bytes(params, pubkey)?;
    agree(params, &secret_key, &public_key, key_len)
}

fn agree(
    params: &ParamSet,
    secret_key: &SecretKey,
    public_key: &PublicKey,
    key_len: usize,
) -> Result<SharedSecret> {
    if key_len > params.level().public_key_size() {
        return Err(Error::InvalidParams);
    }

    let curve = params.curve();
    let d = secret_key.to_scalar(params)?;
    let shared = curve.to_affine(&curve.mul(&public_key.to_projective(params)?, &d));

    let mut bytes = Zeroizing::new(curve.point_to_le_bytes(&shared));
    bytes.truncate(key_len);
    Ok(SharedSecret { bytes })
}

/// Ephemeral Diffie-Hellman secret.
///
/// Meant to be used once: it is consumed by
/// [`EphemeralSecret::diffie_hellman`].
pub struct EphemeralSecret<'p> {
    params: &'p ParamSet,
    secret_key: SecretKey,
}

impl<'p> EphemeralSecret<'p> {
    /// Generate a random [`EphemeralSecret`].
    pub fn random(params: &'p ParamSet, rng: &mut impl CryptoRngCore) -> Result<Self> {
        Ok(Self {
            params,
            secret_key: SecretKey::random(params, rng)?,
        })
    }

    /// Get the public key associated with this ephemeral secret.
    pub fn public_key(&self) -> Result<PublicKey> {
        self.secret_key.public_key(self.params)
    }

    /// Compute a Diffie-Hellman shared secret of `key_len` bytes.
    pub fn diffie_hellman(self, public_key: &PublicKey, key_len: usize) -> Result<SharedSecret> {
        PublicKey::from_bytes(self.params, public_key.as_bytes())?;
        agree(self.params, &self.secret_key, public_key, key_len)
    }
}

impl fmt::Debug for EphemeralSecret<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralSecret").finish_non_exhaustive()
    }
}

/// Shared secret value computed via key agreement. Zeroized on drop.
pub struct SharedSecret {
    bytes: Zeroizing<Vec<u8>>,
}

impl SharedSecret {
    /// Shared secret value.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn raw_secret_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}
