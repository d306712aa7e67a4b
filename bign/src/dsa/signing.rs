//! Support for signing bign signatures.
//!
//! ## Algorithm
//!
//! ```text
//! 1. Set 𝐻 ← ℎ(𝑋).
//! 2. Generate 𝑘 ← rand(1,..,𝑞-1)
//! 3. Set 𝑅 ← 𝑘𝐺.
//! 4. Set 𝑆0 ← ⟨︀belt-hash(OID(ℎ) ‖ ⟨𝑅⟩2𝑙 ‖ 𝐻)⟩︀_𝑙.
//! 5. Set 𝑆1 ← ⟨︀(𝑘 − 𝐻 − (𝑆0 + 2^𝑙)𝑑) mod 𝑞⟩︀_2𝑙.
//! 6. Set 𝑆 ← 𝑆0 ‖ 𝑆1.
//! 7. Return S.
//! ```
//!
//! Deterministic signing derives `𝑘` with HMAC_DRBG over belt-hash
//! ([RFC 6979 § 3.2] style), seeded with `𝑑`, `𝐻` and `OID(ℎ)` followed by
//! optional extra entropy.
//!
//! [RFC 6979 § 3.2]: https://datatracker.ietf.org/doc/html/rfc6979#section-3.2

#![allow(non_snake_case)]

use super::{
    Signature, VerifyingKey, check_digest, check_oid_der, commitment, s0_plus_two_pow_l,
};
use crate::{
    Error, ParamSet, Result, SecretKey,
    arithmetic::Scalar,
    hash::{BeltHashBinding, HashBinding, hash_message},
    secret_key::MAX_DRAWS,
};
use alloc::vec::Vec;
use belt_hash::BeltHash;
use core::fmt::{self, Debug};
use rand_core::CryptoRngCore;
use rfc6979::HmacDrbg;
use signature::{KeypairRef, hazmat::PrehashSigner, Signer};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

/// Sign `digest` deterministically.
///
/// `oid_der` is the complete DER encoding of the hash algorithm identifier
/// and `digest` must be `l/4` bytes. The same inputs always give the same
/// signature; `entropy`, when present, is mixed into the nonce derivation.
pub fn sign(
    params: &ParamSet,
    oid_der: &[u8],
    digest: &[u8],
    privkey: &[u8],
    entropy: Option<&[u8]>,
) -> Result<Signature> {
    check_oid_der(oid_der)?;
    check_digest(params, digest)?;
    let secret_key = SecretKey::from_bytes(params, privkey)?;
    let d = secret_key.to_scalar(params)?;

    let mut personalization = oid_der.to_vec();
    personalization.extend_from_slice(entropy.unwrap_or_default());

    // 2. Generate 𝑘 ← rand(1,..,𝑞-1)
    let mut drbg = HmacDrbg::<BeltHash>::new(privkey, digest, &personalization);
    let mut candidate = Zeroizing::new(alloc::vec![0u8; params.level().field_size()]);
    for _ in 0..MAX_DRAWS {
        drbg.fill_bytes(&mut candidate);
        if let Ok(k) = params.curve().scalar_from_le_bytes(&candidate) {
            return sign_with_nonce(params, oid_der, digest, &d, &k);
        }
    }
    Err(Error::SigningFailed)
}

/// Sign `digest` with a nonce drawn from `rng`.
pub fn sign_with_rng(
    params: &ParamSet,
    oid_der: &[u8],
    digest: &[u8],
    privkey: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Signature> {
    check_oid_der(oid_der)?;
    check_digest(params, digest)?;
    let d = SecretKey::from_bytes(params, privkey)?.to_scalar(params)?;

    // 2. Generate 𝑘 ← rand(1,..,𝑞-1)
    let k = SecretKey::random(params, rng)?.to_scalar(params)?;
    sign_with_nonce(params, oid_der, digest, &d, &k)
}

/// Steps 3 to 7 for a validated nonce `k` and secret scalar `d`.
fn sign_with_nonce(
    params: &ParamSet,
    oid_der: &[u8],
    digest: &[u8],
    d: &Scalar,
    k: &Scalar,
) -> Result<Signature> {
    let curve = params.curve();
    let s = curve.scalar_field();
    let h = s.reduce_le_bytes(digest)?;

    // 3. Set 𝑅 ← 𝑘𝐺.
    let R = curve.to_affine(&curve.mul_by_generator(k));

    // 4. Set 𝑆0 ← ⟨︀belt-hash(OID(ℎ) ‖ ⟨𝑅⟩2𝑙 ‖ 𝐻)⟩︀_𝑙.
    let s0 = commitment(params, oid_der, &R, digest);

    // 5. Set 𝑆1 ← ⟨︀(𝑘 − 𝐻 − (𝑆0 + 2^𝑙)𝑑) mod 𝑞⟩︀_2𝑙.
    let right = s.mul(&s0_plus_two_pow_l(params, &s0)?, d);
    let s1 = s.sub(&s.sub(k, &h), &right);

    // 6. Set 𝑆 ← 𝑆0 ‖ 𝑆1.
    let mut bytes: Vec<u8> = s0;
    bytes.extend_from_slice(&s.to_le_bytes(&s1));

    // 7. Return S.
    Signature::from_slice(&bytes)
}

/// bign secret key used for signing messages and producing signatures.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for signing:
///
/// - [`Signer`]: sign a message using this key
/// - [`PrehashSigner`]: sign the low-level raw output bytes of a message digest
///
/// Messages are hashed with `H`, belt-hash unless chosen otherwise. Its
/// output size must match the level of the parameters.
#[derive(Clone)]
pub struct SigningKey<'p, H = BeltHashBinding> {
    /// Secret key.
    secret_key: SecretKey,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey<'p, H>,
}

impl<'p> SigningKey<'p> {
    /// Create a belt-hash signing key.
    pub fn new(params: &'p ParamSet, secret_key: &SecretKey) -> Result<Self> {
        Self::with_hash(params, secret_key, BeltHashBinding::default())
    }

    /// Parse a belt-hash signing key from `l/4` little-endian bytes.
    pub fn from_bytes(params: &'p ParamSet, bytes: &[u8]) -> Result<Self> {
        Self::new(params, &SecretKey::from_bytes(params, bytes)?)
    }
}

impl<'p, H: HashBinding + Clone> SigningKey<'p, H> {
    /// Create a signing key hashing messages with `hash`.
    pub fn with_hash(params: &'p ParamSet, secret_key: &SecretKey, hash: H) -> Result<Self> {
        let public_key = secret_key.public_key(params)?;
        let verifying_key = VerifyingKey::with_hash(params, public_key, hash)?;
        Ok(Self {
            secret_key: secret_key.clone(),
            verifying_key,
        })
    }

    /// Serialize as bytes.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.secret_key.to_bytes()
    }

    /// Borrow the [`SecretKey`] for this key.
    pub fn as_secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey<'p, H> {
        &self.verifying_key
    }
}

//
// `*Signer` trait impls
//

impl<H: HashBinding + Clone> PrehashSigner<Signature> for SigningKey<'_, H> {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        let params = self.verifying_key.params();
        let oid_der = self.verifying_key.hash().oid().to_der();
        let d = self.secret_key.to_bytes();
        Ok(sign(params, &oid_der, prehash, &d, None)?)
    }
}

impl<H: HashBinding + Clone> Signer<Signature> for SigningKey<'_, H> {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        // 1. Set 𝐻 ← ℎ(𝑋).
        let hash = hash_message(self.verifying_key.params(), self.verifying_key.hash(), msg)?;
        self.sign_prehash(&hash)
    }
}

//
// Other trait impls
//

impl<'p, H> AsRef<VerifyingKey<'p, H>> for SigningKey<'p, H> {
    fn as_ref(&self) -> &VerifyingKey<'p, H> {
        &self.verifying_key
    }
}

impl<H> ConstantTimeEq for SigningKey<'_, H> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_key.ct_eq(&other.secret_key)
    }
}

impl<H: Debug> Debug for SigningKey<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

/// Constant-time comparison
impl<H> Eq for SigningKey<'_, H> {}
impl<H> PartialEq for SigningKey<'_, H> {
    fn eq(&self, other: &SigningKey<'_, H>) -> bool {
        self.ct_eq(other).into()
    }
}

impl<'p, H: Clone> KeypairRef for SigningKey<'p, H> {
    type VerifyingKey = VerifyingKey<'p, H>;
}
