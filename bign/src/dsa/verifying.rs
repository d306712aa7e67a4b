//! Support for verifying bign signatures.
//!
//! ## Algorithm
//!
//! ```text
//! 1. If |𝑆| != 3𝑙, return NO.
//! 2. Assume 𝑆 as 𝑆 = 𝑆0 ‖ 𝑆1, where 𝑆0 ∈ {0, 1}^𝑙, 𝑆1 ∈ {0, 1}^2𝑙.
//! 3. If 𝑆1 ⩾ 𝑞, return NO.
//! 4. Set 𝐻 ← ℎ(𝑋).
//! 5. Set 𝑅 ← (︀(𝑆1 + 𝐻) mod 𝑞)︀𝐺 + (𝑆0 + 2𝑙)𝑄.
//! 6. If 𝑅 = 𝑂, return NO.
//! 7. Set 𝑡 ← ⟨︀belt-hash(OID(ℎ) ‖ ⟨𝑅⟩^2𝑙 ‖ 𝐻) ⟩︀^𝑙.
//! 8. If 𝑆0 != 𝑡, return NO.
//! 9. Return YES.
//! ```
//!
//! A "NO" is reported as [`Error::VerifyFailed`]; structurally malformed
//! input is reported with the other error variants.

use super::{Signature, check_digest, check_oid_der, commitment, s0_plus_two_pow_l};
use crate::{
    Error, ParamSet, PublicKey, Result,
    hash::{BeltHashBinding, HashBinding, hash_message},
};
use alloc::boxed::Box;
use signature::{Verifier, hazmat::PrehashVerifier};
use subtle::ConstantTimeEq;

/// Verify `signature` over `digest` with the public key `pubkey`.
///
/// Returns `Ok(())` for a valid signature and `Err(Error::VerifyFailed)`
/// for a well-formed but invalid one. Wrong lengths or a malformed OID give
/// [`Error::InvalidParams`], an unusable public key [`Error::InvalidKey`].
pub fn verify(
    params: &ParamSet,
    oid_der: &[u8],
    digest: &[u8],
    signature: &[u8],
    pubkey: &[u8],
) -> Result<()> {
    check_oid_der(oid_der)?;
    check_digest(params, digest)?;
    let level = params.level();

    // 1. If |𝑆| != 3𝑙, return NO.
    if signature.len() != level.signature_size() {
        return Err(Error::InvalidParams);
    }
    let public_key = PublicKey::from_bytes(params, pubkey)?;
    let curve = params.curve();
    let s = curve.scalar_field();

    // 2. Assume 𝑆 as 𝑆 = 𝑆0 ‖ 𝑆1, where 𝑆0 ∈ {0, 1}^𝑙, 𝑆1 ∈ {0, 1}^2𝑙.
    let (s0, s1) = signature.split_at(level.s0_size());

    // 3. If 𝑆1 ⩾ 𝑞, return NO.
    let s1 = Option::from(s.from_le_bytes(s1)).ok_or(Error::VerifyFailed)?;

    // 5. Set 𝑅 ← (︀(𝑆1 + 𝐻) mod 𝑞)︀𝐺 + (𝑆0 + 2𝑙)𝑄.
    let h = s.reduce_le_bytes(digest)?;
    let left = s.add(&s1, &h);
    let right = s0_plus_two_pow_l(params, s0)?;
    let r = curve.add(
        &curve.mul_by_generator(&left),
        &curve.mul(&public_key.to_projective(params)?, &right),
    );

    // 6. If 𝑅 = 𝑂, return NO.
    if curve.is_identity(&r).into() {
        return Err(Error::VerifyFailed);
    }

    // 7. Set 𝑡 ← ⟨︀belt-hash(OID(ℎ) ‖ ⟨𝑅⟩^2𝑙 ‖ 𝐻) ⟩︀^𝑙.
    let t = commitment(params, oid_der, &curve.to_affine(&r), digest);

    // 8. If 𝑆0 != 𝑡, return NO.
    if s0.ct_eq(t.as_slice()).into() {
        // 9. Return YES.
        Ok(())
    } else {
        Err(Error::VerifyFailed)
    }
}

/// bign public key used for verifying signatures are valid for a given
/// message.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for verifying:
///
/// - [`Verifier`]: verify a message against a provided key and signature
/// - [`PrehashVerifier`]: verify the low-level raw output bytes of a message digest
#[derive(Clone, Debug)]
pub struct VerifyingKey<'p, H = BeltHashBinding> {
    /// Parameters the key belongs to.
    params: &'p ParamSet,

    /// Signer's public key.
    public_key: PublicKey,

    /// Message hash.
    hash: H,
}

impl<'p> VerifyingKey<'p> {
    /// Initialize a belt-hash [`VerifyingKey`] from a public key.
    pub fn new(params: &'p ParamSet, public_key: PublicKey) -> Result<Self> {
        Self::with_hash(params, public_key, BeltHashBinding::default())
    }

    /// Parse a belt-hash [`VerifyingKey`] from a byte slice.
    pub fn from_bytes(params: &'p ParamSet, bytes: &[u8]) -> Result<Self> {
        Self::new(params, PublicKey::from_bytes(params, bytes)?)
    }
}

impl<'p, H: HashBinding> VerifyingKey<'p, H> {
    /// Initialize a [`VerifyingKey`] hashing messages with `hash`.
    ///
    /// Fails with [`Error::InvalidParams`] if the digest size of `hash` does
    /// not match the level of `params`.
    pub fn with_hash(params: &'p ParamSet, public_key: PublicKey, hash: H) -> Result<Self> {
        if hash.output_size() != params.level().digest_size() {
            return Err(Error::InvalidParams);
        }
        PublicKey::from_bytes(params, public_key.as_bytes())?;
        Ok(Self {
            params,
            public_key,
            hash,
        })
    }

    /// Parameters this key belongs to.
    pub fn params(&self) -> &'p ParamSet {
        self.params
    }

    /// Message hash.
    pub fn hash(&self) -> &H {
        &self.hash
    }

    /// Borrow the inner [`PublicKey`].
    pub fn as_public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Serialize the [`VerifyingKey`] as a byte array.
    pub fn to_bytes(&self) -> Box<[u8]> {
        self.public_key.to_bytes()
    }
}

//
// `*Verifier` trait impls
//

impl<H: HashBinding> PrehashVerifier<Signature> for VerifyingKey<'_, H> {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        let oid_der = self.hash.oid().to_der();
        Ok(verify(
            self.params,
            &oid_der,
            prehash,
            signature.as_bytes(),
            self.public_key.as_bytes(),
        )?)
    }
}

impl<H: HashBinding> Verifier<Signature> for VerifyingKey<'_, H> {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        // 4. Set 𝐻 ← ℎ(𝑋).
        let hash = hash_message(self.params, &self.hash, msg)?;
        self.verify_prehash(&hash, signature)
    }
}

//
// Other trait impls
//

impl<H> From<VerifyingKey<'_, H>> for PublicKey {
    fn from(verifying_key: VerifyingKey<'_, H>) -> PublicKey {
        verifying_key.public_key
    }
}

impl<H> From<&VerifyingKey<'_, H>> for PublicKey {
    fn from(verifying_key: &VerifyingKey<'_, H>) -> PublicKey {
        verifying_key.public_key.clone()
    }
}

impl<H> AsRef<PublicKey> for VerifyingKey<'_, H> {
    fn as_ref(&self) -> &PublicKey {
        &self.public_key
    }
}
