//! bign Digital Signature Algorithm as defined in [STB 34.101.45-2013 § 7].
//!
//! Two layers are offered:
//!
//! - byte-oriented functions [`pubkey_calc`], [`sign`], [`sign_with_rng`],
//!   [`verify`], [`keypair_gen`] and [`keypair_val`] which take the
//!   DER-encoded hash OID and a precomputed digest;
//! - [`SigningKey`] and [`VerifyingKey`] implementing the traits of the
//!   [`signature`] crate, which hash messages themselves.
//!
//! ## Usage
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use bign::{
//!     dsa::{Signature, SigningKey, VerifyingKey, signature::{Signer, Verifier}},
//!     ParamSet, SecretKey,
//! };
//! use rand_core::OsRng; // requires 'getrandom' feature
//!
//! let params = ParamSet::load("1.2.112.0.2.0.34.101.45.3.1")?;
//!
//! // Signing
//! let secret_key = SecretKey::random(&params, &mut OsRng)?;
//! let signing_key = SigningKey::new(&params, &secret_key)?;
//! let verifying_key_bytes = signing_key.verifying_key().to_bytes();
//! let message = b"test message";
//! let signature: Signature = signing_key.sign(message);
//!
//! // Verifying
//! let verifying_key = VerifyingKey::from_bytes(&params, &verifying_key_bytes)?;
//! verifying_key.verify(message, &signature)?;
//! # Ok(())
//! # }
//! ```
//!
//! [STB 34.101.45-2013 § 7]: https://apmi.bsu.by/assets/files/std/bign-spec294.pdf

mod signing;
mod verifying;

pub use signature;

pub use self::{
    signing::{SigningKey, sign, sign_with_rng},
    verifying::{VerifyingKey, verify},
};

use crate::{
    Error, ParamSet, PublicKey, Result, SecretKey,
    arithmetic::{AffinePoint, Scalar},
    oid::ObjectIdentifier,
    params::Level,
};
use alloc::{boxed::Box, vec::Vec};
use belt_hash::{BeltHash, Digest};
use core::fmt::{self, Debug};
use rand_core::CryptoRngCore;

/// bign signature `S0 ‖ S1` of `3l/8` bytes.
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    /// Parse a signature from a byte slice.
    ///
    /// The length selects the level: 48, 72 or 96 bytes. Range checks on
    /// `S1` happen during verification.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 3 != 0 {
            return Err(Error::InvalidParams);
        }
        Level::from_bits(bytes.len() * 8 / 3)?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Security level this signature belongs to.
    pub fn level(&self) -> Level {
        match self.bytes.len() {
            48 => Level::L128,
            72 => Level::L192,
            _ => Level::L256,
        }
    }

    /// Bytes for the `S0` component of a signature: `l/8` bytes.
    pub fn s0_bytes(&self) -> &[u8] {
        &self.bytes[..self.level().s0_size()]
    }

    /// Bytes for the `S1` component of a signature: `l/4` little-endian bytes.
    pub fn s1_bytes(&self) -> &[u8] {
        &self.bytes[self.level().s0_size()..]
    }

    /// Borrow the encoded signature.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert this signature into a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bign::dsa::Signature(")?;

        for byte in &self.bytes {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Signature> for Box<[u8]> {
    fn from(signature: Signature) -> Box<[u8]> {
        signature.bytes.into_boxed_slice()
    }
}

impl signature::SignatureEncoding for Signature {
    type Repr = Box<[u8]>;

    fn encoded_len(&self) -> usize {
        self.bytes.len()
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> signature::Result<Signature> {
        Ok(Signature::from_slice(bytes)?)
    }
}

/// Derive the public key `Q = dG` from `l/4` little-endian secret bytes.
///
/// Fails with [`Error::InvalidKey`] when `d ∉ (0, q)` or the length is wrong.
pub fn pubkey_calc(params: &ParamSet, privkey: &[u8]) -> Result<PublicKey> {
    SecretKey::from_bytes(params, privkey)?.public_key(params)
}

/// Generate a random key pair.
pub fn keypair_gen(
    params: &ParamSet,
    rng: &mut impl CryptoRngCore,
) -> Result<(SecretKey, PublicKey)> {
    let secret_key = SecretKey::random(params, rng)?;
    let public_key = secret_key.public_key(params)?;
    Ok((secret_key, public_key))
}

/// Check that `pubkey` is a valid point and equals `privkey · G`.
///
/// Fails with [`Error::InvalidKey`] otherwise.
pub fn keypair_val(params: &ParamSet, privkey: &[u8], pubkey: &[u8]) -> Result<()> {
    let public_key = PublicKey::from_bytes(params, pubkey)?;
    if pubkey_calc(params, privkey)? == public_key {
        Ok(())
    } else {
        Err(Error::InvalidKey)
    }
}

/// Check that `oid_der` is a complete DER `OBJECT IDENTIFIER`.
fn check_oid_der(oid_der: &[u8]) -> Result<()> {
    ObjectIdentifier::from_der(oid_der)
        .map(|_| ())
        .map_err(|_| Error::InvalidParams)
}

/// Check the digest length against the level.
fn check_digest(params: &ParamSet, digest: &[u8]) -> Result<()> {
    if digest.len() == params.level().digest_size() {
        Ok(())
    } else {
        Err(Error::InvalidParams)
    }
}

/// `⟨belt-hash(OID ‖ ⟨R.x⟩ ‖ H)⟩` truncated to `l/8` bytes.
fn commitment(params: &ParamSet, oid_der: &[u8], r: &AffinePoint, digest: &[u8]) -> Vec<u8> {
    let x = params.curve().field().to_le_bytes(&r.x);
    let mut t = BeltHash::new()
        .chain_update(oid_der)
        .chain_update(&x)
        .chain_update(digest)
        .finalize()
        .to_vec();
    t.truncate(params.level().s0_size());
    t
}

/// `(S0 + 2^l) mod q` for the `l/8`-byte `S0`.
fn s0_plus_two_pow_l(params: &ParamSet, s0: &[u8]) -> Result<Scalar> {
    let mut wide = alloc::vec![0u8; params.level().field_size()];
    wide[..s0.len()].copy_from_slice(s0);
    wide[s0.len()] = 1;
    params.curve().scalar_field().reduce_le_bytes(&wide)
}
