//! Message hashing.
//!
//! bign signs a digest `H` of exactly `l/4` bytes and binds the identifier
//! of the hash algorithm into the signature. [`HashBinding`] pairs the two.

use crate::{Error, ParamSet, Result, oid::ObjectIdentifier};
use alloc::vec::Vec;
use belt_hash::BeltHash;
use core::{fmt, marker::PhantomData};
use digest::Digest;

/// Hash algorithm usable with bign.
pub trait HashBinding {
    /// Identifier of the algorithm.
    fn oid(&self) -> &ObjectIdentifier;

    /// Digest size in bytes.
    fn output_size(&self) -> usize;

    /// Hash `message`.
    fn hash(&self, message: &[u8]) -> Vec<u8>;
}

/// [`HashBinding`] for any [`Digest`].
pub struct DigestBinding<D> {
    oid: ObjectIdentifier,
    _digest: PhantomData<D>,
}

impl<D: Digest> DigestBinding<D> {
    /// Bind `D` to its identifier.
    pub fn new(oid: ObjectIdentifier) -> Self {
        Self {
            oid,
            _digest: PhantomData,
        }
    }
}

impl<D> Clone for DigestBinding<D> {
    fn clone(&self) -> Self {
        Self {
            oid: self.oid.clone(),
            _digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for DigestBinding<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestBinding")
            .field("oid", &self.oid)
            .finish()
    }
}

impl<D: Digest> HashBinding for DigestBinding<D> {
    fn oid(&self) -> &ObjectIdentifier {
        &self.oid
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn hash(&self, message: &[u8]) -> Vec<u8> {
        D::digest(message).to_vec()
    }
}

/// belt-hash (STB 34.101.31), the hash of bign-curve256v1.
pub type BeltHashBinding = DigestBinding<BeltHash>;

impl Default for BeltHashBinding {
    fn default() -> Self {
        Self::new(ObjectIdentifier::belt_hash())
    }
}

/// Hash `message` into a digest suitable for `params`.
///
/// Fails with [`Error::InvalidParams`] unless the digest is exactly `l/4`
/// bytes.
pub fn hash_message<H>(params: &ParamSet, binding: &H, message: &[u8]) -> Result<Vec<u8>>
where
    H: HashBinding + ?Sized,
{
    if binding.output_size() != params.level().digest_size() {
        return Err(Error::InvalidParams);
    }
    Ok(binding.hash(message))
}
