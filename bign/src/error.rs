//! Error types.

use core::fmt;

/// Error type.
///
/// [`Error::VerifyFailed`] is the ordinary outcome of checking a forged or
/// corrupted signature. Every other variant reports structurally malformed
/// input or an unusable configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The OID does not name a known parameter set.
    UnknownParameters,

    /// A secret or public key has the wrong length, is out of range or is
    /// not a valid curve point.
    InvalidKey,

    /// A scalar multiplier is zero or not less than the group order.
    InvalidScalar,

    /// Domain parameters, digest or signature have an invalid structure.
    InvalidParams,

    /// An object identifier string or encoding is malformed.
    MalformedOid,

    /// The output buffer cannot hold the result.
    BufferTooSmall {
        /// Number of bytes the result requires.
        required: usize,
    },

    /// No usable nonce or key could be drawn.
    SigningFailed,

    /// The signature does not match the digest and public key.
    VerifyFailed,

    /// A hexadecimal string is malformed.
    MalformedHex,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownParameters => write!(f, "unknown parameter set"),
            Error::InvalidKey => write!(f, "invalid key"),
            Error::InvalidScalar => write!(f, "invalid scalar"),
            Error::InvalidParams => write!(f, "invalid parameters"),
            Error::MalformedOid => write!(f, "malformed object identifier"),
            Error::BufferTooSmall { required } => {
                write!(f, "buffer too small: {required} bytes required")
            }
            Error::SigningFailed => write!(f, "signing failed"),
            Error::VerifyFailed => write!(f, "signature verification failed"),
            Error::MalformedHex => write!(f, "malformed hex string"),
        }
    }
}

impl core::error::Error for Error {}

impl From<Error> for signature::Error {
    fn from(_: Error) -> signature::Error {
        signature::Error::new()
    }
}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
