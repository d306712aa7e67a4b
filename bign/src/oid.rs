//! ASN.1 object identifiers.
//!
//! bign binds the identifier of the hash algorithm into every signature as
//! the DER content octets of an `OBJECT IDENTIFIER` (X.690 §8.19): the first
//! two arcs are folded into one subidentifier `40·X + Y`, and every
//! subidentifier is written base-128, most significant group first, with
//! the high bit set on all but the last octet.

use crate::{Error, Result};
use alloc::vec::Vec;
use core::{fmt, str::FromStr};

/// belt-hash (STB 34.101.31).
pub const BELT_HASH: &str = "1.2.112.0.2.0.34.101.31.81";

/// bign-curve256v1 standard parameters.
pub const BIGN_CURVE256V1: &str = "1.2.112.0.2.0.34.101.45.3.1";

/// bign-curve384v1 standard parameters.
pub const BIGN_CURVE384V1: &str = "1.2.112.0.2.0.34.101.45.3.2";

/// bign-curve512v1 standard parameters.
pub const BIGN_CURVE512V1: &str = "1.2.112.0.2.0.34.101.45.3.3";

/// bign public key algorithm identifier.
pub const BIGN_PUBKEY: &str = "1.2.112.0.2.0.34.101.45.2.1";

/// Tag of the universal `OBJECT IDENTIFIER` type.
const TAG: u8 = 0x06;

/// Object identifier: an ordered sequence of arcs.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct ObjectIdentifier {
    arcs: Vec<u32>,
}

impl ObjectIdentifier {
    /// Build an identifier from its arcs.
    ///
    /// There must be at least two arcs, the first at most `2`, the second
    /// below `40` unless the first is `2`, and `40·X + Y` must fit in a `u32`.
    pub fn new(arcs: &[u32]) -> Result<Self> {
        match arcs {
            [first, second, ..] => {
                let fits = match first {
                    0 | 1 => *second < 40,
                    2 => second.checked_add(80).is_some(),
                    _ => false,
                };
                if fits {
                    Ok(Self {
                        arcs: arcs.to_vec(),
                    })
                } else {
                    Err(Error::MalformedOid)
                }
            }
            _ => Err(Error::MalformedOid),
        }
    }

    /// Identifier of belt-hash, [`BELT_HASH`].
    pub fn belt_hash() -> Self {
        Self {
            arcs: alloc::vec![1, 2, 112, 0, 2, 0, 34, 101, 31, 81],
        }
    }

    /// Arcs of the identifier.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Length of the DER content octets.
    pub fn encoded_len(&self) -> usize {
        self.subidentifiers().map(base128_len).sum()
    }

    /// Length of the complete DER encoding, see [`ObjectIdentifier::to_der`].
    pub fn der_len(&self) -> usize {
        let content = self.encoded_len();
        1 + length_octets(content) + content
    }

    /// Write the DER content octets into `out`, returning their length.
    ///
    /// Content octets carry no tag or length. Signing and verification take
    /// the complete encoding, use [`ObjectIdentifier::encode_der`] or
    /// [`ObjectIdentifier::to_der`] for those.
    ///
    /// If `out` is shorter than [`ObjectIdentifier::encoded_len`], fails with
    /// [`Error::BufferTooSmall`] and leaves `out` untouched.
    pub fn encode(&self, out: &mut [u8]) -> Result<usize> {
        let required = self.encoded_len();
        if out.len() < required {
            return Err(Error::BufferTooSmall { required });
        }
        Ok(self.write_content(out))
    }

    /// Write the complete DER encoding into `out`, returning its length.
    ///
    /// If `out` is shorter than [`ObjectIdentifier::der_len`], fails with
    /// [`Error::BufferTooSmall`] and leaves `out` untouched.
    pub fn encode_der(&self, out: &mut [u8]) -> Result<usize> {
        let required = self.der_len();
        if out.len() < required {
            return Err(Error::BufferTooSmall { required });
        }
        Ok(self.write_der(out))
    }

    /// DER content octets.
    pub fn to_content_bytes(&self) -> Vec<u8> {
        let mut out = alloc::vec![0u8; self.encoded_len()];
        self.write_content(&mut out);
        out
    }

    /// Complete DER encoding: tag `0x06`, definite length, content octets.
    ///
    /// This is the form bign hashes into signatures.
    pub fn to_der(&self) -> Vec<u8> {
        let mut out = alloc::vec![0u8; self.der_len()];
        self.write_der(&mut out);
        out
    }

    /// Decode DER content octets.
    ///
    /// Rejects empty input, truncated or non-minimal subidentifiers and arcs
    /// that overflow a `u32`.
    pub fn from_content_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::MalformedOid);
        }

        let mut arcs = Vec::new();
        let mut value: u32 = 0;
        let mut in_progress = false;

        for &byte in bytes {
            if !in_progress && byte == 0x80 {
                return Err(Error::MalformedOid);
            }
            value = value
                .checked_mul(128)
                .map(|v| v | u32::from(byte & 0x7f))
                .ok_or(Error::MalformedOid)?;

            if byte & 0x80 == 0 {
                if arcs.is_empty() {
                    let (first, second) = match value {
                        0..=39 => (0, value),
                        40..=79 => (1, value - 40),
                        _ => (2, value - 80),
                    };
                    arcs.push(first);
                    arcs.push(second);
                } else {
                    arcs.push(value);
                }
                value = 0;
                in_progress = false;
            } else {
                in_progress = true;
            }
        }

        if in_progress {
            return Err(Error::MalformedOid);
        }
        Ok(Self { arcs })
    }

    /// Decode a complete DER encoding as produced by [`ObjectIdentifier::to_der`].
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let (&tag, rest) = bytes.split_first().ok_or(Error::MalformedOid)?;
        let (&first, rest) = rest.split_first().ok_or(Error::MalformedOid)?;
        if tag != TAG {
            return Err(Error::MalformedOid);
        }

        let (len, content) = if first < 0x80 {
            (usize::from(first), rest)
        } else {
            let count = usize::from(first & 0x7f);
            if count == 0 || count > size_of::<usize>() || rest.len() < count {
                return Err(Error::MalformedOid);
            }
            let (len_bytes, content) = rest.split_at(count);
            // DER demands the shortest length form.
            if len_bytes[0] == 0 {
                return Err(Error::MalformedOid);
            }
            let len = len_bytes
                .iter()
                .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
            if len < 0x80 {
                return Err(Error::MalformedOid);
            }
            (len, content)
        };

        if content.len() != len {
            return Err(Error::MalformedOid);
        }
        Self::from_content_bytes(content)
    }

    /// Write tag, length and content into a buffer of at least `der_len()`
    /// bytes.
    fn write_der(&self, out: &mut [u8]) -> usize {
        let content = self.encoded_len();
        out[0] = TAG;
        let mut pos = 1;
        if content < 0x80 {
            out[pos] = content as u8;
            pos += 1;
        } else {
            let len_bytes = content.to_be_bytes();
            let significant = &len_bytes[len_bytes.iter().take_while(|&&b| b == 0).count()..];
            out[pos] = 0x80 | significant.len() as u8;
            pos += 1;
            out[pos..pos + significant.len()].copy_from_slice(significant);
            pos += significant.len();
        }
        pos + self.write_content(&mut out[pos..])
    }

    /// Write the content octets into a buffer of at least `encoded_len()`
    /// bytes.
    fn write_content(&self, out: &mut [u8]) -> usize {
        let mut pos = 0;
        for subidentifier in self.subidentifiers() {
            let len = base128_len(subidentifier);
            for (i, byte) in out[pos..pos + len].iter_mut().enumerate() {
                let shift = 7 * (len - 1 - i);
                let continuation = if i + 1 < len { 0x80 } else { 0 };
                *byte = ((subidentifier >> shift) & 0x7f) as u8 | continuation;
            }
            pos += len;
        }
        pos
    }

    /// Subidentifiers as written on the wire.
    fn subidentifiers(&self) -> impl Iterator<Item = u32> + '_ {
        // Construction guarantees both the arc count and that the sum fits.
        let first = self.arcs[0] * 40 + self.arcs[1];
        core::iter::once(first).chain(self.arcs[2..].iter().copied())
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    /// Parse dotted decimal notation, e.g. `1.2.112.0.2.0.34.101.31.81`.
    fn from_str(s: &str) -> Result<Self> {
        let arcs = s
            .split('.')
            .map(parse_arc)
            .collect::<Result<Vec<u32>>>()?;
        Self::new(&arcs)
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}

/// Encode the dotted decimal `oid` as DER content octets into `out`.
///
/// Returns the number of octets written. The output has no tag or length
/// and is not accepted by [`sign`](crate::dsa::sign) or
/// [`verify`](crate::dsa::verify); pass [`encode_der`] output there.
/// See [`ObjectIdentifier::encode`].
pub fn encode(oid: &str, out: &mut [u8]) -> Result<usize> {
    oid.parse::<ObjectIdentifier>()?.encode(out)
}

/// Number of DER content octets [`encode`] writes for `oid`.
pub fn encoded_len(oid: &str) -> Result<usize> {
    Ok(oid.parse::<ObjectIdentifier>()?.encoded_len())
}

/// Encode the dotted decimal `oid` as a complete DER `OBJECT IDENTIFIER`
/// into `out`, the form signing and verification expect.
///
/// Returns the number of octets written. See [`ObjectIdentifier::encode_der`].
pub fn encode_der(oid: &str, out: &mut [u8]) -> Result<usize> {
    oid.parse::<ObjectIdentifier>()?.encode_der(out)
}

/// Number of octets [`encode_der`] writes for `oid`.
pub fn der_len(oid: &str) -> Result<usize> {
    Ok(oid.parse::<ObjectIdentifier>()?.der_len())
}

/// Decimal arc without sign or leading zeros.
fn parse_arc(arc: &str) -> Result<u32> {
    let canonical = !arc.is_empty()
        && arc.bytes().all(|b| b.is_ascii_digit())
        && !(arc.len() > 1 && arc.starts_with('0'));
    if !canonical {
        return Err(Error::MalformedOid);
    }
    arc.parse().map_err(|_| Error::MalformedOid)
}

/// Octets taken by a definite-form DER length.
fn length_octets(len: usize) -> usize {
    if len < 0x80 {
        1
    } else {
        1 + (size_of::<usize>() - len.leading_zeros() as usize / 8)
    }
}

fn base128_len(value: u32) -> usize {
    let bits = 32 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}
