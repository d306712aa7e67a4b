#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod arithmetic;
pub mod dsa;
#[cfg(feature = "ecdh")]
pub mod ecdh;
pub mod encoding;
pub mod hash;
pub mod oid;
pub mod params;

mod error;
mod public_key;
mod secret_key;

pub use crate::{
    arithmetic::{AffinePoint, CurveGroup, ProjectivePoint},
    error::{Error, Result},
    hash::{BeltHashBinding, DigestBinding, HashBinding},
    oid::ObjectIdentifier,
    params::{CurveParams, Level, ParamSet},
    public_key::PublicKey,
    secret_key::SecretKey,
};

pub use belt_hash;
pub use rand_core;
