#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Usage
//!
//! ```
//! use ecc::{NistP256, ecdsa::SigningKey};
//! use rand_core::OsRng;
//! use sha2::Sha256;
//!
//! let signing_key = SigningKey::<NistP256>::random(&mut OsRng);
//! let signature = signing_key.sign_digest_with_rng::<Sha256>(&mut OsRng, b"hello");
//! assert!(signing_key
//!     .verifying_key()
//!     .verify_digest::<Sha256>(b"hello", &signature)
//!     .is_ok());
//! ```

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod curves;
pub mod ecdh;
pub mod ecdsa;
pub mod ed25519;
pub mod eddsa;
pub mod point_arithmetic;
pub mod scalar_mul;
pub mod x25519;

mod affine;
mod curve;
mod error;
mod lookup_table;
mod scalar;

pub use crate::{
    affine::AffinePoint,
    curve::{Curve, EdwardsCurve, WeierstrassCurve},
    curves::{Curve25519, NistP192, NistP224, NistP256, NistP384, NistP521},
    error::{Error, Result},
    scalar::Scalar,
};
pub use primemod::{self, Limb, MAX_LIMBS};
pub use rand_core;
pub use subtle;

#[cfg(feature = "getrandom")]
pub use rand_core::OsRng;
