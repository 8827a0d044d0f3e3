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

#[cfg(test)]
extern crate std;

pub mod ct;
pub mod limb;

mod invert;
mod modulus;
mod reduce;

pub use crate::{
    invert::{invert_binary, invert_redc},
    limb::{LIMB_BITS, Limb, WideLimb},
    modulus::{InvertFn, Modulus, ReduceFn, SqrtRatioFn},
    reduce::reduce_fold,
};
pub use subtle;

/// Largest limb count of any supported modulus (P-521).
pub const MAX_LIMBS: usize = 9;
