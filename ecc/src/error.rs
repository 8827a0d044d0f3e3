//! Error type.

use core::fmt::{self, Display};

/// Result type with the `ecc` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Elliptic curve errors.
///
/// Deliberately opaque: which check failed is never revealed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error;

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("crypto error")
    }
}

impl core::error::Error for Error {}
