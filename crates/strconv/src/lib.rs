//! [<img alt="github" src="https://img.shields.io/badge/github-udoprog/musli-8da0cb?style=for-the-badge&logo=github" height="20">](https://github.com/udoprog/musli)
//!
//! A numeric string-conversion core: correctly-rounded decimal `<->`
//! binary64 conversion, integer parsing and rendering, and base-16 / base-64
//! transforms, all built on caller-owned fixed-size buffers.
//!
//! Every routine here is a pure function: there is no global state, no
//! allocation, and nothing ever panics. The decimal-to-binary64 path follows
//! the same two-tier design as the standard library's own float parser: a
//! fast path ([`mpb`]) that resolves the overwhelming majority of inputs with
//! a single 128-bit multiply, and an exact fallback ([`hpd`]) for everything
//! it can't prove correct.
//!
//! <br>
//!
//! ## Usage
//!
//! ```toml
//! strconv-core = "0.1.0"
//! ```
//!
//! ```
//! use strconv_core::parse_f64;
//!
//! assert_eq!(parse_f64(b"3.14159").unwrap(), 3.14159);
//! assert_eq!(parse_f64(b"-1.5e10").unwrap(), -1.5e10);
//! ```
//!
//! <br>
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default. The `std` feature (on by default)
//! only adds an [`std::error::Error`] impl for [`Error`]; no routine in this
//! crate allocates, with or without it.

#![deny(missing_docs)]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod base16;
mod base64;
mod driver;
mod error;
mod hpd;
mod integer;
mod mpb;
mod tables;

pub use self::base16::{
    decode as decode_hex, decode4 as decode_hex_escape, encode as encode_hex,
    encode4 as encode_hex_escape, Case,
};
pub use self::base64::{
    decode as decode_base64, encode as encode_base64, Alphabet, DecodeOptions, EncodeOptions,
};
pub use self::error::{Error, Status, TransformOutput};
pub use self::integer::{parse_i64, parse_u64, render_i64, render_u64, RenderOptions};

/// Parse `bytes` as a binary64 float.
///
/// Accepts the usual decimal grammar (optional sign, integer and/or
/// fractional digits, optional exponent, `_` separators) as well as
/// case-insensitive `inf`, `infinity` and `nan`, each optionally signed. The
/// entire slice must be consumed; there is no partial-parse mode.
///
/// Conversion is correctly rounded: the returned value is always the
/// binary64 nearest the exact decimal value, ties resolved to even.
///
/// # Examples
///
/// ```
/// use strconv_core::parse_f64;
///
/// assert_eq!(parse_f64(b"0.1").unwrap(), 0.1);
/// assert!(parse_f64(b"nan").unwrap().is_nan());
/// assert!(parse_f64(b"").is_err());
/// ```
pub fn parse_f64(bytes: &[u8]) -> Result<f64, Error> {
    driver::parse_f64_bits(bytes).map(f64::from_bits)
}
