//! The error taxonomy shared by every routine in this crate.
//!
//! Every fallible operation here is a pure function over caller-owned
//! buffers: there is no retry, no partial progress for number parsing (it is
//! atomic), and nothing ever panics or allocates.

use core::fmt;

/// An error raised while parsing or rendering a number.
///
/// Mirrors the textual status values a C caller of this core would see, so
/// that [`fmt::Display`] output is stable and can be compared against them.
///
/// The taxonomy this crate's source distills from also names a *bad
/// receiver* kind for a nil output destination; there's no Rust counterpart
/// for it here, since every receiver in this crate's API is a `&mut [u8]`
/// slice, which is never nil, and an undersized one is already reported
/// through each routine's own return value (`Status::ShortWrite` for the
/// base-16/base-64 transforms, `0` for `render_u64`/`render_i64`) rather than
/// this enum.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input was malformed: empty, had a disallowed leading zero, more
    /// than one decimal separator, an unterminated exponent, or trailing
    /// junk.
    BadArgument,
    /// A parsed integer did not fit in the requested type.
    OutOfBounds,
}

impl Error {
    /// The stable status string a caller sees for this error.
    pub const fn message(self) -> &'static str {
        match self {
            Error::BadArgument => "#base: bad argument",
            Error::OutOfBounds => "#base: out of bounds",
        }
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The outcome of a base-16 or base-64 streaming transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The transform consumed all available input and produced output for
    /// it.
    Ok,
    /// The destination buffer filled up before all input could be consumed.
    ShortWrite,
    /// The source was not closed and ran out before a complete unit could be
    /// decoded; the caller should supply more input and retry.
    ShortRead,
    /// The source was closed but its remaining contents were structurally
    /// invalid (odd hex length, invalid character, mis-padded base-64 unit).
    BadData,
}

/// Result of a base-16 / base-64 streaming transform: how much of the
/// destination and source were consumed, and why the transform stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TransformOutput {
    /// Number of bytes written to the destination.
    pub num_dst: usize,
    /// Number of bytes consumed from the source.
    pub num_src: usize,
    /// Why the transform stopped.
    pub status: Status,
}

impl TransformOutput {
    pub(crate) const fn new(num_dst: usize, num_src: usize, status: Status) -> Self {
        Self {
            num_dst,
            num_src,
            status,
        }
    }
}
