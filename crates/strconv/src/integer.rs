//! Integer parsing and rendering: decimal, hexadecimal (`0x`/`0X`) and an
//! explicit-decimal marker (`0d`/`0D`), each tolerant of `_` digit
//! separators, rendered back with [`tables::FIRST_HUNDRED`] two digits at a
//! time.

use crate::error::Error;
use crate::tables;

const MAX_U64_DIGITS: usize = 21;

/// Options controlling [`render_u64`] and [`render_i64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Prepend `+` to non-negative values (negative values always get `-`).
    pub leading_plus: bool,
    /// Place the rendered digits against the end of `dst` rather than the
    /// start. The bytes of `dst` before the written region are left
    /// untouched; the caller recovers the written slice as
    /// `&dst[dst.len() - n..]`.
    pub align_right: bool,
}

/// Parse an unsigned 64-bit integer from `bytes`.
///
/// Accepts leading `_` padding, an optional `0x`/`0X` hex prefix or `0d`/`0D`
/// explicit-decimal prefix, and ignores `_` separators anywhere between
/// digits (including directly after a prefix). The entire slice must be
/// consumed.
pub fn parse_u64(bytes: &[u8]) -> Result<u64, Error> {
    let (body, base, had_prefix) = strip_base_prefix(bytes);
    parse_digits_u64(body, base, had_prefix)
}

/// As [`parse_u64`], but accepts a leading `+` or `-` and returns a signed
/// result, rejecting magnitudes that overflow [`i64`].
pub fn parse_i64(bytes: &[u8]) -> Result<i64, Error> {
    let (negative, rest) = match bytes.first() {
        Some(b'+') => (false, &bytes[1..]),
        Some(b'-') => (true, &bytes[1..]),
        _ => (false, bytes),
    };

    let (body, base, had_prefix) = strip_base_prefix(rest);
    let magnitude = parse_digits_u64(body, base, had_prefix)?;

    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(Error::OutOfBounds);
        }
        Ok(magnitude.wrapping_neg() as i64)
    } else {
        if magnitude > i64::MAX as u64 {
            return Err(Error::OutOfBounds);
        }
        Ok(magnitude as i64)
    }
}

enum Base {
    Decimal,
    Hex,
}

/// Strips a leading `_` run (padding allowed ahead of the prefix itself),
/// then an optional `0x`/`0X`/`0d`/`0D` prefix. The returned `bool` records
/// whether a prefix was actually found: an underscore immediately following a
/// real prefix, before any digit, is padding too (`"0x_FF"`, `"0D_1_002"`),
/// whereas a bare body's leading underscore (no prefix) is not.
fn strip_base_prefix(bytes: &[u8]) -> (&[u8], Base, bool) {
    let mut i = 0;
    while i < bytes.len() && bytes[i] == b'_' {
        i += 1;
    }

    match &bytes[i..] {
        [b'0', b'x' | b'X', rest @ ..] => (rest, Base::Hex, true),
        [b'0', b'd' | b'D', rest @ ..] => (rest, Base::Decimal, true),
        _ => (bytes, Base::Decimal, false),
    }
}

/// Decimal bodies (both the bare top-level form and the body following a
/// `0d`/`0D` marker) reject a leading zero followed by another digit, so
/// `"00"` and `"0d00"` are both malformed; hex bodies have no such
/// restriction.
///
/// `had_prefix` allows a leading `_` in `bytes` (padding between a real
/// `0x`/`0d` marker and the first digit); without a prefix, a leading `_` is
/// malformed rather than padding.
fn parse_digits_u64(bytes: &[u8], base: Base, had_prefix: bool) -> Result<u64, Error> {
    let radix: u64 = match base {
        Base::Decimal => 10,
        Base::Hex => 16,
    };
    let max_value = u64::MAX;

    let table = match base {
        Base::Decimal => &tables::DECIMAL_DIGITS,
        Base::Hex => &tables::HEXADECIMAL_DIGITS,
    };

    let max10 = max_value / radix;
    let max1 = (max_value % radix) as u8;

    let mut value: u64 = 0;
    let mut seen_digit = false;
    let mut zero_lock = false;

    for &b in bytes {
        if b == b'_' {
            if !seen_digit && !had_prefix {
                return Err(Error::BadArgument);
            }
            continue;
        }

        let entry = table[b as usize];
        if entry & 0x80 == 0 {
            return Err(Error::BadArgument);
        }
        let digit = entry & 0x7F;

        if zero_lock {
            return Err(Error::BadArgument);
        }

        if !seen_digit {
            seen_digit = true;
            if matches!(base, Base::Decimal) && digit == 0 {
                zero_lock = true;
            }
        }

        if value > max10 || (value == max10 && digit > max1) {
            return Err(Error::OutOfBounds);
        }

        value = value * radix + digit as u64;
    }

    if !seen_digit {
        return Err(Error::BadArgument);
    }

    Ok(value)
}

fn place(dst: &mut [u8], digits: &[u8], opts: RenderOptions) -> usize {
    if dst.len() < digits.len() {
        return 0;
    }

    if opts.align_right {
        let start = dst.len() - digits.len();
        dst[start..].copy_from_slice(digits);
    } else {
        dst[..digits.len()].copy_from_slice(digits);
    }

    digits.len()
}

/// Render `value` as decimal digits into `dst`, returning the number of
/// bytes written, or `0` if `dst` is too small to hold them.
///
/// Writes two digits at a time from [`tables::FIRST_HUNDRED`] until fewer
/// than two remain.
pub fn render_u64(value: u64, dst: &mut [u8], opts: RenderOptions) -> usize {
    let mut buf = [0u8; MAX_U64_DIGITS];
    let mut n = buf.len();
    let mut v = value;

    if v == 0 {
        n -= 1;
        buf[n] = b'0';
    } else {
        while v >= 100 {
            let pair = (v % 100) as usize;
            v /= 100;
            n -= 2;
            buf[n] = tables::FIRST_HUNDRED[pair * 2];
            buf[n + 1] = tables::FIRST_HUNDRED[pair * 2 + 1];
        }
        if v >= 10 {
            let pair = v as usize;
            n -= 2;
            buf[n] = tables::FIRST_HUNDRED[pair * 2];
            buf[n + 1] = tables::FIRST_HUNDRED[pair * 2 + 1];
        } else {
            n -= 1;
            buf[n] = b'0' + v as u8;
        }
    }

    if opts.leading_plus {
        n -= 1;
        buf[n] = b'+';
    }

    place(dst, &buf[n..], opts)
}

/// As [`render_u64`], but renders a leading `-` for negative values
/// (overriding `leading_plus`, which only applies when `value >= 0`).
pub fn render_i64(value: i64, dst: &mut [u8], opts: RenderOptions) -> usize {
    if value >= 0 {
        return render_u64(value as u64, dst, opts);
    }

    let mut buf = [0u8; MAX_U64_DIGITS];
    let magnitude = (value as i128).unsigned_abs() as u64;
    let written = render_u64(
        magnitude,
        &mut buf,
        RenderOptions {
            leading_plus: false,
            align_right: false,
        },
    );

    // `render_u64` never fails against a full-size scratch buffer.
    debug_assert!(written > 0);
    let mut digits = [0u8; MAX_U64_DIGITS];
    digits[0] = b'-';
    digits[1..1 + written].copy_from_slice(&buf[..written]);

    place(dst, &digits[..1 + written], opts)
}
