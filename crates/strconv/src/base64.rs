//! Streaming base-64 encode/decode, standard or URL-safe alphabet, with
//! padding behavior selectable on both sides.
//!
//! As with [`crate::base16`], both directions are incremental: `closed`
//! tells the routine whether `src` might grow on a later call, which governs
//! whether a trailing partial group is encoded/decoded now or left for the
//! caller to retry with more data.

use crate::error::{Status, TransformOutput};
use crate::tables;

/// Which base-64 alphabet to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// `+`, `/`, `=` padding.
    Standard,
    /// `-`, `_`, URL and filename safe.
    Url,
}

/// Options controlling [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Which alphabet to emit characters from.
    pub alphabet: Alphabet,
    /// Whether a trailing partial group is padded out to four characters
    /// with `=`.
    pub emit_padding: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::Standard,
            emit_padding: true,
        }
    }
}

/// Options controlling [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Which alphabet to interpret characters against.
    pub alphabet: Alphabet,
    /// Whether `=` padding characters are accepted. When `false`, any `=` in
    /// the input is [`Status::BadData`].
    pub allow_padding: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::Standard,
            allow_padding: true,
        }
    }
}

fn encode_table(alphabet: Alphabet) -> &'static [u8; 64] {
    match alphabet {
        Alphabet::Standard => &tables::BASE_64_ENCODE_STD,
        Alphabet::Url => &tables::BASE_64_ENCODE_URL,
    }
}

fn decode_table(alphabet: Alphabet) -> &'static [u8; 256] {
    match alphabet {
        Alphabet::Standard => &tables::BASE_64_DECODE_STD,
        Alphabet::Url => &tables::BASE_64_DECODE_URL,
    }
}

fn encode_indices(b0: u8, b1: u8, b2: u8) -> [u8; 4] {
    [
        b0 >> 2,
        ((b0 & 0x03) << 4) | (b1 >> 4),
        ((b1 & 0x0F) << 2) | (b2 >> 6),
        b2 & 0x3F,
    ]
}

/// Encode `src` into `dst`. With `closed == false`, a trailing group of
/// fewer than three source bytes is left unconsumed so the caller can retry
/// once more input arrives; with `closed == true` it is encoded as a final
/// (possibly padded) partial group.
pub fn encode(dst: &mut [u8], src: &[u8], closed: bool, opts: EncodeOptions) -> TransformOutput {
    let alphabet = encode_table(opts.alphabet);
    let mut num_src = 0;
    let mut num_dst = 0;

    while src.len() - num_src >= 3 {
        if dst.len() - num_dst < 4 {
            return TransformOutput::new(num_dst, num_src, Status::ShortWrite);
        }
        let idx = encode_indices(src[num_src], src[num_src + 1], src[num_src + 2]);
        for (i, &v) in idx.iter().enumerate() {
            dst[num_dst + i] = alphabet[v as usize];
        }
        num_dst += 4;
        num_src += 3;
    }

    let remainder = src.len() - num_src;
    if remainder == 0 || !closed {
        return TransformOutput::new(num_dst, num_src, Status::Ok);
    }

    let b0 = src[num_src];
    let b1 = if remainder == 2 { src[num_src + 1] } else { 0 };
    let idx = encode_indices(b0, b1, 0);
    let chars_needed = if remainder == 1 { 2 } else { 3 };
    let total_needed = if opts.emit_padding { 4 } else { chars_needed };

    if dst.len() - num_dst < total_needed {
        return TransformOutput::new(num_dst, num_src, Status::ShortWrite);
    }

    for i in 0..chars_needed {
        dst[num_dst + i] = alphabet[idx[i] as usize];
    }
    let mut written = chars_needed;
    if opts.emit_padding {
        for slot in dst[num_dst + chars_needed..num_dst + 4].iter_mut() {
            *slot = b'=';
        }
        written = 4;
    }

    num_dst += written;
    num_src += remainder;
    TransformOutput::new(num_dst, num_src, Status::Ok)
}

/// Decode `src` from `dst`. With `closed == false`, fewer than four
/// remaining source bytes are left unconsumed (they might be the prefix of
/// another full group); with `closed == true`, a final unpadded group of two
/// or three characters is accepted (but a single leftover character never
/// is).
pub fn decode(dst: &mut [u8], src: &[u8], closed: bool, opts: DecodeOptions) -> TransformOutput {
    let table = decode_table(opts.alphabet);
    let mut num_src = 0;
    let mut num_dst = 0;

    loop {
        let remaining = src.len() - num_src;

        if remaining == 0 {
            return TransformOutput::new(num_dst, num_src, Status::Ok);
        }

        if remaining < 4 {
            if !closed {
                return TransformOutput::new(num_dst, num_src, Status::Ok);
            }
            return decode_final_group(dst, &mut num_dst, src, &mut num_src, table);
        }

        let chunk = &src[num_src..num_src + 4];
        let pad_count = chunk.iter().rev().take_while(|&&b| b == b'=').count();

        if pad_count > 0 && !opts.allow_padding {
            return TransformOutput::new(num_dst, num_src, Status::BadData);
        }
        if pad_count > 2 {
            return TransformOutput::new(num_dst, num_src, Status::BadData);
        }

        let significant = 4 - pad_count;
        let mut idx = [0u8; 4];
        for (i, slot) in idx.iter_mut().enumerate().take(significant) {
            let v = table[chunk[i] as usize];
            if v & 0x80 != 0 {
                return TransformOutput::new(num_dst, num_src, Status::BadData);
            }
            *slot = v;
        }

        let out_bytes = 3 - pad_count;
        if dst.len() - num_dst < out_bytes {
            return TransformOutput::new(num_dst, num_src, Status::ShortWrite);
        }

        let bytes = [
            (idx[0] << 2) | (idx[1] >> 4),
            (idx[1] << 4) | (idx[2] >> 2),
            (idx[2] << 6) | idx[3],
        ];
        dst[num_dst..num_dst + out_bytes].copy_from_slice(&bytes[..out_bytes]);
        num_dst += out_bytes;
        num_src += 4;

        if pad_count > 0 {
            if num_src != src.len() {
                return TransformOutput::new(num_dst, num_src, Status::BadData);
            }
            return TransformOutput::new(num_dst, num_src, Status::Ok);
        }
    }
}

fn decode_final_group(
    dst: &mut [u8],
    num_dst: &mut usize,
    src: &[u8],
    num_src: &mut usize,
    table: &[u8; 256],
) -> TransformOutput {
    let remaining = src.len() - *num_src;

    if remaining == 1 {
        return TransformOutput::new(*num_dst, *num_src, Status::BadData);
    }

    let chunk = &src[*num_src..];
    let mut idx = [0u8; 3];
    for (i, slot) in idx.iter_mut().enumerate().take(remaining) {
        let v = table[chunk[i] as usize];
        if v & 0x80 != 0 {
            return TransformOutput::new(*num_dst, *num_src, Status::BadData);
        }
        *slot = v;
    }

    let out_bytes = remaining - 1;
    if dst.len() - *num_dst < out_bytes {
        return TransformOutput::new(*num_dst, *num_src, Status::ShortWrite);
    }

    let bytes = [(idx[0] << 2) | (idx[1] >> 4), (idx[1] << 4) | (idx[2] >> 2)];
    dst[*num_dst..*num_dst + out_bytes].copy_from_slice(&bytes[..out_bytes]);
    *num_dst += out_bytes;
    *num_src += remaining;
    TransformOutput::new(*num_dst, *num_src, Status::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_padding() {
        let mut dst = [0u8; 8];
        let out = encode(&mut dst, b"Man", true, EncodeOptions::default());
        assert_eq!(&dst[..out.num_dst], b"TWFu");

        let out = encode(&mut dst, b"Ma", true, EncodeOptions::default());
        assert_eq!(&dst[..out.num_dst], b"TWE=");

        let out = encode(&mut dst, b"M", true, EncodeOptions::default());
        assert_eq!(&dst[..out.num_dst], b"TQ==");
    }

    #[test]
    fn encodes_without_padding_in_url_alphabet() {
        let mut dst = [0u8; 8];
        let opts = EncodeOptions {
            alphabet: Alphabet::Url,
            emit_padding: false,
        };
        let out = encode(&mut dst, b"Ma", true, opts);
        assert_eq!(&dst[..out.num_dst], b"TWE");
    }

    #[test]
    fn encode_leaves_partial_group_unconsumed_when_open() {
        let mut dst = [0u8; 8];
        let out = encode(&mut dst, b"Ma", false, EncodeOptions::default());
        assert_eq!(out.status, Status::Ok);
        assert_eq!(out.num_src, 0);
        assert_eq!(out.num_dst, 0);
    }

    #[test]
    fn decodes_padded_input() {
        let mut dst = [0u8; 8];
        let out = decode(&mut dst, b"TWFu", true, DecodeOptions::default());
        assert_eq!(&dst[..out.num_dst], b"Man");

        let out = decode(&mut dst, b"TWE=", true, DecodeOptions::default());
        assert_eq!(&dst[..out.num_dst], b"Ma");

        let out = decode(&mut dst, b"TQ==", true, DecodeOptions::default());
        assert_eq!(&dst[..out.num_dst], b"M");
    }

    #[test]
    fn decodes_unpadded_final_group_when_closed() {
        let mut dst = [0u8; 8];
        let opts = DecodeOptions {
            alphabet: Alphabet::Standard,
            allow_padding: false,
        };
        let out = decode(&mut dst, b"TWE", true, opts);
        assert_eq!(out.status, Status::Ok);
        assert_eq!(&dst[..out.num_dst], b"Ma");
    }

    #[test]
    fn decode_rejects_padding_when_disallowed() {
        let mut dst = [0u8; 8];
        let opts = DecodeOptions {
            alphabet: Alphabet::Standard,
            allow_padding: false,
        };
        let out = decode(&mut dst, b"TWE=", true, opts);
        assert_eq!(out.status, Status::BadData);
    }

    #[test]
    fn decode_reports_short_read_on_lone_trailing_char() {
        let mut dst = [0u8; 8];
        let out = decode(&mut dst, b"TWFuT", true, DecodeOptions::default());
        assert_eq!(out.status, Status::BadData);

        let out = decode(&mut dst, b"TWFuT", false, DecodeOptions::default());
        assert_eq!(out.status, Status::Ok);
        assert_eq!(out.num_src, 4);
    }

    #[test]
    fn round_trips_arbitrary_bytes() {
        let input: [u8; 7] = [0, 1, 2, 250, 251, 252, 255];
        let mut encoded = [0u8; 16];
        let e = encode(&mut encoded, &input, true, EncodeOptions::default());

        let mut decoded = [0u8; 7];
        let d = decode(&mut decoded, &encoded[..e.num_dst], true, DecodeOptions::default());
        assert_eq!(&decoded[..d.num_dst], &input[..]);
    }
}
