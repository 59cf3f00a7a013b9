//! Medium-precision binary (MPB): a 64-bit normalized binary significand used
//! by the fast path of decimal-to-binary64 conversion.
//!
//! An [`Mpb`] represents `mantissa * 2^(exp2 - 63)`, with `mantissa`'s top bit
//! (bit 63) set whenever the value is nonzero. This is the same convention
//! [`crate::tables::BIG_POWERS_OF_10`] and [`crate::tables::SMALL_POWERS_OF_10`]
//! are generated in, so a tabulated power of ten can be multiplied directly
//! against a normalized decimal mantissa.
//!
//! The fast path multiplies an exact (or near-exact) decimal mantissa by a
//! tabulated power of ten and tracks how many representable binary64 values
//! the result could be off by. When that error is small enough to be sure
//! which way round-to-nearest-even falls, [`Mpb::fast_path_f64`] returns the
//! answer directly; otherwise the caller must fall back to the exact (but
//! slower) decimal-shift path in [`crate::driver`].

use crate::tables;

/// `2^64 / 10^8`'s exponent stride between consecutive [`tables::BIG_POWERS_OF_10`]
/// entries.
const BIG_POWER_STRIDE: i32 = 8;
const BIG_POWER_BIAS: i32 = 348;
const BIG_POWER_MIN_INDEX: i32 = 0;
const BIG_POWER_MAX_INDEX: i32 = 86;

/// `f64`'s stored significand width, not counting the implicit leading bit.
const MANTISSA_BITS: u32 = 52;
const EXPONENT_BIAS: i32 = 1023;

/// Margin of safety, in ULPs of the final 64-bit product, beyond the error
/// actually proven in the module docs' derivation. Keeping this a little
/// larger than the proven bound costs a few extra slow-path fallbacks on
/// truly borderline inputs, never correctness.
const ERROR_MARGIN_ULPS: u64 = 4;

/// A normalized 64-bit binary significand: `mantissa * 2^(exp2 - 63)`.
#[derive(Clone, Copy)]
pub(crate) struct Mpb {
    pub(crate) mantissa: u64,
    pub(crate) exp2: i32,
}

/// Looks up a `(mantissa, exp2, exact)` approximation of `10^exp`, valid for
/// `exp` in roughly `-348..=347`, by combining the stride-8
/// [`tables::BIG_POWERS_OF_10`] table with the exact
/// [`tables::SMALL_POWERS_OF_10`] remainder table. Returns `None` if `exp` is
/// outside the tabulated range.
fn pow10(exp: i32) -> Option<Mpb> {
    let biased = exp + BIG_POWER_BIAS;
    let index = biased.div_euclid(BIG_POWER_STRIDE);
    let remainder = biased.rem_euclid(BIG_POWER_STRIDE);

    if !(BIG_POWER_MIN_INDEX..=BIG_POWER_MAX_INDEX).contains(&index) {
        return None;
    }

    let (big_mantissa, big_exp2) = tables::BIG_POWERS_OF_10[index as usize];

    if remainder == 0 {
        return Some(Mpb {
            mantissa: big_mantissa,
            exp2: big_exp2,
        });
    }

    let (small_mantissa, small_exp2) = tables::SMALL_POWERS_OF_10[remainder as usize];
    let product = (big_mantissa as u128) * (small_mantissa as u128);
    let (mantissa, shift) = renormalize_u128(product);

    Some(Mpb {
        mantissa,
        exp2: big_exp2 + small_exp2 - 63 + shift,
    })
}

/// Shift a 128-bit product (known to be in `[2^126, 2^128)`, the product of
/// two normalized 64-bit values) down into a normalized `u64`, returning the
/// mantissa and how far it was shifted right.
fn renormalize_u128(product: u128) -> (u64, i32) {
    let top_bit = 127 - product.leading_zeros() as i32;
    let shift = top_bit - 63;
    ((product >> shift) as u64, shift)
}

/// Largest decimal exponent for which [`exact_fast_path`] can still keep the
/// intermediate product under `1e15` after pre-multiplying by at most
/// `10^15`, per the derivation in the module docs: `22` (exact powers) plus
/// `15` more digits of headroom in an `f64`'s 52-bit mantissa.
const EXACT_PATH_MAX_EXP10: i32 = 22 + 15;

/// The exact-arithmetic fast path: when `man10` fits in an `f64`'s mantissa
/// (53 bits, so below `2^53`) and `exp10` is small enough that every
/// intermediate product stays exactly representable, a plain `f64`
/// multiply/divide against [`tables::F64_POWERS_OF_10`] is both exact and
/// far cheaper than the 128-bit-multiply path below.
fn exact_fast_path(man10: u64, exp10: i32) -> Option<u64> {
    // "Top 12 bits clear": man10 < 2^52, so it fits losslessly in an f64's
    // 53-bit significand with room to spare for the multiply/divide below.
    if man10 >> MANTISSA_BITS != 0 {
        return None;
    }

    let mut value = man10 as f64;

    if exp10 == 0 {
        return Some(value.to_bits());
    }

    if exp10 > 0 {
        if exp10 > EXACT_PATH_MAX_EXP10 {
            return None;
        }

        let mut e = exp10;
        if e > 22 {
            value *= tables::F64_POWERS_OF_10[(e - 22) as usize];
            e = 22;
            if !(-1e15..=1e15).contains(&value) {
                return None;
            }
        }

        return Some((value * tables::F64_POWERS_OF_10[e as usize]).to_bits());
    }

    if exp10 >= -22 {
        return Some((value / tables::F64_POWERS_OF_10[(-exp10) as usize]).to_bits());
    }

    None
}

impl Mpb {
    /// Attempt the fast path: given an exact decimal mantissa `man10` (at
    /// most 19 significant digits, so it fits losslessly in a `u64`) and a
    /// decimal exponent `exp10` such that the true value is
    /// `man10 * 10^exp10`, compute the binary64 this rounds to.
    ///
    /// Tries the exact `f64`-arithmetic path first ([`exact_fast_path`]),
    /// falling back to the Eisel-Lemire-style 128-bit multiply against the
    /// tabulated powers of ten. Returns `None` when the tabulated power of
    /// ten is out of range, or when the accumulated error is too large to
    /// resolve the round-to-nearest-even decision unambiguously; the caller
    /// should fall back to the exact decimal-shift path.
    pub(crate) fn fast_path_f64(man10: u64, exp10: i32) -> Option<(u64, bool)> {
        debug_assert_ne!(man10, 0);

        if let Some(bits) = exact_fast_path(man10, exp10) {
            return Some((bits, true));
        }

        let pow_exact = (0..tables::SMALL_POWERS_OF_10.len() as i32).contains(&exp10);
        let pow = if pow_exact {
            tables::SMALL_POWERS_OF_10
                .get(exp10 as usize)
                .map(|&(mantissa, exp2)| Mpb { mantissa, exp2 })?
        } else {
            pow10(exp10)?
        };

        let lz = man10.leading_zeros();
        let w = man10 << lz;

        let product = (w as u128) * (pow.mantissa as u128);
        let (mantissa64, shift) = renormalize_u128(product);
        let exp2_final = pow.exp2 - lz as i32 + shift;

        let error_ulps = if pow_exact { 1 } else { 1 + ERROR_MARGIN_ULPS };

        let round_bits = 64 - (MANTISSA_BITS + 1);
        let low_mask = (1u64 << round_bits) - 1;
        let halfway = 1u64 << (round_bits - 1);
        let low_bits = mantissa64 & low_mask;

        let near_zero = low_bits < error_ulps;
        let near_halfway = low_bits.abs_diff(halfway) < error_ulps;
        let near_top = low_bits > low_mask - error_ulps;

        if near_zero || near_halfway || near_top {
            return None;
        }

        let mut sig = mantissa64 >> round_bits;
        if low_bits > halfway {
            sig += 1;
        }

        let mut biased_exp = exp2_final + EXPONENT_BIAS;

        if sig == (1u64 << (MANTISSA_BITS + 1)) {
            sig >>= 1;
            biased_exp += 1;
        }

        if !(1..=(2i32.pow(11) - 2)).contains(&biased_exp) {
            return None;
        }

        let fraction = sig & ((1u64 << MANTISSA_BITS) - 1);
        let bits = ((biased_exp as u64) << MANTISSA_BITS) | fraction;
        Some((bits, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow10_of_zero_is_one() {
        let mpb = pow10(0).unwrap();
        assert_eq!(mpb.mantissa, 1u64 << 63);
        assert_eq!(mpb.exp2, 0);
    }

    #[test]
    fn pow10_combines_stride_and_remainder() {
        // 10^20 = 10^16 * 10^4, both of which land in different big-power
        // buckets; the combined value should still be normalized.
        let mpb = pow10(20).unwrap();
        assert_ne!(mpb.mantissa & (1 << 63), 0);
    }

    #[test]
    fn fast_path_resolves_simple_values() {
        let (bits, _) = Mpb::fast_path_f64(1, 0).unwrap();
        assert_eq!(f64::from_bits(bits), 1.0);

        let (bits, _) = Mpb::fast_path_f64(15, -1).unwrap();
        assert_eq!(f64::from_bits(bits), 1.5);

        let (bits, _) = Mpb::fast_path_f64(314159, -5).unwrap();
        assert_eq!(f64::from_bits(bits), 3.14159);
    }

    #[test]
    fn fast_path_handles_negative_exponents_precisely() {
        let (bits, _) = Mpb::fast_path_f64(1, -1).unwrap();
        assert_eq!(f64::from_bits(bits), 0.1);
    }

    #[test]
    fn exact_fast_path_covers_small_exact_values() {
        assert_eq!(f64::from_bits(exact_fast_path(5, 0).unwrap()), 5.0);
        assert_eq!(f64::from_bits(exact_fast_path(1, 22).unwrap()), 1e22);
        assert_eq!(f64::from_bits(exact_fast_path(1, -22).unwrap()), 1e-22);
        assert_eq!(
            f64::from_bits(exact_fast_path(123456789012345, 5).unwrap()),
            123456789012345e5
        );
    }

    #[test]
    fn exact_fast_path_declines_out_of_range_inputs() {
        assert!(exact_fast_path(1u64 << 53, 0).is_none());
        assert!(exact_fast_path(1, 400).is_none());
        assert!(exact_fast_path(1, -23).is_none());
    }
}
