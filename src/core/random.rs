//! Injectable random source and decimal draws.
//!
//! Every random decision in the crate goes through [`RandomSource`], so a
//! run seeded with the same value replays exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::InvoiceError;

/// Source of uniform draws consumed by the generation and allocation engines.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in `[lo, hi]`. Callers guarantee `lo <= hi`.
    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64;
}

/// [`RandomSource`] backed by a seedable [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    inner: StdRng,
}

impl SeededRandom {
    /// Deterministic source; equal seeds replay equal runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-reproducible source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.inner.r#gen::<f64>()
    }

    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        self.inner.gen_range(lo..=hi)
    }
}

/// Round half-up (away from zero) to `dp` decimal places.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Uniform decimal in `[lo, hi]` rounded half-up to `dp` places.
///
/// The rounded value is clamped to the representable bounds
/// `[ceil_dp(lo), floor_dp(hi)]`, so it never leaves the range.
pub fn uniform_decimal(
    rng: &mut dyn RandomSource,
    lo: Decimal,
    hi: Decimal,
    dp: u32,
) -> Result<Decimal, InvoiceError> {
    let lo_q = lo.round_dp_with_strategy(dp, RoundingStrategy::ToPositiveInfinity);
    let hi_q = hi.round_dp_with_strategy(dp, RoundingStrategy::ToNegativeInfinity);
    if lo > hi || lo_q > hi_q {
        return Err(InvoiceError::EmptyRange {
            lo: lo.to_string(),
            hi: hi.to_string(),
            dp,
        });
    }

    let u = Decimal::from_f64(rng.unit())
        .ok_or_else(|| InvoiceError::Arithmetic("unit draw is not representable".into()))?;
    let span = hi - lo;
    let raw = span
        .checked_mul(u)
        .and_then(|offset| lo.checked_add(offset))
        .ok_or_else(|| InvoiceError::Arithmetic(format!("overflow drawing in [{lo}, {hi}]")))?;

    Ok(round_half_up(raw, dp).clamp(lo_q, hi_q))
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn pick_index(rng: &mut dyn RandomSource, len: usize) -> usize {
    debug_assert!(len > 0, "pick_index on empty collection");
    rng.int_inclusive(0, len as i64 - 1) as usize
}
