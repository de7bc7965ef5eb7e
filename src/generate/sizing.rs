//! Invoice value, rate and quantity selection.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::core::random::{round_half_up, uniform_decimal};
use crate::core::{InvoiceConfig, InvoiceError, RandomSource, Sizing};

/// Fresh rates tried before quantity-first sizing falls back to the lower bound.
const MAX_RATE_ATTEMPTS: usize = 8;

/// Range an invoice value may be drawn from, given a party's remaining balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRange {
    /// The balance fits in one invoice: bill it exactly.
    Final(Decimal),
    /// Draw in `[lo, hi]`; `hi` leaves at least the minimum invoice value.
    Draw { lo: Decimal, hi: Decimal },
}

impl ValueRange {
    /// `None` when the balance is below the minimum invoice value.
    pub fn for_balance(config: &InvoiceConfig, remaining: Decimal) -> Option<Self> {
        if remaining < config.min_invoice_value {
            None
        } else if remaining <= config.max_invoice_value {
            Some(Self::Final(remaining))
        } else {
            let hi = config
                .max_invoice_value
                .min(remaining - config.min_invoice_value);
            Some(Self::Draw {
                lo: config.min_invoice_value,
                hi,
            })
        }
    }
}

/// Value, purchase rate and quantity chosen for one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceSize {
    pub value: Decimal,
    pub rate: Decimal,
    pub quantity: u64,
}

/// Pick rate, value and quantity for an invoice within `range`.
pub fn size_invoice(
    config: &InvoiceConfig,
    rng: &mut dyn RandomSource,
    range: ValueRange,
) -> Result<InvoiceSize, InvoiceError> {
    match config.sizing {
        Sizing::ValueFirst => value_first(config, rng, range),
        Sizing::QuantityFirst => quantity_first(config, rng, range),
    }
}

/// Purchase rate in the configured range, 2 dp.
pub fn draw_rate(
    config: &InvoiceConfig,
    rng: &mut dyn RandomSource,
) -> Result<Decimal, InvoiceError> {
    let rate = uniform_decimal(rng, config.min_rate, config.max_rate, 2)?;
    if rate <= Decimal::ZERO {
        return Err(InvoiceError::NonPositiveRate(rate.to_string()));
    }
    Ok(rate)
}

/// `round(value / rate)` as whole units.
pub fn quantity_for(value: Decimal, rate: Decimal) -> Result<u64, InvoiceError> {
    if rate <= Decimal::ZERO {
        return Err(InvoiceError::NonPositiveRate(rate.to_string()));
    }
    let units = value
        .checked_div(rate)
        .ok_or_else(|| InvoiceError::Arithmetic(format!("{value} / {rate} overflowed")))?;
    round_half_up(units, 0)
        .to_u64()
        .ok_or_else(|| InvoiceError::Arithmetic(format!("quantity {units} is out of range")))
}

fn value_first(
    config: &InvoiceConfig,
    rng: &mut dyn RandomSource,
    range: ValueRange,
) -> Result<InvoiceSize, InvoiceError> {
    let rate = draw_rate(config, rng)?;
    let value = match range {
        ValueRange::Final(value) => value,
        // Whole amounts unless the range holds none; then cents.
        ValueRange::Draw { lo, hi } => match uniform_decimal(rng, lo, hi, 0) {
            Ok(value) => value,
            Err(InvoiceError::EmptyRange { .. }) => uniform_decimal(rng, lo, hi, 2)?,
            Err(e) => return Err(e),
        },
    };
    Ok(InvoiceSize {
        value,
        rate,
        quantity: quantity_for(value, rate)?,
    })
}

fn quantity_first(
    config: &InvoiceConfig,
    rng: &mut dyn RandomSource,
    range: ValueRange,
) -> Result<InvoiceSize, InvoiceError> {
    let (lo, hi) = match range {
        ValueRange::Final(_) => return value_first(config, rng, range),
        ValueRange::Draw { lo, hi } => (lo, hi),
    };

    let mut rate = draw_rate(config, rng)?;
    for attempt in 0..MAX_RATE_ATTEMPTS {
        if attempt > 0 {
            rate = draw_rate(config, rng)?;
        }
        let q_lo = (lo / rate).ceil();
        let q_hi = (hi / rate).floor();
        if q_lo > q_hi {
            continue;
        }

        let q_lo = q_lo
            .to_i64()
            .ok_or_else(|| InvoiceError::Arithmetic(format!("quantity {q_lo} is out of range")))?;
        let q_hi = q_hi
            .to_i64()
            .ok_or_else(|| InvoiceError::Arithmetic(format!("quantity {q_hi} is out of range")))?;
        let quantity = Decimal::from(rng.int_inclusive(q_lo, q_hi));

        let value = clamp_whole(nearest_hundred(quantity * rate), lo, hi);
        return Ok(InvoiceSize {
            value,
            rate,
            quantity: quantity_for(value, rate)?,
        });
    }

    // No whole quantity fits this range at any rate tried.
    Ok(InvoiceSize {
        value: lo,
        rate,
        quantity: quantity_for(lo, rate)?,
    })
}

fn nearest_hundred(value: Decimal) -> Decimal {
    round_half_up(value / dec!(100), 0) * dec!(100)
}

/// Clamp into `[ceil(lo), floor(hi)]`, or to `lo` when no whole value fits.
fn clamp_whole(value: Decimal, lo: Decimal, hi: Decimal) -> Decimal {
    let (lo_whole, hi_whole) = (lo.ceil(), hi.floor());
    if lo_whole > hi_whole {
        return lo;
    }
    value.clamp(lo_whole, hi_whole)
}
