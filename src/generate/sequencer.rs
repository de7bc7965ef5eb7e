use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calendar::Calendar;
use super::sizing::{ValueRange, size_invoice};
use crate::core::random::{round_half_up, uniform_decimal};
use crate::core::{Invoice, InvoiceConfig, InvoiceError, InvoiceNumberSequence, RandomSource};

/// Mutable state shared by every party in one run: the invoice counter and
/// the date cursor.
///
/// Kept outside the sequencer so independent runs never share state.
#[derive(Debug, Clone)]
pub struct EngineContext {
    numbers: InvoiceNumberSequence,
    calendar: Calendar,
}

impl EngineContext {
    pub fn new(config: &InvoiceConfig) -> Self {
        Self {
            numbers: InvoiceNumberSequence::starting_at(config.first_invoice_number),
            calendar: Calendar::new(config),
        }
    }

    /// Sequence value the next invoice will receive.
    pub fn next_sequence(&self) -> u64 {
        self.numbers.next_raw()
    }

    /// Date of the last issued invoice, or the start date.
    pub fn last_date(&self) -> NaiveDate {
        self.calendar.cursor()
    }
}

/// Issues one invoice at a time against a party's remaining balance.
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use synthbill::core::{InvoiceConfigBuilder, SeededRandom};
/// use synthbill::generate::{EngineContext, InvoiceSequencer};
///
/// let config = InvoiceConfigBuilder::new(
///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
/// )
/// .build()
/// .unwrap();
/// let sequencer = InvoiceSequencer::new(&config);
/// let mut ctx = EngineContext::new(&config);
/// let mut rng = SeededRandom::from_seed(1);
///
/// let invoice = sequencer
///     .next_invoice(&mut ctx, &mut rng, "Balaji Traders", dec!(30000))
///     .unwrap()
///     .unwrap();
/// assert_eq!(invoice.value, dec!(30000));
/// assert_eq!(invoice.number.to_string(), "APR-001");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InvoiceSequencer<'a> {
    config: &'a InvoiceConfig,
}

impl<'a> InvoiceSequencer<'a> {
    pub fn new(config: &'a InvoiceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a InvoiceConfig {
        self.config
    }

    /// Issue the next invoice for `party`, or `None` once `remaining` is
    /// below the minimum invoice value.
    ///
    /// The counter and date cursor in `ctx` only advance when an invoice is
    /// returned.
    pub fn next_invoice(
        &self,
        ctx: &mut EngineContext,
        rng: &mut dyn RandomSource,
        party: &str,
        remaining: Decimal,
    ) -> Result<Option<Invoice>, InvoiceError> {
        let Some(range) = ValueRange::for_balance(self.config, remaining) else {
            return Ok(None);
        };

        let date = ctx.calendar.propose(rng);
        let sized = size_invoice(self.config, rng, range)?;
        let margin_pct = uniform_decimal(rng, self.config.min_margin, self.config.max_margin, 2)?;
        let sale_rate = sale_rate(sized.rate, margin_pct)?;

        ctx.calendar.commit(date);
        let number = ctx.numbers.next_number(date);

        Ok(Some(Invoice {
            number,
            party: party.to_string(),
            product: self.config.product.clone(),
            date,
            quantity: sized.quantity,
            purchase_rate: sized.rate,
            sale_rate,
            margin_pct,
            value: sized.value,
            remaining_balance: remaining - sized.value,
        }))
    }
}

/// `rate * (1 + margin_pct / 100)`, 2 dp half-up.
pub fn sale_rate(rate: Decimal, margin_pct: Decimal) -> Result<Decimal, InvoiceError> {
    let factor = Decimal::ONE + margin_pct / dec!(100);
    rate.checked_mul(factor)
        .map(|r| round_half_up(r, 2))
        .ok_or_else(|| InvoiceError::Arithmetic(format!("{rate} x {factor} overflowed")))
}
