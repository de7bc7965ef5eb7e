use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::SynthError;

/// Default lower bound of a single invoice's value.
pub const MIN_INVOICE_VALUE: Decimal = dec!(20000);
/// Default upper bound of a single invoice's value.
pub const MAX_INVOICE_VALUE: Decimal = dec!(48000);
/// Default maximum a party may be paid on one calendar day.
pub const DAILY_PAYMENT_CAP: Decimal = dec!(20000);

/// How the sequencer advances the invoice date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateStrategy {
    /// Step forward a random `1..=max_step` days, clamped to the end date.
    Stepped { max_step: u32 },
    /// Draw from a pre-built pool of days weighted towards mid-month.
    WeightedPool,
}

impl Default for DateStrategy {
    fn default() -> Self {
        Self::Stepped { max_step: 10 }
    }
}

/// How the sequencer sizes an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sizing {
    /// Draw a whole value, back-compute the quantity.
    #[default]
    ValueFirst,
    /// Draw a quantity, round the value to the nearest hundred.
    QuantityFirst,
}

/// Run parameters for invoice generation. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceConfig {
    /// First possible invoice date.
    pub start_date: NaiveDate,
    /// Last possible invoice date.
    pub end_date: NaiveDate,
    /// First sequence value issued by the run-wide counter.
    pub first_invoice_number: u64,
    /// Product label copied onto every invoice.
    pub product: String,
    /// Lowest purchase rate per unit.
    pub min_rate: Decimal,
    /// Highest purchase rate per unit.
    pub max_rate: Decimal,
    /// Minimum margin percentage.
    pub min_margin: Decimal,
    /// Maximum margin percentage.
    pub max_margin: Decimal,
    /// Smallest value of a single invoice; smaller balances are not billed.
    pub min_invoice_value: Decimal,
    /// Largest value of a single invoice; at least twice the minimum.
    pub max_invoice_value: Decimal,
    /// How invoice dates advance through the range.
    pub date_strategy: DateStrategy,
    /// Whether the value or the quantity is drawn first.
    pub sizing: Sizing,
    /// When set, party names are normalized to carry this prefix.
    pub party_prefix: Option<String>,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap_or_default();
        Self {
            start_date: start,
            end_date: end,
            first_invoice_number: 1,
            product: "WHOLE PADDY GRAINS".into(),
            min_rate: dec!(22.00),
            max_rate: dec!(23.00),
            min_margin: dec!(2.25),
            max_margin: dec!(2.65),
            min_invoice_value: MIN_INVOICE_VALUE,
            max_invoice_value: MAX_INVOICE_VALUE,
            date_strategy: DateStrategy::default(),
            sizing: Sizing::default(),
            party_prefix: None,
        }
    }
}

impl InvoiceConfig {
    /// Check every invariant; a config that passes can drive a full run.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.start_date > self.end_date {
            return Err(SynthError::Config(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        if self.min_rate <= Decimal::ZERO {
            return Err(SynthError::Config(format!(
                "minimum rate {} must be positive",
                self.min_rate
            )));
        }
        if self.min_rate > self.max_rate {
            return Err(SynthError::Config(format!(
                "minimum rate {} exceeds maximum rate {}",
                self.min_rate, self.max_rate
            )));
        }
        if self.min_margin < Decimal::ZERO {
            return Err(SynthError::Config(format!(
                "minimum margin {} must not be negative",
                self.min_margin
            )));
        }
        if self.min_margin > self.max_margin {
            return Err(SynthError::Config(format!(
                "minimum margin {} exceeds maximum margin {}",
                self.min_margin, self.max_margin
            )));
        }
        if self.min_invoice_value <= Decimal::ZERO {
            return Err(SynthError::Config(
                "minimum invoice value must be positive".into(),
            ));
        }
        // The leftover after any non-final invoice must itself be invoiceable.
        if self.max_invoice_value < self.min_invoice_value * Decimal::TWO {
            return Err(SynthError::Config(format!(
                "maximum invoice value {} must be at least twice the minimum {}",
                self.max_invoice_value, self.min_invoice_value
            )));
        }
        if self.first_invoice_number == 0 {
            return Err(SynthError::Config(
                "first invoice number must be at least 1".into(),
            ));
        }
        if self.product.trim().is_empty() {
            return Err(SynthError::Config("product name is required".into()));
        }
        if let DateStrategy::Stepped { max_step: 0 } = self.date_strategy {
            return Err(SynthError::Config("date step must be at least 1 day".into()));
        }
        Ok(())
    }
}

/// Builder for [`InvoiceConfig`].
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use synthbill::core::InvoiceConfigBuilder;
///
/// let config = InvoiceConfigBuilder::new(
///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
/// )
/// .first_invoice_number(101)
/// .rates(dec!(22), dec!(23))
/// .margins(dec!(2.25), dec!(2.65))
/// .build()
/// .unwrap();
/// assert_eq!(config.first_invoice_number, 101);
/// ```
pub struct InvoiceConfigBuilder {
    config: InvoiceConfig,
}

impl InvoiceConfigBuilder {
    /// Create a builder for the given date range; everything else defaults.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            config: InvoiceConfig {
                start_date,
                end_date,
                ..Default::default()
            },
        }
    }

    pub fn first_invoice_number(mut self, number: u64) -> Self {
        self.config.first_invoice_number = number;
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.config.product = product.into();
        self
    }

    /// Set the purchase rate range.
    pub fn rates(mut self, min: Decimal, max: Decimal) -> Self {
        self.config.min_rate = min;
        self.config.max_rate = max;
        self
    }

    /// Set the margin percentage range.
    pub fn margins(mut self, min: Decimal, max: Decimal) -> Self {
        self.config.min_margin = min;
        self.config.max_margin = max;
        self
    }

    /// Override the per-invoice value bounds (default 20000..=48000).
    pub fn invoice_bounds(mut self, min: Decimal, max: Decimal) -> Self {
        self.config.min_invoice_value = min;
        self.config.max_invoice_value = max;
        self
    }

    pub fn date_strategy(mut self, strategy: DateStrategy) -> Self {
        self.config.date_strategy = strategy;
        self
    }

    pub fn sizing(mut self, sizing: Sizing) -> Self {
        self.config.sizing = sizing;
        self
    }

    pub fn party_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.party_prefix = Some(prefix.into());
        self
    }

    /// Build the configuration, rejecting any violated invariant.
    pub fn build(self) -> Result<InvoiceConfig, SynthError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Parameters for the payment allocator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Maximum total paid to one party on one calendar day.
    pub daily_cap: Decimal,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            daily_cap: DAILY_PAYMENT_CAP,
        }
    }
}

impl AllocatorConfig {
    pub fn new(daily_cap: Decimal) -> Result<Self, SynthError> {
        let config = Self { daily_cap };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if self.daily_cap <= Decimal::ZERO {
            return Err(SynthError::Config(format!(
                "daily cap {} must be positive",
                self.daily_cap
            )));
        }
        if self.daily_cap.round_dp(2) != self.daily_cap {
            return Err(SynthError::Config(format!(
                "daily cap {} has more than two decimal places",
                self.daily_cap
            )));
        }
        Ok(())
    }
}

/// Parameters for synthesizing a party roster from a total amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Amount to distribute across all parties.
    pub total: Decimal,
    /// Largest balance any single party may receive.
    pub party_limit: Decimal,
}

impl RosterConfig {
    pub fn new(total: Decimal, party_limit: Decimal) -> Result<Self, SynthError> {
        let config = Self { total, party_limit };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if self.total <= Decimal::ZERO || self.party_limit <= Decimal::ZERO {
            return Err(SynthError::Config(
                "total amount and party limit must be positive".into(),
            ));
        }
        if self.party_limit > self.total {
            return Err(SynthError::Config(format!(
                "party limit {} cannot be greater than total amount {}",
                self.party_limit, self.total
            )));
        }
        Ok(())
    }
}
