use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::core::random::round_half_up;
use crate::core::{AllocatorConfig, PaymentRecord, Receivable, SynthError};

/// Most days one receivable may be spread over, counted from its own date
/// at the full daily cap. Roughly ten years.
pub const MAX_PAYMENT_DAYS: u32 = 3660;

/// Greedy day-by-day payment scheduler with a per-party daily cap.
#[derive(Debug, Clone)]
pub struct PaymentAllocator {
    config: AllocatorConfig,
}

impl PaymentAllocator {
    pub fn new(config: AllocatorConfig) -> Result<Self, SynthError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn daily_cap(&self) -> Decimal {
        self.config.daily_cap
    }

    /// Split every receivable into payments of at most the daily cap per party.
    ///
    /// Parties are processed in name order and independently of each other;
    /// within a party, receivables are paid oldest first (ties keep input
    /// order). Each receivable starts paying on its own date and spills into
    /// following days once the day's capacity is used up.
    pub fn allocate(&self, receivables: &[Receivable]) -> Result<Vec<PaymentRecord>, SynthError> {
        let mut by_party: BTreeMap<&str, Vec<&Receivable>> = BTreeMap::new();
        for receivable in receivables {
            by_party
                .entry(receivable.party.as_str())
                .or_default()
                .push(receivable);
        }

        let mut records = Vec::new();
        for (party, mut bills) in by_party {
            bills.sort_by_key(|r| r.date);
            let mut paid_on: HashMap<NaiveDate, Decimal> = HashMap::new();
            for bill in bills {
                self.allocate_one(party, bill, &mut paid_on, &mut records)?;
            }
        }

        if records.is_empty() {
            return Err(SynthError::NoPayments);
        }
        info!(
            receivables = receivables.len(),
            payments = records.len(),
            "payment schedule built"
        );
        Ok(records)
    }

    fn allocate_one(
        &self,
        party: &str,
        bill: &Receivable,
        paid_on: &mut HashMap<NaiveDate, Decimal>,
        records: &mut Vec<PaymentRecord>,
    ) -> Result<(), SynthError> {
        let amount = round_half_up(bill.amount, 2);
        if amount < Decimal::ZERO {
            warn!(party, invoice = %bill.number, amount = %amount, "skipping negative invoice amount");
            return Ok(());
        }

        let cap = self.config.daily_cap;
        let ceiling = cap.checked_mul(Decimal::from(MAX_PAYMENT_DAYS));
        if ceiling.is_some_and(|ceiling| amount > ceiling) {
            return Err(SynthError::Allocation(format!(
                "{} of {amount} needs more than {MAX_PAYMENT_DAYS} days at a daily cap of {cap}",
                bill.number
            )));
        }
        let mut remaining = amount;
        let mut day = bill.date;

        while remaining > Decimal::ZERO {
            let used = paid_on.entry(day).or_insert(Decimal::ZERO);
            let payable = remaining.min(cap - *used);
            if payable > Decimal::ZERO {
                *used += payable;
                remaining -= payable;
                records.push(PaymentRecord {
                    party: party.to_string(),
                    invoice_number: bill.number,
                    invoice_date: bill.date,
                    invoice_amount: amount,
                    payment_date: day,
                    payment_amount: payable,
                });
            }
            if remaining > Decimal::ZERO {
                day = day.succ_opt().ok_or_else(|| {
                    SynthError::Config(format!(
                        "payments for {} run past the last representable date",
                        bill.number
                    ))
                })?;
            }
        }

        debug!(party, invoice = %bill.number, last_payment = %day, "invoice fully allocated");
        Ok(())
    }
}

impl Default for PaymentAllocator {
    fn default() -> Self {
        Self {
            config: AllocatorConfig::default(),
        }
    }
}
