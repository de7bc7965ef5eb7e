use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::numbering::InvoiceNumber;

/// A billable counterpart and the balance still to be invoiced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Display name, copied onto every invoice for this party.
    pub name: String,
    /// Outstanding balance not yet covered by an invoice.
    pub remaining: Decimal,
}

impl Party {
    pub fn new(name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            name: name.into(),
            remaining: balance,
        }
    }
}

/// One synthesized invoice. Never mutated after the sequencer issues it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Run-wide sequential number, e.g. `APR-001`.
    pub number: InvoiceNumber,
    /// Party the invoice is billed against.
    pub party: String,
    /// Product label for the run.
    pub product: String,
    /// Invoice date, within the configured date range.
    pub date: NaiveDate,
    /// Whole units, `round(value / purchase_rate)`.
    pub quantity: u64,
    /// Purchase rate per unit (2 dp).
    pub purchase_rate: Decimal,
    /// Sale rate per unit, `purchase_rate * (1 + margin_pct / 100)` (2 dp).
    pub sale_rate: Decimal,
    /// Margin percentage (2 dp).
    pub margin_pct: Decimal,
    /// Gross invoice value.
    pub value: Decimal,
    /// Party balance left after this invoice.
    pub remaining_balance: Decimal,
}

/// An invoice as seen by the payment allocator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receivable {
    pub party: String,
    pub number: InvoiceNumber,
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl From<&Invoice> for Receivable {
    fn from(inv: &Invoice) -> Self {
        Self {
            party: inv.party.clone(),
            number: inv.number,
            date: inv.date,
            amount: inv.value,
        }
    }
}

/// One payment slice of a receivable, on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub party: String,
    pub invoice_number: InvoiceNumber,
    pub invoice_date: NaiveDate,
    /// Full invoice amount (2 dp), repeated on every slice.
    pub invoice_amount: Decimal,
    pub payment_date: NaiveDate,
    /// Amount paid on `payment_date` (2 dp).
    pub payment_amount: Decimal,
}
