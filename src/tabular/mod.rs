//! CSV input and output in the canonical ledger schema.
//!
//! | File | Direction | Shape |
//! |------|-----------|-------|
//! | balances | read | headerless `name,balance` lines |
//! | invoices | write | `Invoice Date`, `Invoice No`, `Party Name`, ... |
//! | invoices | read | same header; only the four receivable columns are used |
//! | payments | write | `Party Name`, `Invoice No`, ..., `Payment Amount` |
//!
//! Dates are `dd-mm-yyyy`; money is written with two decimal places.

mod balances;
mod invoices;
mod payments;

pub use balances::read_balances;
pub use invoices::{read_receivables, write_invoices};
pub use payments::write_payments;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::random::round_half_up;

/// Date format used in every table.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Money with exactly two decimal places, e.g. `20000.00`.
pub(crate) fn format_money(value: Decimal) -> String {
    let mut value = round_half_up(value, 2);
    value.rescale(2);
    value.to_string()
}
