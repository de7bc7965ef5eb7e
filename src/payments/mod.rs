//! Payment allocation against a finished invoice ledger.
//!
//! Each party can be paid at most a fixed amount per calendar day. Invoices
//! are paid oldest first; whatever does not fit on a day carries over to the
//! next one.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use synthbill::core::Receivable;
//! use synthbill::payments::allocate_payments;
//!
//! let bills = [Receivable {
//!     party: "Durga Traders".into(),
//!     number: "APR-001".parse().unwrap(),
//!     date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
//!     amount: dec!(45000),
//! }];
//! let payments = allocate_payments(&bills, dec!(20000)).unwrap();
//! assert_eq!(payments.len(), 3);
//! assert_eq!(payments[2].payment_amount, dec!(5000));
//! ```

mod allocator;

pub use allocator::{MAX_PAYMENT_DAYS, PaymentAllocator};

use rust_decimal::Decimal;

use crate::core::{AllocatorConfig, Invoice, PaymentRecord, Receivable, SynthError};

/// Allocate payments for `receivables` under `daily_cap`.
pub fn allocate_payments(
    receivables: &[Receivable],
    daily_cap: Decimal,
) -> Result<Vec<PaymentRecord>, SynthError> {
    PaymentAllocator::new(AllocatorConfig::new(daily_cap)?)?.allocate(receivables)
}

/// Receivables for a generated ledger, one per invoice.
pub fn receivables_from(invoices: &[Invoice]) -> Vec<Receivable> {
    invoices.iter().map(Receivable::from).collect()
}
