//! # synthbill
//!
//! Synthetic invoice ledgers and capped payment schedules for exercising
//! accounting and reconciliation tooling.
//!
//! A run takes a set of parties with outstanding balances and bills each one
//! down to zero with invoices of bounded value, spread over a date range and
//! numbered from a single run-wide counter. The resulting ledger can then be
//! turned into a day-by-day payment schedule that never pays one party more
//! than a fixed amount per day.
//!
//! All monetary values use [`rust_decimal::Decimal`]. Randomness comes from
//! an injected [`RandomSource`], so a fixed seed reproduces a run exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use synthbill::core::*;
//! use synthbill::generate::generate_ledger;
//! use synthbill::payments::{allocate_payments, receivables_from};
//!
//! let config = InvoiceConfigBuilder::new(
//!     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
//! )
//! .product("WHOLE PADDY GRAINS")
//! .build()
//! .unwrap();
//!
//! let parties = vec![Party::new("Sri Rama Traders", dec!(100000))];
//! let ledger = generate_ledger(&config, parties, &mut SeededRandom::from_seed(1)).unwrap();
//! assert_eq!(ledger.last().unwrap().remaining_balance, dec!(0));
//!
//! let payments = allocate_payments(&receivables_from(&ledger), DAILY_PAYMENT_CAP).unwrap();
//! let paid: rust_decimal::Decimal = payments.iter().map(|p| p.payment_amount).sum();
//! assert_eq!(paid, dec!(100000));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, configuration, generation engine, payment allocator |
//! | `csv` (default) | Balance, invoice and payment tables |
//! | `cli` | The `synthbill` command-line tool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod generate;

#[cfg(feature = "core")]
pub mod payments;

#[cfg(feature = "csv")]
pub mod tabular;

#[cfg(feature = "core")]
pub use crate::core::*;
