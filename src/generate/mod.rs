//! Invoice generation engine.
//!
//! A run bills every eligible party down to zero:
//!
//! - [`PartyScheduler`] picks a random active party each round
//! - [`InvoiceSequencer`] issues one invoice against its balance, drawing
//!   the date from a shared cursor and the number from a shared counter
//! - [`sort_ledger`] puts the result in fiscal-year order
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use synthbill::core::{InvoiceConfigBuilder, Party, SeededRandom};
//! use synthbill::generate::generate_ledger;
//!
//! let config = InvoiceConfigBuilder::new(
//!     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
//! )
//! .build()
//! .unwrap();
//! let parties = vec![
//!     Party::new("Balaji Traders", dec!(150000)),
//!     Party::new("Kaveri Agencies", dec!(64000)),
//! ];
//!
//! let ledger = generate_ledger(&config, parties, &mut SeededRandom::from_seed(7)).unwrap();
//! let billed: rust_decimal::Decimal = ledger.iter().map(|i| i.value).sum();
//! assert_eq!(billed, dec!(214000));
//! ```

mod calendar;
mod ledger;
mod roster;
mod scheduler;
mod sequencer;
mod sizing;

pub use calendar::Calendar;
pub use ledger::{sort_invoice_numbers, sort_ledger};
pub use roster::generate_roster;
pub use scheduler::{PartyScheduler, billable_total};
pub use sequencer::{EngineContext, InvoiceSequencer, sale_rate};
pub use sizing::{InvoiceSize, ValueRange, draw_rate, quantity_for, size_invoice};

use crate::core::{Invoice, InvoiceConfig, Party, RandomSource, SynthError};

/// Generate invoices for `parties` and return them in ledger order.
pub fn generate_ledger(
    config: &InvoiceConfig,
    parties: Vec<Party>,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Invoice>, SynthError> {
    let invoices = PartyScheduler::new(config).run(parties, rng)?;
    Ok(sort_ledger(invoices))
}
