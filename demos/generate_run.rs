//! Generate a small ledger and its payment schedule, printing both as CSV.
//!
//! Run with: `cargo run --example generate_run`

use std::io;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use synthbill::core::*;
use synthbill::generate::generate_ledger;
use synthbill::payments::{PaymentAllocator, receivables_from};
use synthbill::tabular::{write_invoices, write_payments};

fn main() -> Result<(), SynthError> {
    let config = InvoiceConfigBuilder::new(
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
    )
    .first_invoice_number(1)
    .date_strategy(DateStrategy::WeightedPool)
    .party_prefix("UNR- ")
    .build()?;

    let parties = vec![
        Party::new("Balaji Traders", dec!(185000)),
        Party::new("UNR Kaveri Agencies", dec!(72500.50)),
        Party::new("Sri Rama Rice Mill", dec!(48000)),
    ];

    let ledger = generate_ledger(&config, parties, &mut SeededRandom::from_seed(2024))?;
    let payments = PaymentAllocator::default().allocate(&receivables_from(&ledger))?;

    println!("# invoices");
    write_invoices(io::stdout().lock(), &ledger)?;
    println!();
    println!("# payments");
    write_payments(io::stdout().lock(), &payments)?;
    Ok(())
}
