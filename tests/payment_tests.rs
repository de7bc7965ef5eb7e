//! Integration tests for payment allocation.

#![cfg(feature = "core")]

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use synthbill::core::*;
use synthbill::generate::generate_ledger;
use synthbill::payments::{PaymentAllocator, allocate_payments, receivables_from};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn receivable(party: &str, number: &str, date: NaiveDate, amount: Decimal) -> Receivable {
    Receivable {
        party: party.into(),
        number: number.parse().unwrap(),
        date,
        amount,
    }
}

#[test]
fn large_invoice_spills_over_three_days() {
    let records =
        allocate_payments(&[receivable("A", "APR-001", date(2024, 4, 10), dec!(45000))], dec!(20000))
            .unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.payment_date).collect::<Vec<_>>(),
        vec![date(2024, 4, 10), date(2024, 4, 11), date(2024, 4, 12)]
    );
    assert_eq!(
        records.iter().map(|r| r.payment_amount).collect::<Vec<_>>(),
        vec![dec!(20000), dec!(20000), dec!(5000)]
    );
}

#[test]
fn payments_never_start_before_invoice_date() {
    let records = allocate_payments(
        &[
            receivable("A", "APR-001", date(2024, 4, 1), dec!(48000)),
            receivable("A", "APR-002", date(2024, 4, 2), dec!(30000)),
            receivable("A", "APR-003", date(2024, 4, 20), dec!(20000)),
        ],
        dec!(20000),
    )
    .unwrap();
    for r in &records {
        assert!(r.payment_date >= r.invoice_date);
    }
    // APR-003 is dated after the backlog clears and is paid on its own date.
    let last = records.last().unwrap();
    assert_eq!(last.invoice_number.to_string(), "APR-003");
    assert_eq!(last.payment_date, date(2024, 4, 20));
}

#[test]
fn generated_ledger_is_fully_paid_within_cap() {
    let config = InvoiceConfigBuilder::new(date(2024, 4, 1), date(2024, 9, 30))
        .build()
        .unwrap();
    let parties = vec![
        Party::new("Balaji Traders", dec!(300000)),
        Party::new("Kaveri Agencies", dec!(97500.40)),
    ];
    let ledger = generate_ledger(&config, parties, &mut SeededRandom::from_seed(5)).unwrap();

    let records = PaymentAllocator::default()
        .allocate(&receivables_from(&ledger))
        .unwrap();

    let mut per_invoice: HashMap<String, Decimal> = HashMap::new();
    let mut per_day: HashMap<(String, NaiveDate), Decimal> = HashMap::new();
    for r in &records {
        *per_invoice.entry(r.invoice_number.to_string()).or_default() += r.payment_amount;
        *per_day.entry((r.party.clone(), r.payment_date)).or_default() += r.payment_amount;
    }

    for inv in &ledger {
        assert_eq!(per_invoice[&inv.number.to_string()], inv.value);
    }
    assert!(per_day.values().all(|total| *total <= DAILY_PAYMENT_CAP));
}

#[test]
fn invalid_cap_is_rejected() {
    let bills = [receivable("A", "APR-001", date(2024, 4, 1), dec!(100))];
    assert!(matches!(
        allocate_payments(&bills, dec!(-1)),
        Err(SynthError::Config(_))
    ));
    assert!(matches!(
        allocate_payments(&bills, dec!(0.001)),
        Err(SynthError::Config(_))
    ));
}

#[test]
fn empty_input_yields_no_payments() {
    assert!(matches!(
        allocate_payments(&[], dec!(20000)),
        Err(SynthError::NoPayments)
    ));
}
