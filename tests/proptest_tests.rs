//! Property-based tests for generation and allocation.
//!
//! Run with: `cargo test --test proptest_tests`

#![cfg(feature = "core")]

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use synthbill::core::*;
use synthbill::generate::{generate_ledger, sort_ledger};
use synthbill::payments::{allocate_payments, receivables_from};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Balances in cents, from just under the minimum up to a few dozen invoices.
fn balance() -> impl Strategy<Value = Decimal> {
    (1_900_000i64..=150_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn strategy() -> impl Strategy<Value = DateStrategy> {
    prop_oneof![
        (1u32..=15).prop_map(|max_step| DateStrategy::Stepped { max_step }),
        Just(DateStrategy::WeightedPool),
    ]
}

fn sizing() -> impl Strategy<Value = Sizing> {
    prop_oneof![Just(Sizing::ValueFirst), Just(Sizing::QuantityFirst)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generation_invariants(
        seed in any::<u64>(),
        balances in prop::collection::vec(balance(), 1..6),
        date_strategy in strategy(),
        sizing in sizing(),
        first in 1u64..500,
    ) {
        let config = InvoiceConfigBuilder::new(date(2024, 4, 1), date(2025, 3, 31))
            .first_invoice_number(first)
            .date_strategy(date_strategy)
            .sizing(sizing)
            .build()
            .unwrap();
        let parties: Vec<Party> = balances
            .iter()
            .enumerate()
            .map(|(i, b)| Party::new(format!("Party {i}"), *b))
            .collect();
        let eligible: BTreeMap<String, Decimal> = parties
            .iter()
            .filter(|p| p.remaining >= MIN_INVOICE_VALUE)
            .map(|p| (p.name.clone(), p.remaining))
            .collect();

        let result = generate_ledger(&config, parties, &mut SeededRandom::from_seed(seed));
        if eligible.is_empty() {
            prop_assert!(matches!(result, Err(SynthError::NoEligibleParties)));
            return Ok(());
        }
        let ledger = result.unwrap();

        // Exhaustion and bounds.
        let mut billed: BTreeMap<String, Decimal> = BTreeMap::new();
        for inv in &ledger {
            prop_assert!(inv.value >= MIN_INVOICE_VALUE && inv.value <= MAX_INVOICE_VALUE);
            prop_assert!(inv.date >= config.start_date && inv.date <= config.end_date);
            *billed.entry(inv.party.clone()).or_default() += inv.value;
        }
        prop_assert_eq!(&billed, &eligible);

        // Gapless numbering.
        let mut seqs: Vec<u64> = ledger.iter().map(|i| i.number.sequence()).collect();
        seqs.sort_unstable();
        let expected: Vec<u64> = (first..first + ledger.len() as u64).collect();
        prop_assert_eq!(seqs, expected);

        // Dates never go backwards in issue order.
        let mut issued = ledger.clone();
        issued.sort_by_key(|i| i.number.sequence());
        for pair in issued.windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }

        // Termination bound.
        let total: Decimal = eligible.values().copied().sum();
        prop_assert!(Decimal::from(ledger.len() as u64) <= total / MIN_INVOICE_VALUE);

        // Sorting is idempotent on an already sorted ledger.
        prop_assert_eq!(sort_ledger(ledger.clone()), ledger);
    }

    #[test]
    fn allocation_respects_cap_and_conserves_amounts(
        amounts in prop::collection::vec((0usize..3, 0u64..30, 1i64..10_000_000), 1..20),
        cap_cents in 100_000i64..5_000_000,
    ) {
        let cap = Decimal::new(cap_cents, 2);
        let start = date(2024, 4, 1);
        let receivables: Vec<Receivable> = amounts
            .iter()
            .enumerate()
            .map(|(i, (party, offset, cents))| Receivable {
                party: format!("P{party}"),
                number: InvoiceNumber::new(4, i as u64 + 1).unwrap(),
                date: start + chrono::Days::new(*offset),
                amount: Decimal::new(*cents, 2),
            })
            .collect();

        let records = allocate_payments(&receivables, cap).unwrap();

        let mut per_day: HashMap<(String, NaiveDate), Decimal> = HashMap::new();
        let mut per_invoice: HashMap<u64, Decimal> = HashMap::new();
        for r in &records {
            prop_assert!(r.payment_amount > Decimal::ZERO);
            prop_assert!(r.payment_date >= r.invoice_date);
            *per_day.entry((r.party.clone(), r.payment_date)).or_default() += r.payment_amount;
            *per_invoice.entry(r.invoice_number.sequence()).or_default() += r.payment_amount;
        }
        for total in per_day.values() {
            prop_assert!(*total <= cap);
        }
        for (i, rec) in receivables.iter().enumerate() {
            prop_assert_eq!(per_invoice[&(i as u64 + 1)], rec.amount);
        }
    }

    #[test]
    fn generated_ledgers_pay_off_completely(seed in any::<u64>(), cents in 2_000_000i64..50_000_000) {
        let config = InvoiceConfigBuilder::new(date(2024, 4, 1), date(2024, 12, 31))
            .build()
            .unwrap();
        let balance = Decimal::new(cents, 2);
        let ledger = generate_ledger(
            &config,
            vec![Party::new("Only", balance)],
            &mut SeededRandom::from_seed(seed),
        )
        .unwrap();
        let records = allocate_payments(&receivables_from(&ledger), DAILY_PAYMENT_CAP).unwrap();
        let paid: Decimal = records.iter().map(|r| r.payment_amount).sum();
        prop_assert_eq!(paid, balance);
    }
}
