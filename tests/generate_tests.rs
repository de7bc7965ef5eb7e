//! Integration tests for ledger generation.
//!
//! Run with: `cargo test --test generate_tests`

#![cfg(feature = "core")]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use synthbill::core::*;
use synthbill::generate::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fiscal_year() -> InvoiceConfigBuilder {
    InvoiceConfigBuilder::new(date(2024, 4, 1), date(2025, 3, 31))
}

fn parties() -> Vec<Party> {
    vec![
        Party::new("Balaji Traders", dec!(450000)),
        Party::new("Kaveri Agencies", dec!(64000)),
        Party::new("Durga Rice Mill", dec!(20000)),
        Party::new("Nandi Enterprises", dec!(131457.25)),
        Party::new("Too Small", dec!(19999)),
    ]
}

fn by_party(ledger: &[Invoice]) -> BTreeMap<&str, Vec<&Invoice>> {
    let mut map: BTreeMap<&str, Vec<&Invoice>> = BTreeMap::new();
    for inv in ledger {
        map.entry(inv.party.as_str()).or_default().push(inv);
    }
    for invoices in map.values_mut() {
        invoices.sort_by_key(|i| i.number.sequence());
    }
    map
}

#[test]
fn every_eligible_balance_is_exhausted() {
    let config = fiscal_year().build().unwrap();
    let ledger = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(11)).unwrap();

    let grouped = by_party(&ledger);
    assert!(!grouped.contains_key("Too Small"));

    for input in parties().iter().filter(|p| p.remaining >= dec!(20000)) {
        let invoices = &grouped[input.name.as_str()];
        let billed: Decimal = invoices.iter().map(|i| i.value).sum();
        assert_eq!(billed, input.remaining, "party {}", input.name);
        assert_eq!(invoices.last().unwrap().remaining_balance, dec!(0));

        let mut expected = input.remaining;
        for inv in invoices {
            expected -= inv.value;
            assert_eq!(inv.remaining_balance, expected);
        }
    }
}

#[test]
fn invoice_values_stay_in_bounds() {
    let config = fiscal_year().build().unwrap();
    for seed in 0..20 {
        let ledger = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(seed)).unwrap();
        for inv in &ledger {
            assert!(
                inv.value >= MIN_INVOICE_VALUE && inv.value <= MAX_INVOICE_VALUE,
                "seed {seed}: {} has value {}",
                inv.number,
                inv.value
            );
        }
    }
}

#[test]
fn numbers_are_gapless_from_first_number() {
    let config = fiscal_year().first_invoice_number(101).build().unwrap();
    let ledger = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(3)).unwrap();

    let mut sequences: Vec<u64> = ledger.iter().map(|i| i.number.sequence()).collect();
    sequences.sort_unstable();
    let expected: Vec<u64> = (101..101 + ledger.len() as u64).collect();
    assert_eq!(sequences, expected);
}

#[test]
fn number_month_matches_invoice_date() {
    let config = fiscal_year().build().unwrap();
    let ledger = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(8)).unwrap();
    for inv in &ledger {
        assert_eq!(inv.number.month(), chrono::Datelike::month(&inv.date));
    }
}

#[test]
fn dates_stay_in_range_and_follow_issue_order() {
    for strategy in [DateStrategy::Stepped { max_step: 10 }, DateStrategy::WeightedPool] {
        let config = InvoiceConfigBuilder::new(date(2024, 4, 1), date(2024, 6, 30))
            .date_strategy(strategy)
            .build()
            .unwrap();
        let mut ledger =
            generate_ledger(&config, parties(), &mut SeededRandom::from_seed(21)).unwrap();
        ledger.sort_by_key(|i| i.number.sequence());

        for pair in ledger.windows(2) {
            assert!(pair[0].date <= pair[1].date, "{strategy:?}");
        }
        for inv in &ledger {
            assert!(inv.date >= date(2024, 4, 1) && inv.date <= date(2024, 6, 30));
        }
    }
}

#[test]
fn ledger_is_in_fiscal_order() {
    let config = fiscal_year().build().unwrap();
    let ledger = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(4)).unwrap();
    for pair in ledger.windows(2) {
        assert!(pair[0].number.fiscal_key() <= pair[1].number.fiscal_key());
    }
}

#[test]
fn fiscal_sort_of_number_strings() {
    let sorted = sort_invoice_numbers(&["APR-001", "MAR-050", "MAY-010"]).unwrap();
    let text: Vec<String> = sorted.iter().map(ToString::to_string).collect();
    assert_eq!(text, vec!["APR-001", "MAY-010", "MAR-050"]);
}

#[test]
fn same_seed_same_ledger() {
    let config = fiscal_year().build().unwrap();
    let a = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(99)).unwrap();
    let b = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(99)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rates_and_margins_follow_config() {
    let config = fiscal_year()
        .rates(dec!(30), dec!(31))
        .margins(dec!(1), dec!(2))
        .build()
        .unwrap();
    let ledger = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(6)).unwrap();
    for inv in &ledger {
        assert!(inv.purchase_rate >= dec!(30) && inv.purchase_rate <= dec!(31));
        assert!(inv.margin_pct >= dec!(1) && inv.margin_pct <= dec!(2));
        assert_eq!(inv.sale_rate, sale_rate(inv.purchase_rate, inv.margin_pct).unwrap());
        assert!(inv.sale_rate > inv.purchase_rate);
        assert_eq!(inv.quantity, quantity_for(inv.value, inv.purchase_rate).unwrap());
        assert_eq!(inv.product, "WHOLE PADDY GRAINS");
    }
}

#[test]
fn quantity_first_sizing_still_exhausts_balances() {
    let config = fiscal_year().sizing(Sizing::QuantityFirst).build().unwrap();
    let ledger = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(13)).unwrap();
    let total: Decimal = ledger.iter().map(|i| i.value).sum();
    assert_eq!(total, billable_total(&config, &parties()));
    for inv in &ledger {
        assert!(inv.value >= MIN_INVOICE_VALUE && inv.value <= MAX_INVOICE_VALUE);
    }
}

#[test]
fn single_day_range_puts_everything_on_that_day() {
    let config = InvoiceConfigBuilder::new(date(2024, 7, 15), date(2024, 7, 15))
        .build()
        .unwrap();
    let ledger = generate_ledger(&config, parties(), &mut SeededRandom::from_seed(2)).unwrap();
    assert!(ledger.iter().all(|i| i.date == date(2024, 7, 15)));
    assert!(ledger.iter().all(|i| i.number.to_string().starts_with("JUL-")));
}

#[test]
fn only_small_balances_is_an_error() {
    let config = fiscal_year().build().unwrap();
    let err = generate_ledger(
        &config,
        vec![Party::new("A", dec!(100)), Party::new("B", dec!(19999.99))],
        &mut SeededRandom::from_seed(1),
    )
    .unwrap_err();
    assert!(matches!(err, SynthError::NoEligibleParties));
}

#[test]
fn synthetic_roster_feeds_a_full_run() {
    let config = fiscal_year().build().unwrap();
    let mut rng = SeededRandom::from_seed(17);
    let roster = RosterConfig::new(dec!(1000000), dec!(150000)).unwrap();
    let parties = generate_roster(&roster, config.min_invoice_value, &mut rng).unwrap();
    let expected = billable_total(&config, &parties);

    let ledger = generate_ledger(&config, parties, &mut rng).unwrap();
    let billed: Decimal = ledger.iter().map(|i| i.value).sum();
    assert_eq!(billed, expected);
}

#[test]
fn entropy_seeded_run_completes() {
    let config = fiscal_year().build().unwrap();
    let ledger = generate_ledger(&config, parties(), &mut SeededRandom::from_entropy()).unwrap();
    let billed: Decimal = ledger.iter().map(|i| i.value).sum();
    assert_eq!(billed, billable_total(&config, &parties()));
}
