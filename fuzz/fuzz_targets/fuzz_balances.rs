#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a balance file must not panic.
    if let Ok(parties) = synthbill::tabular::read_balances(data) {
        assert!(parties.iter().all(|p| p.remaining > rust_decimal::Decimal::ZERO));
    }
});
