#![no_main]

use libfuzzer_sys::fuzz_target;
use synthbill::core::InvoiceNumber;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Anything that parses must print back to a form that parses to the same number.
        if let Ok(number) = s.parse::<InvoiceNumber>() {
            let again: InvoiceNumber = number.to_string().parse().unwrap();
            assert_eq!(number, again);
        }
    }
});
