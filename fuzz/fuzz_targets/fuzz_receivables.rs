#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parse, then allocate: neither step may panic.
    if let Ok(receivables) = synthbill::tabular::read_receivables(data) {
        let _ = synthbill::payments::PaymentAllocator::default().allocate(&receivables);
    }
});
