#![no_main]

use facturas::core::{RawInvoiceA, RawInvoiceB, normalize_source_a, normalize_source_b};
use facturas::json::decode_records;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic: decode errors are fine, panics are bugs.
        if let Ok(records) = decode_records::<RawInvoiceA>(s) {
            let _ = normalize_source_a(&records);
        }
        if let Ok(records) = decode_records::<RawInvoiceB>(s) {
            let _ = normalize_source_b(&records);
        }
    }
});
