#![no_main]

use chrono::NaiveDate;
use facturas::core::*;
use facturas::json::JsonRecordSource;
use facturas::report::generate_report;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 31),
    ) else {
        return;
    };
    let Ok(request) = ReportRequest::new(start, end) else {
        return;
    };

    let source = JsonRecordSource::new(s);
    let empty: Vec<RawInvoiceB> = Vec::new();
    if let Ok(run) = generate_report(&source, &empty, request, &ReportConfig::default()) {
        let report = run.filtered(&ExclusionPolicy::AllDebitNotes);
        let _ = report.csv();
        let _ = report.spreadsheet_xml();
        let _ = report.mail_draft().mailto_uri();
    }
});
