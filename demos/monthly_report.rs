//! Monthly report from captured `search_read` payloads.
//!
//! ```text
//! cargo run --example monthly_report --features all [blv.json crlv.json]
//! ```
//!
//! Without arguments a small built-in payload is used. Set `RUST_LOG=debug`
//! to see the normalization decisions.

use chrono::NaiveDate;
use facturas::core::*;
use facturas::json::JsonRecordSource;
use facturas::report::*;
use tracing_subscriber::{EnvFilter, fmt};

const BLV_PAYLOAD: &str = r#"[
  {"id": 1, "name": "INV-001", "invoice_date": "2024-01-15", "invoice_number_next": "00-001234",
   "partner_id": [41, "FARMACIA FARMAGO, C.A."], "currency_id": [171, "Bolivares"],
   "iva_exempt": false, "amount_tax_usd": 0.0, "amount_tax_bs": 16.0, "amount_total_signed": 116.0},
  {"id": 2, "name": "ND-0007", "invoice_date": "2024-01-17", "invoice_number_next": "00-009001",
   "partner_id": [41, "FARMACIA FARMAGO, C.A."], "currency_id": [171, "Bolivares"],
   "iva_exempt": false, "amount_tax_usd": 0.0, "amount_tax_bs": 8.0, "amount_total_signed": 58.0},
  {"id": 3, "name": "RNCVTA-002", "invoice_date": "2024-01-18", "invoice_number_next": false,
   "partner_id": [41, "FARMACIA FARMAGO, C.A."], "currency_id": [2, "Dolares"],
   "iva_exempt": 0, "amount_tax_usd": "8.00", "amount_tax_bs": 292.0, "amount_total_signed": 58.0}
]"#;

const CRLV_PAYLOAD: &str = r#"[
  {"id": 10, "name": "FACT-0100", "invoice_date": "2024-01-20", "invoice_number_next": "00-000777",
   "partner_id": [41, "FARMACIA FARMAGO, C.A."], "currency_id": false, "amount_exempt": 0,
   "amount_untaxed_signed": 7300.0, "amount_tax_signed": 1168.0, "amount_total_signed": 8468.0,
   "tasa": 36.5},
  {"id": 11, "name": "NC-0003", "invoice_date": "2024-01-25", "invoice_number_next": "00-000780",
   "partner_id": [41, "FARMACIA FARMAGO, C.A."], "currency_id": false, "amount_exempt": 0,
   "amount_untaxed_signed": -730.0, "amount_tax_signed": -116.8, "amount_total_signed": -846.8,
   "tasa": 36.5}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("facturas=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (source_a, source_b) = match args.as_slice() {
        [blv, crlv] => (
            JsonRecordSource::from_path(blv)?,
            JsonRecordSource::from_path(crlv)?,
        ),
        _ => (
            JsonRecordSource::new(BLV_PAYLOAD),
            JsonRecordSource::new(CRLV_PAYLOAD),
        ),
    };

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2024, 1, 31).ok_or("invalid end date")?;
    let request = ReportRequest::new(start, end)?;
    let config = ReportConfigBuilder::new("FARMACIA FARMAGO, C.A.")
        .mail_to("cobranzas@example.com")
        .build();

    // ── 1. Fetch and normalize once ───────────────────────────────────
    let run = generate_report(&source_a, &source_b, request, &config)?;
    println!("=== Ledger ({} rows) ===", run.ledger().len());
    for row in run.ledger() {
        println!(
            "{:<5} {:<12} {:>14} {:>14} {}",
            row.entity.tag(),
            row.document_id,
            format_grouped(row.tax_amount),
            format_grouped(row.total_amount),
            row.currency_label,
        );
    }

    // ── 2. Re-filter without fetching again ───────────────────────────
    for (label, policy) in [
        ("all rows", ExclusionPolicy::Keep),
        (
            "without debit note 9001",
            ExclusionPolicy::from_controls(false, parse_exclusion_tokens("9001")),
        ),
    ] {
        let report = run.filtered(&policy);
        println!("\n=== Summary, {label} ===");
        print!("{}", report.summary_text());
    }

    // ── 3. Exports ────────────────────────────────────────────────────
    let report = run.filtered(&ExclusionPolicy::AllDebitNotes);
    println!("\n=== CSV ===");
    print!("{}", report.csv());

    let path = std::env::temp_dir().join(run.filename());
    std::fs::write(&path, report.spreadsheet_xml()?)?;
    println!("\nSpreadsheet written to {}", path.display());

    println!("\n=== Mail draft ===");
    println!("{}", report.mail_draft().mailto_uri());
    Ok(())
}
