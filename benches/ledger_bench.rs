use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use facturas::core::*;
use facturas::report;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn customer() -> Option<Many2One> {
    Some(Many2One::new(41, "FARMACIA FARMAGO, C.A."))
}

fn build_blv_records(n: usize) -> Vec<RawInvoiceA> {
    (1..=n)
        .map(|i| {
            let (name, currency) = match i % 10 {
                0 => (format!("RNCVTA-{i:05}"), DOLLAR_LABEL),
                1 => (format!("ND-{i:05}"), LOCAL_LABEL),
                k if k % 2 == 0 => (format!("INV-{i:05}"), DOLLAR_LABEL),
                _ => (format!("INV-{i:05}"), LOCAL_LABEL),
            };
            RawInvoiceA {
                name,
                invoice_date: Some(test_date()),
                invoice_number_next: Some(format!("00-{i:06}")),
                partner_id: customer(),
                currency_id: Some(Many2One::new(1, currency)),
                iva_exempt: Some(dec!(12.50)),
                amount_tax_usd: Some(Decimal::new(i as i64 * 37, 2)),
                amount_tax_bs: Some(Decimal::new(i as i64 * 1351, 2)),
                amount_total_signed: Some(Decimal::new(i as i64 * 270, 2)),
            }
        })
        .collect()
}

fn build_crlv_records(n: usize) -> Vec<RawInvoiceB> {
    (1..=n)
        .map(|i| RawInvoiceB {
            name: if i % 7 == 0 {
                format!("NC-{i:05}")
            } else {
                format!("FACT-{i:05}")
            },
            invoice_date: Some(test_date()),
            invoice_number_next: Some(format!("00-{i:06}")),
            partner_id: customer(),
            currency_id: None,
            amount_exempt: Some(dec!(0)),
            amount_untaxed_signed: Some(Decimal::new(i as i64 * 36_500, 2)),
            amount_tax_signed: Some(Decimal::new(i as i64 * 5_840, 2)),
            amount_total_signed: Some(Decimal::new(i as i64 * 42_340, 2)),
            tasa: Some(dec!(36.5)),
        })
        .collect()
}

fn build_ledger(n: usize) -> Ledger {
    merge_ledgers(
        normalize_source_a(&build_blv_records(n)),
        normalize_source_b(&build_crlv_records(n)),
    )
}

fn bench_normalize(c: &mut Criterion) {
    let blv = build_blv_records(1000);
    let crlv = build_crlv_records(1000);
    c.bench_function("normalize_blv_1000", |b| {
        b.iter(|| black_box(normalize_source_a(black_box(&blv))));
    });
    c.bench_function("normalize_crlv_1000", |b| {
        b.iter(|| black_box(normalize_source_b(black_box(&crlv))));
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let ledger = build_ledger(1000);
    c.bench_function("aggregate_2000_rows", |b| {
        b.iter(|| black_box(aggregate_totals(black_box(&ledger))));
    });
}

fn bench_exclusions(c: &mut Criterion) {
    let ledger = build_ledger(1000);
    let policy = ExclusionPolicy::from_controls(false, parse_exclusion_tokens("0001, 0421, 0999"));
    c.bench_function("exclusions_2000_rows", |b| {
        b.iter(|| black_box(ledger.apply_exclusions(black_box(&policy))));
    });
}

fn bench_csv_export(c: &mut Criterion) {
    let ledger = build_ledger(1000);
    let totals = aggregate_totals(&ledger);
    let sheet = report::build_sheet(&ledger, &totals, "Reporte");
    c.bench_function("csv_2000_rows", |b| {
        b.iter(|| black_box(report::to_csv(black_box(&sheet))));
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_aggregate,
    bench_exclusions,
    bench_csv_export,
);
criterion_main!(benches);
