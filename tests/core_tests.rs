use chrono::NaiveDate;
use facturas::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn customer() -> Many2One {
    Many2One::new(41, "FARMACIA FARMAGO, C.A.")
}

fn bolivares() -> Many2One {
    Many2One::new(171, LOCAL_LABEL)
}

fn dolares() -> Many2One {
    Many2One::new(2, DOLLAR_LABEL)
}

fn blv_invoice(name: &str) -> RawInvoiceA {
    RawInvoiceA {
        name: name.into(),
        invoice_date: Some(date(2024, 1, 15)),
        invoice_number_next: Some("00-001234".into()),
        partner_id: Some(customer()),
        currency_id: Some(bolivares()),
        ..Default::default()
    }
}

fn crlv_invoice(name: &str) -> RawInvoiceB {
    RawInvoiceB {
        name: name.into(),
        invoice_date: Some(date(2024, 1, 20)),
        invoice_number_next: Some("00-000777".into()),
        partner_id: Some(customer()),
        currency_id: Some(bolivares()),
        ..Default::default()
    }
}

// --- Source A (BLV) ---

#[test]
fn blv_local_invoice_derives_base_and_total() {
    let raw = RawInvoiceA {
        amount_tax_bs: Some(dec!(16)),
        iva_exempt: Some(dec!(0)),
        ..blv_invoice("INV-001")
    };
    let rows = normalize_source_a(&[raw]);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.entity, Entity::Blv);
    assert_eq!(row.tax_amount, dec!(16));
    assert_eq!(row.taxable_base, dec!(100));
    // exempt + base + 25% of tax
    assert_eq!(row.total_amount, dec!(104));
    assert_eq!(row.currency_label, "Bolivares");
    assert_eq!(row.customer_name, "FARMACIA FARMAGO, C.A.");
    assert_eq!(row.next_invoice_number, "00-001234");
    assert_eq!(row.issue_date, Some(date(2024, 1, 15)));
}

#[test]
fn blv_reversal_negates_and_uses_raw_total() {
    let raw = RawInvoiceA {
        amount_tax_bs: Some(dec!(8)),
        iva_exempt: Some(dec!(0)),
        amount_total_signed: Some(dec!(50)),
        ..blv_invoice("RNCVTA-002")
    };
    let row = normalize_invoice_a(&raw);
    assert_eq!(row.tax_amount, dec!(-8));
    assert_eq!(row.taxable_base, dec!(-50));
    assert_eq!(row.exempt_amount, dec!(0));
    assert_eq!(row.total_amount, dec!(-50));
}

#[test]
fn blv_reversal_marker_is_case_insensitive() {
    let raw = RawInvoiceA {
        amount_tax_bs: Some(dec!(16)),
        iva_exempt: Some(dec!(10)),
        amount_total_signed: Some(dec!(-130)),
        ..blv_invoice("blv/rncvta/0003")
    };
    let row = normalize_invoice_a(&raw);
    assert_eq!(row.exempt_amount, dec!(-10));
    assert_eq!(row.taxable_base, dec!(-100));
    assert_eq!(row.tax_amount, dec!(-16));
    assert_eq!(row.total_amount, dec!(130));
}

#[test]
fn blv_dollar_invoice_reads_usd_tax() {
    let raw = RawInvoiceA {
        currency_id: Some(dolares()),
        amount_tax_usd: Some(dec!(4)),
        amount_tax_bs: Some(dec!(146)),
        iva_exempt: Some(dec!(5)),
        ..blv_invoice("INV-004")
    };
    let row = normalize_invoice_a(&raw);
    assert_eq!(row.tax_amount, dec!(4));
    assert_eq!(row.taxable_base, dec!(25));
    assert_eq!(row.total_amount, dec!(31));
    assert_eq!(row.currency_label, "Dolares");
}

#[test]
fn blv_missing_fields_are_zero() {
    let raw = RawInvoiceA {
        name: "INV-005".into(),
        ..Default::default()
    };
    let row = normalize_invoice_a(&raw);
    assert_eq!(row.tax_amount, Decimal::ZERO);
    assert_eq!(row.total_amount, Decimal::ZERO);
    assert_eq!(row.currency_label, "");
    assert_eq!(row.customer_name, "");
    assert_eq!(row.next_invoice_number, "");
    assert_eq!(row.issue_date, None);
}

#[test]
fn blv_without_currency_uses_local_tax_field() {
    let raw = RawInvoiceA {
        currency_id: None,
        amount_tax_usd: Some(dec!(1)),
        amount_tax_bs: Some(dec!(32)),
        ..blv_invoice("INV-006")
    };
    assert_eq!(normalize_invoice_a(&raw).tax_amount, dec!(32));
}

#[test]
fn empty_inputs_give_empty_outputs() {
    assert!(normalize_source_a(&[]).is_empty());
    assert!(normalize_source_b(&[]).is_empty());
}

// --- Source B (CRLV) ---

#[test]
fn crlv_absent_rate_defaults_to_one() {
    let raw = RawInvoiceB {
        amount_untaxed_signed: Some(dec!(200)),
        amount_tax_signed: Some(dec!(32)),
        amount_exempt: Some(dec!(0)),
        tasa: None,
        ..crlv_invoice("FACT-0001")
    };
    let row = normalize_invoice_b(&raw);
    assert_eq!(row.taxable_base, dec!(200));
    assert_eq!(row.tax_amount, dec!(32));
    assert_eq!(row.total_amount, dec!(208));
    assert_eq!(row.entity, Entity::Crlv);
}

#[test]
fn crlv_zero_rate_matches_rate_one() {
    let base = RawInvoiceB {
        amount_untaxed_signed: Some(dec!(123.45)),
        amount_tax_signed: Some(dec!(19.75)),
        amount_exempt: Some(dec!(7.1)),
        ..crlv_invoice("FACT-0002")
    };
    let zero = RawInvoiceB {
        tasa: Some(dec!(0)),
        ..base.clone()
    };
    let one = RawInvoiceB {
        tasa: Some(dec!(1)),
        ..base
    };
    assert_eq!(normalize_invoice_b(&zero), normalize_invoice_b(&one));
}

#[test]
fn crlv_divides_by_rate_and_rounds() {
    let raw = RawInvoiceB {
        amount_untaxed_signed: Some(dec!(3650)),
        amount_tax_signed: Some(dec!(584)),
        amount_exempt: Some(dec!(365)),
        tasa: Some(dec!(36.5)),
        ..crlv_invoice("FACT-0003")
    };
    let row = normalize_invoice_b(&raw);
    assert_eq!(row.exempt_amount, dec!(10));
    assert_eq!(row.taxable_base, dec!(100));
    assert_eq!(row.tax_amount, dec!(16));
    assert_eq!(row.total_amount, dec!(114));
}

#[test]
fn crlv_credit_note_total_from_signed_total() {
    let raw = RawInvoiceB {
        amount_untaxed_signed: Some(dec!(-730)),
        amount_tax_signed: Some(dec!(-116.8)),
        amount_total_signed: Some(dec!(-846.8)),
        tasa: Some(dec!(36.5)),
        ..crlv_invoice("NC-0001")
    };
    let row = normalize_invoice_b(&raw);
    assert_eq!(row.taxable_base, dec!(-20));
    assert_eq!(row.tax_amount, dec!(-3.2));
    assert_eq!(row.total_amount, dec!(-23.2));
}

#[test]
fn crlv_output_currency_is_always_dollars() {
    let raw = RawInvoiceB {
        currency_id: Some(bolivares()),
        ..crlv_invoice("FACT-0004")
    };
    assert_eq!(normalize_invoice_b(&raw).currency_label, DOLLAR_LABEL);
    let no_currency = RawInvoiceB {
        currency_id: None,
        ..crlv_invoice("FACT-0005")
    };
    assert_eq!(normalize_invoice_b(&no_currency).currency_label, DOLLAR_LABEL);
}

#[test]
fn crlv_tiny_rate_gives_zero_instead_of_overflow() {
    let raw = RawInvoiceB {
        amount_untaxed_signed: Some(dec!(1000000000)),
        amount_tax_signed: Some(dec!(1000000000)),
        tasa: Some(dec!(0.0000000000000000000001)),
        ..crlv_invoice("FACT-0006")
    };
    let row = normalize_invoice_b(&raw);
    assert_eq!(row.taxable_base, Decimal::ZERO);
    assert_eq!(row.tax_amount, Decimal::ZERO);
    assert_eq!(row.total_amount, Decimal::ZERO);

    let credit = RawInvoiceB {
        name: "NC-0006".into(),
        amount_total_signed: Some(dec!(-1000000000)),
        ..raw
    };
    assert_eq!(normalize_invoice_b(&credit).total_amount, Decimal::ZERO);
}

#[test]
fn blv_huge_tax_keeps_row() {
    let raw = RawInvoiceA {
        amount_tax_bs: Some(Decimal::MAX),
        ..blv_invoice("INV-008")
    };
    let row = normalize_invoice_a(&raw);
    assert_eq!(row.tax_amount, Decimal::MAX);
    assert_eq!(row.taxable_base, Decimal::ZERO);
    assert_eq!(row.total_amount, Decimal::MAX * dec!(0.25));
}

// --- Ledger merge ---

#[test]
fn merge_puts_blv_first() {
    let a = normalize_source_a(&[blv_invoice("A-2"), blv_invoice("A-1")]);
    let b = normalize_source_b(&[crlv_invoice("B-1"), crlv_invoice("B-2")]);
    let ledger = merge_ledgers(a, b);
    let ids: Vec<_> = ledger.iter().map(|r| r.document_id.as_str()).collect();
    assert_eq!(ids, ["A-2", "A-1", "B-1", "B-2"]);
    assert_eq!(ledger.rows()[0].entity, Entity::Blv);
    assert_eq!(ledger.rows()[3].entity, Entity::Crlv);
}

#[test]
fn merge_of_empty_sources_is_empty() {
    let ledger = merge_ledgers(Vec::new(), Vec::new());
    assert!(ledger.is_empty());
    assert!(aggregate_totals(&ledger).is_empty());
}

// --- Exclusion filter ---

fn mixed_ledger() -> Ledger {
    let a = normalize_source_a(&[
        RawInvoiceA {
            amount_tax_bs: Some(dec!(16)),
            ..blv_invoice("FACT-0001")
        },
        RawInvoiceA {
            amount_tax_bs: Some(dec!(8)),
            invoice_number_next: Some("00-009001".into()),
            ..blv_invoice("ND-0001")
        },
        RawInvoiceA {
            amount_tax_bs: Some(dec!(8)),
            invoice_number_next: Some("00-009002".into()),
            ..blv_invoice("nd-0002")
        },
    ]);
    let b = normalize_source_b(&[
        RawInvoiceB {
            amount_untaxed_signed: Some(dec!(200)),
            amount_tax_signed: Some(dec!(32)),
            ..crlv_invoice("FACT-0100")
        },
        RawInvoiceB {
            amount_untaxed_signed: Some(dec!(50)),
            amount_tax_signed: Some(dec!(8)),
            invoice_number_next: Some("00-009001".into()),
            ..crlv_invoice("ND-0100")
        },
    ]);
    merge_ledgers(a, b)
}

#[test]
fn exclude_all_debit_notes() {
    let ledger = mixed_ledger();
    let filtered = ledger.apply_exclusions(&ExclusionPolicy::AllDebitNotes);
    let ids: Vec<_> = filtered.iter().map(|r| r.document_id.as_str()).collect();
    assert_eq!(ids, ["FACT-0001", "FACT-0100"]);
}

#[test]
fn exclude_all_is_idempotent() {
    let policy = ExclusionPolicy::AllDebitNotes;
    let once = mixed_ledger().apply_exclusions(&policy);
    let twice = once.apply_exclusions(&policy);
    assert_eq!(once, twice);
}

#[test]
fn flag_wins_over_tokens() {
    let policy = ExclusionPolicy::from_controls(true, parse_exclusion_tokens("nothing"));
    let filtered = mixed_ledger().apply_exclusions(&policy);
    assert_eq!(filtered.len(), 2);
}

#[test]
fn tokens_drop_matching_debit_notes_only() {
    let policy = ExclusionPolicy::from_controls(false, parse_exclusion_tokens("9001"));
    let filtered = mixed_ledger().apply_exclusions(&policy);
    let ids: Vec<_> = filtered.iter().map(|r| r.document_id.as_str()).collect();
    assert_eq!(ids, ["FACT-0001", "nd-0002", "FACT-0100"]);
}

#[test]
fn several_tokens() {
    let policy = ExclusionPolicy::from_controls(false, parse_exclusion_tokens("9001, 9002"));
    let filtered = mixed_ledger().apply_exclusions(&policy);
    assert_eq!(filtered.len(), 2);
}

#[test]
fn no_controls_keep_everything() {
    let policy = ExclusionPolicy::from_controls(false, parse_exclusion_tokens(" , "));
    assert_eq!(policy, ExclusionPolicy::Keep);
    assert_eq!(mixed_ledger().apply_exclusions(&policy), mixed_ledger());
}

// --- Aggregation ---

#[test]
fn totals_per_entity_and_currency() {
    let totals = aggregate_totals(&mixed_ledger());
    // BLV: 104 + 52 + 52
    assert_eq!(totals.get(Entity::Blv, LOCAL_LABEL), dec!(208));
    // CRLV: 208 + 52
    assert_eq!(totals.get(Entity::Crlv, DOLLAR_LABEL), dec!(260));
    assert!(!totals.contains(Entity::Blv, DOLLAR_LABEL));
    assert_eq!(totals.get(Entity::Blv, DOLLAR_LABEL), Decimal::ZERO);
    assert_eq!(totals.row_count(), 5);
    assert_eq!(totals.tax_total(), dec!(72));
}

#[test]
fn totals_after_exclusion() {
    let filtered = mixed_ledger().apply_exclusions(&ExclusionPolicy::AllDebitNotes);
    let totals = aggregate_totals(&filtered);
    assert_eq!(totals.get(Entity::Blv, LOCAL_LABEL), dec!(104));
    assert_eq!(totals.get(Entity::Crlv, DOLLAR_LABEL), dec!(208));
    assert_eq!(totals.grand_total(), dec!(312));
}

#[test]
fn aggregated_sums_are_rounded() {
    let raw = RawInvoiceA {
        amount_tax_bs: Some(dec!(0.011)),
        ..blv_invoice("INV-007")
    };
    // 0.06875 + 0.00275 per row, unrounded in the ledger
    let ledger = merge_ledgers(normalize_source_a(&[raw.clone(), raw]), Vec::new());
    assert_eq!(ledger.rows()[0].total_amount, dec!(0.0715));
    assert_eq!(aggregate_totals(&ledger).get(Entity::Blv, LOCAL_LABEL), dec!(0.14));
}

#[test]
fn totals_survive_out_of_range_sums() {
    let raw = RawInvoiceA {
        amount_tax_bs: Some(Decimal::MAX),
        ..blv_invoice("INV-009")
    };
    let ledger = merge_ledgers(normalize_source_a(&vec![raw; 4]), Vec::new());
    let totals = aggregate_totals(&ledger);
    let quarter = Decimal::MAX * dec!(0.25);
    assert!(totals.get(Entity::Blv, LOCAL_LABEL) >= quarter * dec!(3));
    assert_eq!(totals.row_count(), 4);
    assert_eq!(totals.tax_total(), Decimal::MAX);
}

// --- Config ---

#[test]
fn config_builder_and_defaults() {
    let config = ReportConfigBuilder::new("CLIENTE X")
        .report_title("Relación")
        .sheet_name("Hoja1")
        .mail_to("a@example.com")
        .mail_cc("b@example.com")
        .build();
    assert_eq!(config.customer_name, "CLIENTE X");
    assert_eq!(config.sheet_name, "Hoja1");
    assert_eq!(config.mail_cc, ["b@example.com"]);

    let defaults = ReportConfig::default();
    assert_eq!(defaults.customer_name, "FARMACIA FARMAGO, C.A.");
    assert_eq!(defaults.sheet_name, "Reporte");
}
