//! Per-backend tax normalization.
//!
//! Both normalizers derive the taxable base from the tax amount at the
//! statutory rate and compute
//! `total = exempt + taxable_base + tax * TAX_SURCHARGE_SHARE`,
//! unless a marker rule overrides the row.
//!
//! Arithmetic is checked. A result outside the `Decimal` range is logged and
//! replaced by zero, like any other missing amount.

use rust_decimal::Decimal;

use super::currency::{DOLLAR_LABEL, is_dollar_label, resolve_currency_label};
use super::rules::{
    RowPolicy, SOURCE_A_RULES, SOURCE_B_RULES, STATUTORY_TAX_RATE, TAX_SURCHARGE_SHARE,
    matching_policy,
};
use super::types::{Entity, Many2One, NormalizedInvoiceRow, RawInvoiceA, RawInvoiceB};

/// Normalize BLV records. Rows keep the currency reported by the backend.
pub fn normalize_source_a(records: &[RawInvoiceA]) -> Vec<NormalizedInvoiceRow> {
    records.iter().map(normalize_invoice_a).collect()
}

/// Normalize CRLV records. All rows are reported in dollars.
pub fn normalize_source_b(records: &[RawInvoiceB]) -> Vec<NormalizedInvoiceRow> {
    records.iter().map(normalize_invoice_b).collect()
}

/// Normalize a single BLV record.
pub fn normalize_invoice_a(raw: &RawInvoiceA) -> NormalizedInvoiceRow {
    let currency = resolve_currency_label(raw.currency_id.as_ref());

    let tax_field = if is_dollar_label(currency) {
        raw.amount_tax_usd
    } else {
        raw.amount_tax_bs
    };
    let mut tax_amount = tax_field.unwrap_or_default();
    let mut taxable_base = taxable_base_from_tax(tax_amount);
    let mut exempt_amount = raw.iva_exempt.unwrap_or_default();
    let mut total_amount = derived_total(exempt_amount, taxable_base, tax_amount);

    if let Some(RowPolicy::Reversal) = matching_policy(SOURCE_A_RULES, &raw.name) {
        tracing::debug!(document = %raw.name, "reversal document, negating amounts");
        exempt_amount = -exempt_amount;
        taxable_base = -taxable_base;
        tax_amount = -tax_amount;
        total_amount = -raw.amount_total_signed.unwrap_or_default();
    }

    NormalizedInvoiceRow {
        entity: Entity::Blv,
        document_id: raw.name.clone(),
        issue_date: raw.invoice_date,
        next_invoice_number: raw.invoice_number_next.clone().unwrap_or_default(),
        customer_name: party_label(raw.partner_id.as_ref()),
        exempt_amount,
        taxable_base,
        tax_amount,
        total_amount,
        currency_label: currency.to_string(),
    }
}

/// Normalize a single CRLV record.
pub fn normalize_invoice_b(raw: &RawInvoiceB) -> NormalizedInvoiceRow {
    let reported = resolve_currency_label(raw.currency_id.as_ref());
    if !reported.is_empty() && !is_dollar_label(reported) {
        tracing::trace!(document = %raw.name, currency = %reported, "CRLV row reported in dollars");
    }

    let rate = effective_rate(raw.tasa);
    let convert = |amount: Option<Decimal>| {
        or_zero(amount.unwrap_or_default().checked_div(rate), "rate conversion")
    };
    let exempt_amount = convert(raw.amount_exempt);
    let taxable_base = convert(raw.amount_untaxed_signed);
    let tax_amount = convert(raw.amount_tax_signed);
    let mut total_amount = derived_total(exempt_amount, taxable_base, tax_amount);

    if let Some(RowPolicy::CreditNoteTotal) = matching_policy(SOURCE_B_RULES, &raw.name) {
        tracing::debug!(document = %raw.name, "credit note, total taken from signed total");
        total_amount = convert(raw.amount_total_signed);
    }

    NormalizedInvoiceRow {
        entity: Entity::Crlv,
        document_id: raw.name.clone(),
        issue_date: raw.invoice_date,
        next_invoice_number: raw.invoice_number_next.clone().unwrap_or_default(),
        customer_name: party_label(raw.partner_id.as_ref()),
        exempt_amount: exempt_amount.round_dp(2),
        taxable_base: taxable_base.round_dp(2),
        tax_amount: tax_amount.round_dp(2),
        total_amount: total_amount.round_dp(2),
        currency_label: DOLLAR_LABEL.to_string(),
    }
}

/// Taxable base implied by a tax amount at the statutory rate.
pub fn taxable_base_from_tax(tax_amount: Decimal) -> Decimal {
    or_zero(tax_amount.checked_div(STATUTORY_TAX_RATE), "taxable base")
}

/// `exempt + taxable_base + tax * TAX_SURCHARGE_SHARE`.
pub fn derived_total(exempt: Decimal, taxable_base: Decimal, tax: Decimal) -> Decimal {
    let total = tax
        .checked_mul(TAX_SURCHARGE_SHARE)
        .and_then(|surcharge| exempt.checked_add(taxable_base)?.checked_add(surcharge));
    or_zero(total, "total")
}

fn or_zero(value: Option<Decimal>, what: &'static str) -> Decimal {
    value.unwrap_or_else(|| {
        tracing::warn!(amount = what, "amount out of range treated as zero");
        Decimal::ZERO
    })
}

/// Exchange rate to divide by; zero or missing falls back to 1.
pub fn effective_rate(rate: Option<Decimal>) -> Decimal {
    match rate {
        Some(r) if !r.is_zero() => r,
        _ => {
            tracing::debug!("missing or zero exchange rate, using 1");
            Decimal::ONE
        }
    }
}

fn party_label(partner: Option<&Many2One>) -> String {
    partner.map(|p| p.label.clone()).unwrap_or_default()
}
