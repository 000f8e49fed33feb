//! Document-type rules keyed on markers in the document identifier.
//!
//! Each backend has a small table of `marker → policy` entries. A marker
//! matches when it occurs anywhere in the document id, ignoring case; the
//! first matching entry wins.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Statutory VAT rate used to derive the taxable base from the tax amount.
pub const STATUTORY_TAX_RATE: Decimal = dec!(0.16);

/// Share of the tax amount added on top of base and exempt amounts.
pub const TAX_SURCHARGE_SHARE: Decimal = dec!(0.25);

/// Marker of cash-sale reversal documents in the BLV backend.
pub const REVERSAL_MARKER: &str = "RNCVTA";

/// Marker of credit notes in the CRLV backend.
pub const CREDIT_NOTE_MARKER: &str = "NC";

/// Marker of debit notes, used only for exclusion.
pub const DEBIT_NOTE_MARKER: &str = "ND";

/// Override applied to a row whose document id matches a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolicy {
    /// Negate exempt, base and tax; take the total from the negated raw total.
    Reversal,
    /// Take the total from the raw signed total divided by the exchange rate.
    CreditNoteTotal,
}

/// A single `marker → policy` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRule {
    pub marker: &'static str,
    pub policy: RowPolicy,
}

/// Rules applied to BLV documents.
pub const SOURCE_A_RULES: &[MarkerRule] = &[MarkerRule {
    marker: REVERSAL_MARKER,
    policy: RowPolicy::Reversal,
}];

/// Rules applied to CRLV documents.
pub const SOURCE_B_RULES: &[MarkerRule] = &[MarkerRule {
    marker: CREDIT_NOTE_MARKER,
    policy: RowPolicy::CreditNoteTotal,
}];

/// Case-insensitive substring test.
pub fn contains_marker(haystack: &str, marker: &str) -> bool {
    haystack.to_uppercase().contains(&marker.to_uppercase())
}

/// Policy of the first rule whose marker occurs in `document_id`.
pub fn matching_policy(rules: &[MarkerRule], document_id: &str) -> Option<RowPolicy> {
    rules
        .iter()
        .find(|rule| contains_marker(document_id, rule.marker))
        .map(|rule| rule.policy)
}
