use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::rules::{DEBIT_NOTE_MARKER, contains_marker};
use super::types::NormalizedInvoiceRow;

/// The merged, normalized rows of one report cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    rows: Vec<NormalizedInvoiceRow>,
}

impl Ledger {
    pub fn new(rows: Vec<NormalizedInvoiceRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[NormalizedInvoiceRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedInvoiceRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<NormalizedInvoiceRow> {
        self.rows
    }

    /// Copy of the ledger without the rows the policy excludes. Order is preserved.
    pub fn apply_exclusions(&self, policy: &ExclusionPolicy) -> Ledger {
        let rows: Vec<_> = self
            .rows
            .iter()
            .filter(|row| !policy.excludes(row))
            .cloned()
            .collect();
        if rows.len() != self.rows.len() {
            tracing::debug!(
                removed = self.rows.len() - rows.len(),
                remaining = rows.len(),
                "exclusions applied"
            );
        }
        Ledger { rows }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a NormalizedInvoiceRow;
    type IntoIter = std::slice::Iter<'a, NormalizedInvoiceRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Concatenate BLV rows followed by CRLV rows, keeping each source's order.
pub fn merge_ledgers(
    source_a: Vec<NormalizedInvoiceRow>,
    source_b: Vec<NormalizedInvoiceRow>,
) -> Ledger {
    let mut rows = source_a;
    rows.extend(source_b);
    Ledger { rows }
}

/// Which debit notes to drop from the ledger before aggregation.
///
/// The two exclusion controls are mutually exclusive: excluding every debit
/// note takes precedence over a token list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionPolicy {
    /// No filtering.
    #[default]
    Keep,
    /// Drop every row whose document id contains the debit-note marker.
    AllDebitNotes,
    /// Drop debit notes whose invoice number contains any of these tokens.
    Tokens(BTreeSet<String>),
}

impl ExclusionPolicy {
    /// Build the policy from the two UI controls, first matching rule wins.
    pub fn from_controls<I, S>(exclude_all_debit_notes: bool, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if exclude_all_debit_notes {
            return Self::AllDebitNotes;
        }
        let tokens: BTreeSet<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            Self::Keep
        } else {
            Self::Tokens(tokens)
        }
    }

    /// Whether `row` is removed under this policy.
    pub fn excludes(&self, row: &NormalizedInvoiceRow) -> bool {
        match self {
            Self::Keep => false,
            Self::AllDebitNotes => contains_marker(&row.document_id, DEBIT_NOTE_MARKER),
            Self::Tokens(tokens) => {
                contains_marker(&row.document_id, DEBIT_NOTE_MARKER)
                    && tokens
                        .iter()
                        .any(|t| row.next_invoice_number.contains(t.as_str()))
            }
        }
    }
}

/// Split a comma-separated token list, trimming blanks and dropping empties.
pub fn parse_exclusion_tokens(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
