//! Currency label resolution.
//!
//! The backends identify currencies by their display label rather than an
//! ISO 4217 code, so all currency-dependent rules key off these labels.

use super::types::Many2One;

/// Display label of the dollar currency in both backends.
pub const DOLLAR_LABEL: &str = "Dolares";

/// Display label of the local currency (bolívares) in the BLV backend.
pub const LOCAL_LABEL: &str = "Bolivares";

/// Extract the display label from a currency reference, or `""` if absent.
pub fn resolve_currency_label(currency: Option<&Many2One>) -> &str {
    currency.map_or("", |c| c.label.as_str())
}

/// Whether `label` names the dollar currency.
pub fn is_dollar_label(label: &str) -> bool {
    label == DOLLAR_LABEL
}
