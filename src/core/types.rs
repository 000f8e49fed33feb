use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::odoo;

/// Issuing legal company a normalized row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Entity {
    /// First backend. Reports tax in either dollars or bolívares.
    #[serde(rename = "BLV")]
    Blv,
    /// Second backend. Amounts are converted to dollars at the exchange rate.
    #[serde(rename = "CRLV")]
    Crlv,
}

impl Entity {
    /// Tag used in exports and summaries.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Blv => "BLV",
            Self::Crlv => "CRLV",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Many-to-one reference as returned by `search_read`: `[id, "label"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, String)", into = "(i64, String)")]
pub struct Many2One {
    /// Database id of the referenced record.
    pub id: i64,
    /// Display name of the referenced record.
    pub label: String,
}

impl Many2One {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl From<(i64, String)> for Many2One {
    fn from((id, label): (i64, String)) -> Self {
        Self { id, label }
    }
}

impl From<Many2One> for (i64, String) {
    fn from(m: Many2One) -> Self {
        (m.id, m.label)
    }
}

/// Raw `account.move` record from the BLV backend.
///
/// Field names follow the backend's field list; any value may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInvoiceA {
    /// Document identifier (journal sequence name).
    pub name: String,
    #[serde(deserialize_with = "odoo::optional")]
    pub invoice_date: Option<NaiveDate>,
    /// Fiscal control number of the printed invoice.
    #[serde(deserialize_with = "odoo::optional")]
    pub invoice_number_next: Option<String>,
    #[serde(deserialize_with = "odoo::optional")]
    pub partner_id: Option<Many2One>,
    #[serde(deserialize_with = "odoo::optional")]
    pub currency_id: Option<Many2One>,
    /// Exempt portion of the invoice.
    #[serde(deserialize_with = "odoo::amount")]
    pub iva_exempt: Option<Decimal>,
    /// Tax expressed in dollars.
    #[serde(deserialize_with = "odoo::amount")]
    pub amount_tax_usd: Option<Decimal>,
    /// Tax expressed in bolívares.
    #[serde(deserialize_with = "odoo::amount")]
    pub amount_tax_bs: Option<Decimal>,
    /// Signed document total; used verbatim for reversal documents.
    #[serde(deserialize_with = "odoo::amount")]
    pub amount_total_signed: Option<Decimal>,
}

/// Raw `account.move` record from the CRLV backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInvoiceB {
    /// Document identifier (journal sequence name).
    pub name: String,
    #[serde(deserialize_with = "odoo::optional")]
    pub invoice_date: Option<NaiveDate>,
    #[serde(deserialize_with = "odoo::optional")]
    pub invoice_number_next: Option<String>,
    #[serde(deserialize_with = "odoo::optional")]
    pub partner_id: Option<Many2One>,
    #[serde(deserialize_with = "odoo::optional")]
    pub currency_id: Option<Many2One>,
    /// Exempt portion, in the company currency.
    #[serde(deserialize_with = "odoo::amount")]
    pub amount_exempt: Option<Decimal>,
    #[serde(deserialize_with = "odoo::amount")]
    pub amount_untaxed_signed: Option<Decimal>,
    #[serde(deserialize_with = "odoo::amount")]
    pub amount_tax_signed: Option<Decimal>,
    #[serde(deserialize_with = "odoo::amount")]
    pub amount_total_signed: Option<Decimal>,
    /// Exchange rate (company currency per dollar). Zero means "not set".
    #[serde(deserialize_with = "odoo::amount")]
    pub tasa: Option<Decimal>,
}

/// One document of the merged ledger, in the row's stated currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInvoiceRow {
    pub entity: Entity,
    pub document_id: String,
    pub issue_date: Option<NaiveDate>,
    pub next_invoice_number: String,
    pub customer_name: String,
    pub exempt_amount: Decimal,
    pub taxable_base: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub currency_label: String,
}
