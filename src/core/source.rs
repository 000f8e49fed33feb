//! Contract with the remote invoice fetch collaborator.
//!
//! The crate does not talk to the backends itself. It describes what to
//! fetch as a [`SearchQuery`] and receives records through [`RecordSource`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::ReportConfig;
use super::error::{FetchError, ReportError};

/// Model queried on both backends.
pub const INVOICE_MODEL: &str = "account.move";

/// Fields requested from the BLV backend.
pub const SOURCE_A_FIELDS: &[&str] = &[
    "name",
    "invoice_date",
    "invoice_number_next",
    "partner_id",
    "iva_exempt",
    "amount_tax_usd",
    "amount_tax_bs",
    "amount_total_signed",
    "currency_id",
];

/// Fields requested from the CRLV backend.
pub const SOURCE_B_FIELDS: &[&str] = &[
    "name",
    "invoice_date",
    "invoice_number_next",
    "partner_id",
    "amount_exempt",
    "amount_untaxed_signed",
    "amount_tax_signed",
    "amount_total_signed",
    "tasa",
    "currency_id",
];

/// Inclusive date range of one report cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportRequest {
    /// Create a request; `start` must not be after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidRequest(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Value side of a domain term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Text(String),
    List(Vec<String>),
}

/// One `(field, operator, value)` condition of a search domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTerm {
    pub field: String,
    pub operator: String,
    pub value: DomainValue,
}

impl DomainTerm {
    pub fn new(field: &str, operator: &str, value: DomainValue) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }
}

/// A `search_read` call: model, conjunctive domain and requested fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub model: String,
    pub domain: Vec<DomainTerm>,
    pub fields: Vec<String>,
}

impl SearchQuery {
    /// Query for posted customer invoices and refunds of the configured customer
    /// within the request's date range.
    pub fn new(request: &ReportRequest, config: &ReportConfig, fields: &[&str]) -> Self {
        let text = |s: &str| DomainValue::Text(s.to_string());
        Self {
            model: INVOICE_MODEL.into(),
            domain: vec![
                DomainTerm::new(
                    "move_type",
                    "in",
                    DomainValue::List(vec!["out_invoice".into(), "out_refund".into()]),
                ),
                DomainTerm::new(
                    "invoice_partner_display_name",
                    "=",
                    text(&config.customer_name),
                ),
                DomainTerm::new("invoice_date", ">=", text(&request.start.to_string())),
                DomainTerm::new("invoice_date", "<=", text(&request.end.to_string())),
                DomainTerm::new("state", "=", text("posted")),
            ],
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Query for the BLV backend.
    pub fn for_source_a(request: &ReportRequest, config: &ReportConfig) -> Self {
        Self::new(request, config, SOURCE_A_FIELDS)
    }

    /// Query for the CRLV backend.
    pub fn for_source_b(request: &ReportRequest, config: &ReportConfig) -> Self {
        Self::new(request, config, SOURCE_B_FIELDS)
    }
}

/// A backend able to answer a [`SearchQuery`] with records of type `R`.
///
/// Implementations own connection parameters, authentication, retries
/// and timeouts. Any failure is fatal to the current report cycle.
pub trait RecordSource<R> {
    fn search_read(&self, query: &SearchQuery) -> Result<Vec<R>, FetchError>;
}

/// In-memory records, returned as-is regardless of the query.
impl<R: Clone> RecordSource<R> for Vec<R> {
    fn search_read(&self, _query: &SearchQuery) -> Result<Vec<R>, FetchError> {
        Ok(self.clone())
    }
}

impl<R, F> RecordSource<R> for F
where
    F: Fn(&SearchQuery) -> Result<Vec<R>, FetchError>,
{
    fn search_read(&self, query: &SearchQuery) -> Result<Vec<R>, FetchError> {
        self(query)
    }
}
