//! # facturas
//!
//! Invoice tax normalization and aggregation for two accounting backends.
//!
//! Raw `account.move` records from the BLV and CRLV companies are turned into
//! one normalized ledger: exempt amount, taxable base, tax and total per
//! document, with reversal and credit-note documents handled by an explicit
//! rule table. The ledger is then filtered, summed per (entity, currency) and
//! rendered as a spreadsheet export, a text summary and a mail draft.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use facturas::core::*;
//! use facturas::report::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = RawInvoiceA {
//!     name: "INV-001".into(),
//!     currency_id: Some(Many2One::new(2, LOCAL_LABEL)),
//!     amount_tax_bs: Some(dec!(16)),
//!     ..Default::default()
//! };
//!
//! let request = ReportRequest::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//! )
//! .unwrap();
//! let source_b: Vec<RawInvoiceB> = Vec::new();
//! let run = generate_report(&vec![invoice], &source_b, request, &ReportConfig::default()).unwrap();
//!
//! let report = run.filtered(&ExclusionPolicy::Keep);
//! assert_eq!(report.totals().get(Entity::Blv, LOCAL_LABEL), dec!(104.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record types, normalizers, ledger, aggregation, CSV/text reports |
//! | `spreadsheet` | Excel 2003 SpreadsheetML workbook export |
//! | `json` | `search_read` JSON payload decoding |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod report;

#[cfg(feature = "json")]
pub mod json;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
