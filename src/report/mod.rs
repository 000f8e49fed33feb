//! Report formatting: sheet layout, CSV and spreadsheet exports, text
//! summary, mail draft, and the report cycle driver.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use facturas::core::*;
//! use facturas::report::*;
//!
//! let request = ReportRequest::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//! )
//! .unwrap();
//! let none_a: Vec<RawInvoiceA> = Vec::new();
//! let none_b: Vec<RawInvoiceB> = Vec::new();
//! let run = generate_report(&none_a, &none_b, request, &ReportConfig::default()).unwrap();
//! let report = run.filtered(&ExclusionPolicy::Keep);
//! assert!(report.ledger().is_empty());
//! assert!(report.csv().starts_with("\"Empresa\""));
//! ```

mod csv_export;
mod format;
mod layout;
mod mail;
mod run;
#[cfg(feature = "spreadsheet")]
mod spreadsheet;
mod summary;

pub use csv_export::to_csv;
pub use format::{
    CurrencyFormat, format_amount, format_amount_locale, format_grouped, to_locale,
};
pub use layout::{
    COLUMNS, CellValue, SUMMARY_COLUMN, SUMMARY_SLOTS, Sheet, SummarySlot, build_sheet,
};
pub use mail::{MailDraft, ascii_slug, export_file_stem, export_filename, percent_encode};
pub use run::{FilteredReport, ReportRun, generate_report};
#[cfg(feature = "spreadsheet")]
pub use spreadsheet::to_spreadsheet_xml;
pub use summary::summary_text;
