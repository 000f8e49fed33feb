//! Core record types, tax normalization, ledger, and aggregation.
//!
//! This module turns raw `account.move` records from the two backends into
//! a single normalized ledger and sums it per issuing entity and currency.

mod aggregate;
mod config;
mod currency;
mod error;
mod ledger;
mod normalize;
pub mod odoo;
pub mod rules;
mod source;
mod types;

pub use aggregate::*;
pub use config::*;
pub use currency::*;
pub use error::*;
pub use ledger::*;
pub use normalize::*;
pub use rules::{
    CREDIT_NOTE_MARKER, DEBIT_NOTE_MARKER, REVERSAL_MARKER, RowPolicy, STATUTORY_TAX_RATE,
    TAX_SURCHARGE_SHARE, contains_marker,
};
pub use source::*;
pub use types::*;
