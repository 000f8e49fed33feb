//! Decoding of `search_read` JSON payloads.
//!
//! A payload is the JSON array the backend returns for a `search_read`
//! call. [`JsonRecordSource`] replays a captured payload as a
//! [`RecordSource`], which is how fixtures and offline runs feed the
//! report pipeline.
//!
//! # Example
//!
//! ```
//! use facturas::core::*;
//! use facturas::json::decode_records;
//!
//! let payload = r#"[{"id": 7, "name": "INV-001", "invoice_date": "2024-01-15",
//!     "invoice_number_next": false, "partner_id": [3, "FARMACIA FARMAGO, C.A."],
//!     "currency_id": [2, "Bolivares"], "iva_exempt": false,
//!     "amount_tax_usd": 0.0, "amount_tax_bs": 16.0, "amount_total_signed": 120.0}]"#;
//!
//! let records: Vec<RawInvoiceA> = decode_records(payload).unwrap();
//! assert_eq!(records[0].invoice_number_next, None);
//! assert_eq!(records[0].currency_id.as_ref().unwrap().label, "Bolivares");
//! ```

use serde::de::DeserializeOwned;

use crate::core::{FetchError, RecordSource, SearchQuery};

/// Decode a `search_read` JSON array into records.
pub fn decode_records<R: DeserializeOwned>(payload: &str) -> Result<Vec<R>, FetchError> {
    serde_json::from_str(payload).map_err(|e| FetchError::Decode(e.to_string()))
}

/// A captured `search_read` payload served as a record source.
///
/// The payload is decoded on every call, so a malformed payload surfaces as
/// a fetch failure of the report cycle.
#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    payload: String,
}

impl JsonRecordSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Read the payload from a file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path)
            .map_err(|e| FetchError::Transport(format!("{}: {e}", path.display())))?;
        Ok(Self { payload })
    }
}

impl<R: DeserializeOwned> RecordSource<R> for JsonRecordSource {
    fn search_read(&self, query: &SearchQuery) -> Result<Vec<R>, FetchError> {
        tracing::debug!(model = %query.model, bytes = self.payload.len(), "decoding payload");
        decode_records(&self.payload)
    }
}
