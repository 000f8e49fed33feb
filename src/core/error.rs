use thiserror::Error;

use super::types::Entity;

/// Errors that abort a report cycle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// A backend could not be queried; no partial ledger is produced.
    #[error("fetching {entity} invoices failed: {error}")]
    Fetch {
        /// Entity whose backend failed.
        entity: Entity,
        /// Underlying collaborator error.
        #[source]
        error: FetchError,
    },

    /// The report request itself is malformed (e.g. inverted date range).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Export serialization error.
    #[error("export error: {0}")]
    Export(String),
}

/// Error reported by a [`RecordSource`](super::RecordSource) collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The backend rejected the credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Network or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The payload could not be decoded into records.
    #[error("decode error: {0}")]
    Decode(String),
}
