//! Error types for record updates and reconciliation passes.
//!
//! Rejected input is not an error here: a field that fails normalization
//! carries [`Quality::Invalid`](crate::field::Quality::Invalid) as data.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The caller named a field outside the fixed key set. The record is unchanged.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Failure of the external identity lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Lookup request failed: {0}")]
    Transport(String),

    #[error("Lookup request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Lookup service returned HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Lookup service rejected the credentials (HTTP {code})")]
    Unauthorized { code: u16 },

    #[error("No bearer token configured for the identity lookup")]
    MissingToken,

    #[error("Failed to decode lookup response: {0}")]
    Decode(String),
}

impl LookupError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            LookupError::Transport(_) | LookupError::Timeout { .. } => true,
            LookupError::Status { code, .. } => *code == 429 || *code >= 500,
            LookupError::Unauthorized { .. } | LookupError::MissingToken | LookupError::Decode(_) => {
                false
            }
        }
    }
}

/// A reconciliation pass was aborted. No record was modified.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Identity lookup failed after {attempts} attempt(s): {source}")]
    LookupFailed {
        attempts: usize,
        #[source]
        source: LookupError,
    },
}
