//! Error types shared across the store adapter and the presentation layer.
//!
//! Every [`StoreError`] carries a stable machine-readable code and a
//! remediation suggestion so frontends can render a recovery action instead
//! of failing silently.

use thiserror::Error;

/// Failures of the backend connector and the record store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required connection parameter is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The draft handed to the adapter could not be turned into a record.
    #[error("invalid draft: {0}")]
    InvalidDraft(#[from] DraftError),

    /// A stored document does not decode to the project record shape.
    #[error("malformed record '{id}': {reason}")]
    MalformedRecord { id: String, reason: String },

    /// The hosted store could not be reached, or a read failed mid-flight.
    #[error("backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    /// The store refused an insert (permission denial and other rejections).
    #[error("write rejected by the store (HTTP {status}): {reason}")]
    WriteRejected { status: u16, reason: String },
}

impl StoreError {
    /// Stable code identifier for machine parsing.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E1001",
            Self::InvalidDraft(_) => "E2001",
            Self::MalformedRecord { .. } => "E2002",
            Self::BackendUnavailable { .. } => "E3001",
            Self::WriteRejected { .. } => "E3002",
        }
    }

    /// Remediation hint surfaced next to the error message.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::Config(_) => "Export the BOMA_* connection variables, then retry.",
            Self::InvalidDraft(_) => "Fix the highlighted field and submit again.",
            Self::MalformedRecord { .. } => {
                "Repair or remove the offending document in the hosted console."
            }
            Self::BackendUnavailable { .. } => "Check connectivity and retry the fetch.",
            Self::WriteRejected { .. } => {
                "Verify the API key has write access to the projects collection."
            }
        }
    }
}

/// Guard failures for an in-progress project draft.
///
/// These never reach the store; the create workflow surfaces them on the
/// form instead of attempting the write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("project name must not be empty")]
    EmptyName,

    #[error("constituency must not be empty")]
    EmptyConstituency,

    #[error("unknown constituency: '{0}'")]
    UnknownConstituency(String),

    #[error("budget must be greater than zero")]
    ZeroBudget,

    #[error("end date must be a YYYY-MM-DD date, got '{0}'")]
    BadEndDate(String),
}

#[cfg(test)]
mod tests {
    use super::{DraftError, StoreError};
    use std::collections::HashSet;

    #[test]
    fn error_codes_are_unique() {
        let all = [
            StoreError::Config("x".into()),
            StoreError::InvalidDraft(DraftError::EmptyName),
            StoreError::MalformedRecord {
                id: "d1".into(),
                reason: "bad".into(),
            },
            StoreError::BackendUnavailable {
                reason: "refused".into(),
            },
            StoreError::WriteRejected {
                status: 403,
                reason: "Forbidden".into(),
            },
        ];
        let codes: HashSet<&str> = all.iter().map(StoreError::error_code).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn every_error_has_a_suggestion() {
        let err = StoreError::WriteRejected {
            status: 403,
            reason: "Forbidden".into(),
        };
        assert!(!err.suggestion().is_empty());
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn draft_errors_convert_into_store_errors() {
        let err = StoreError::from(DraftError::ZeroBudget);
        assert_eq!(err.error_code(), "E2001");
        assert!(err.to_string().contains("budget"));
    }
}
