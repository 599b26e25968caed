use serde::Serialize;
use thiserror::Error;

use crate::types::Record;

/// Transport- and API-level errors produced by a [`RecordClient`](crate::RecordClient).
///
/// Variants are serializable for structured error reporting. Expected errors
/// (bad credentials, missing zone or record) should be logged at `warn`,
/// everything else at `error`; see [`is_expected`](Self::is_expected).
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// A network-level failure (DNS resolution, connection refused, TLS, ...).
    #[error("network error: {detail}")]
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API rejected the supplied auth-id / auth-password pair.
    #[error("invalid credentials: {detail}")]
    InvalidCredentials {
        /// Original failure description from the API.
        detail: String,
    },

    /// The zone is unknown to the account.
    #[error("zone '{zone}' not found")]
    DomainNotFound {
        /// Zone name that was rejected.
        zone: String,
    },

    /// The record id does not exist in the zone.
    #[error("record '{record_id}' not found")]
    RecordNotFound {
        /// Record id that was rejected.
        record_id: String,
    },

    /// The API rate limit was hit. Surfaced to the caller as-is; this crate
    /// never retries.
    #[error("API rate limit exceeded: {detail}")]
    RateLimited {
        /// Original failure description from the API.
        detail: String,
    },

    /// The API reported a failure not covered by a more specific variant.
    #[error("API request failed: {description}")]
    Api {
        /// Raw `statusDescription` from the failure envelope.
        description: String,
    },

    /// The response body could not be parsed.
    #[error("failed to parse API response: {detail}")]
    Parse {
        /// Details about the parse failure.
        detail: String,
    },
}

impl ClientError {
    /// Whether this error is expected behavior (caller input, missing
    /// resources) rather than an operational fault, for log leveling.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::DomainNotFound { .. }
                | Self::RecordNotFound { .. }
        )
    }
}

/// Convenience alias for client-level results.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Error taxonomy by failing sub-operation, as surfaced by
/// [`CloudnsProvider`](crate::CloudnsProvider). Each variant wraps the
/// originating [`ClientError`] as its source.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "op", content = "cause")]
pub enum ProviderError {
    /// The full zone listing before ACME reconciliation failed.
    #[error("failed to get existing records: {0}")]
    GetRecords(#[source] ClientError),

    /// Deleting a duplicate ACME challenge record failed.
    #[error("failed to delete stale ACME challenge records: {0}")]
    DeleteStale(#[source] ClientError),

    /// Updating the surviving ACME challenge record in place failed.
    #[error("failed to update ACME challenge record: {0}")]
    UpdateChallenge(#[source] ClientError),

    /// Plain record creation failed.
    #[error("failed to add record: {0}")]
    AddRecord(#[source] ClientError),

    /// Plain record update failed.
    #[error("failed to update record: {0}")]
    UpdateRecord(#[source] ClientError),

    /// Record deletion failed.
    #[error("failed to delete record: {0}")]
    DeleteRecord(#[source] ClientError),
}

/// A batch operation aborted at `index` after `applied` records had already
/// been committed remotely.
///
/// Batches are applied one record at a time with no rollback, so a failure
/// may leave earlier mutations in place. Instead of discarding that partial
/// progress, it is carried here: `applied` holds the records created,
/// updated or deleted before the failure, in candidate order.
#[derive(Debug, Clone, Error, Serialize)]
#[error("record {index}: {source}")]
pub struct BatchError {
    /// Records successfully applied before the failure.
    pub applied: Vec<Record>,
    /// Index of the failing record in the input batch.
    pub index: usize,
    /// The failing sub-operation and its cause.
    #[source]
    pub source: ProviderError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ClientError::Network {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "network error: connection refused");
    }

    #[test]
    fn display_record_not_found() {
        let e = ClientError::RecordNotFound {
            record_id: "12345".to_string(),
        };
        assert_eq!(e.to_string(), "record '12345' not found");
    }

    #[test]
    fn display_domain_not_found() {
        let e = ClientError::DomainNotFound {
            zone: "example.com".to_string(),
        };
        assert_eq!(e.to_string(), "zone 'example.com' not found");
    }

    #[test]
    fn expected_variants() {
        assert!(
            ClientError::InvalidCredentials { detail: "x".into() }.is_expected()
        );
        assert!(
            ClientError::RecordNotFound {
                record_id: "1".into()
            }
            .is_expected()
        );
        assert!(!ClientError::Network { detail: "x".into() }.is_expected());
        assert!(!ClientError::Parse { detail: "x".into() }.is_expected());
    }

    #[test]
    fn provider_error_messages_name_the_sub_operation() {
        let cause = ClientError::Api {
            description: "boom".to_string(),
        };
        assert_eq!(
            ProviderError::GetRecords(cause.clone()).to_string(),
            "failed to get existing records: API request failed: boom"
        );
        assert_eq!(
            ProviderError::DeleteStale(cause.clone()).to_string(),
            "failed to delete stale ACME challenge records: API request failed: boom"
        );
        assert_eq!(
            ProviderError::UpdateChallenge(cause.clone()).to_string(),
            "failed to update ACME challenge record: API request failed: boom"
        );
        assert_eq!(
            ProviderError::AddRecord(cause.clone()).to_string(),
            "failed to add record: API request failed: boom"
        );
        assert_eq!(
            ProviderError::UpdateRecord(cause.clone()).to_string(),
            "failed to update record: API request failed: boom"
        );
        assert_eq!(
            ProviderError::DeleteRecord(cause).to_string(),
            "failed to delete record: API request failed: boom"
        );
    }

    #[test]
    fn provider_error_exposes_source() {
        use std::error::Error as _;

        let e = ProviderError::AddRecord(ClientError::Timeout {
            detail: "30s".to_string(),
        });
        let src = e.source();
        assert!(src.is_some(), "expected a source error");
        assert_eq!(
            src.map(ToString::to_string).unwrap_or_default(),
            "request timeout: 30s"
        );
    }

    #[test]
    fn batch_error_reports_index_and_cause() {
        let e = BatchError {
            applied: Vec::new(),
            index: 2,
            source: ProviderError::DeleteRecord(ClientError::RecordNotFound {
                record_id: "9".to_string(),
            }),
        };
        assert_eq!(
            e.to_string(),
            "record 2: failed to delete record: record '9' not found"
        );
    }

    #[test]
    fn client_error_serializes_with_code_tag() {
        let e = ClientError::RateLimited {
            detail: "slow down".to_string(),
        };
        let json = serde_json::to_string(&e).unwrap_or_default();
        assert!(json.contains("\"code\":\"RateLimited\""), "got: {json}");
    }
}
