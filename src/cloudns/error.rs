//! ClouDNS failure mapping.
//!
//! ClouDNS reports every failure as `{"status":"Failed","statusDescription":
//! "..."}` with no machine-readable code, so classification goes by
//! description substrings.

use crate::error::ClientError;

/// Extra information available at the call site, used to enrich mapped
/// errors.
#[derive(Debug, Clone, Default)]
pub(crate) struct FailureContext {
    /// Zone the failing call targeted.
    pub zone: Option<String>,
    /// Record id the failing call targeted.
    pub record_id: Option<String>,
}

impl FailureContext {
    pub fn zone(zone: &str) -> Self {
        Self {
            zone: Some(zone.to_string()),
            record_id: None,
        }
    }

    pub fn record(zone: &str, record_id: &str) -> Self {
        Self {
            zone: Some(zone.to_string()),
            record_id: Some(record_id.to_string()),
        }
    }
}

/// Map a failure description to a structured [`ClientError`].
pub(crate) fn map_failure(description: &str, context: FailureContext) -> ClientError {
    let lower = description.to_lowercase();

    // e.g. "Invalid authentication, incorrect auth-id or auth-password."
    if lower.contains("authentication") || lower.contains("auth-id") || lower.contains("auth-password")
    {
        return ClientError::InvalidCredentials {
            detail: description.to_string(),
        };
    }

    // e.g. "Invalid domain-name. Please use the canonical names of your zones."
    if lower.contains("domain-name") {
        return ClientError::DomainNotFound {
            zone: context.zone.unwrap_or_else(|| "<unknown>".to_string()),
        };
    }

    // e.g. "Invalid record-id param."
    if lower.contains("record-id") {
        return ClientError::RecordNotFound {
            record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
        };
    }

    // e.g. "You have reached the limit of requests per second."
    if lower.contains("rate limit") || lower.contains("limit of requests") {
        return ClientError::RateLimited {
            detail: description.to_string(),
        };
    }

    ClientError::Api {
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure() {
        let err = map_failure(
            "Invalid authentication, incorrect auth-id or auth-password.",
            FailureContext::default(),
        );
        assert!(matches!(err, ClientError::InvalidCredentials { .. }));
    }

    #[test]
    fn unknown_zone() {
        let err = map_failure(
            "Invalid domain-name. Please use the canonical names of your zones.",
            FailureContext::zone("example.com"),
        );
        assert!(
            matches!(&err, ClientError::DomainNotFound { zone } if zone == "example.com"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn unknown_record() {
        let err = map_failure(
            "Invalid record-id param.",
            FailureContext::record("example.com", "3163370"),
        );
        assert!(
            matches!(&err, ClientError::RecordNotFound { record_id } if record_id == "3163370"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn rate_limit() {
        let err = map_failure(
            "You have reached the limit of requests per second.",
            FailureContext::default(),
        );
        assert!(matches!(err, ClientError::RateLimited { .. }));
    }

    #[test]
    fn fallback_preserves_description() {
        let err = map_failure("Something unexpected happened.", FailureContext::default());
        assert!(
            matches!(&err, ClientError::Api { description } if description == "Something unexpected happened."),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn missing_context_uses_placeholder() {
        let err = map_failure("Missing record-id", FailureContext::default());
        assert!(
            matches!(&err, ClientError::RecordNotFound { record_id } if record_id == "<unknown>"),
            "unexpected error: {err:?}"
        );
    }
}
