//! Low-level HTTP plumbing shared by every ClouDNS endpoint call.
//!
//! Every endpoint is a GET with the auth fields and the endpoint parameters
//! in the query string; responses are JSON. No retries: a transport failure
//! is surfaced to the caller immediately.

use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};

use super::{API_BASE, CloudnsClient, StatusResponse};
use super::error::FailureContext;

/// Maximum number of bytes of a response body to include in debug logs.
const LOG_BODY_LIMIT: usize = 256;

/// Truncate a response body for logging, respecting char boundaries.
pub(crate) fn truncate_body(body: &str) -> &str {
    if body.len() <= LOG_BODY_LIMIT {
        return body;
    }
    let mut end = LOG_BODY_LIMIT;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

impl CloudnsClient {
    /// Execute one API call and return the raw response body.
    pub(crate) async fn call(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ClientResult<String> {
        let url = format!("{API_BASE}/{endpoint}");
        log::debug!("[cloudns] GET {url}");

        let mut query = self.auth_params();
        query.extend(params.iter().map(|(k, v)| (*k, v.clone())));

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout {
                        detail: e.to_string(),
                    }
                } else {
                    ClientError::Network {
                        detail: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        log::debug!("[cloudns] {endpoint} -> HTTP {status}");

        let body = response.text().await.map_err(|e| ClientError::Network {
            detail: format!("failed to read response body: {e}"),
        })?;
        log::debug!("[cloudns] response body: {}", truncate_body(&body));

        Ok(body)
    }

}

/// Parse a JSON response body.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|e| {
        log::error!("[cloudns] JSON parse failed: {e}");
        log::error!("[cloudns] raw response: {}", truncate_body(body));
        ClientError::Parse {
            detail: e.to_string(),
        }
    })
}

/// Reject ClouDNS failure envelopes.
///
/// `records.json` answers errors with the same `{"status":"Failed",...}`
/// envelope the mutation endpoints use, so a listing body has to be screened
/// before being parsed as a record map. Bodies that are not an envelope at
/// all pass through untouched.
pub(crate) fn check_failure(body: &str, context: FailureContext) -> ClientResult<()> {
    if let Ok(envelope) = serde_json::from_str::<StatusResponse>(body)
        && !envelope.is_success()
    {
        let err = super::error::map_failure(&envelope.status_description, context);
        if err.is_expected() {
            log::warn!("[cloudns] API failure: {err}");
        } else {
            log::error!("[cloudns] API failure: {err}");
        }
        return Err(err);
    }
    Ok(())
}
