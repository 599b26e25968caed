//! ClouDNS HTTP API client.
//!
//! API reference: <https://www.cloudns.net/wiki/article/41/>

mod error;
mod http;
mod records;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::types::Credentials;

pub(crate) use types::{AddRecordResponse, ApiRecord, RecordsResponse, StatusResponse};

pub(crate) const API_BASE: &str = "https://api.cloudns.net/dns";

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// TTL values the ClouDNS API accepts, ascending.
const AVAILABLE_TTLS: [u32; 13] = [
    60, 300, 900, 1800, 3600, 21_600, 43_200, 86_400, 172_800, 259_200, 604_800, 1_209_600,
    2_592_000,
];

/// Round a requested TTL up to the closest value ClouDNS accepts.
/// Requests above the ladder are clamped to its maximum.
pub(crate) fn closest_ttl(ttl: u32) -> u32 {
    for allowed in AVAILABLE_TTLS {
        if ttl <= allowed {
            return allowed;
        }
    }
    AVAILABLE_TTLS[AVAILABLE_TTLS.len() - 1]
}

/// ClouDNS record CRUD client.
///
/// One owned `reqwest::Client` is built at construction and reused for every
/// call; credentials are immutable configuration sent as query parameters on
/// each request.
pub struct CloudnsClient {
    pub(crate) client: Client,
    pub(crate) credentials: Credentials,
}

impl CloudnsClient {
    /// Build a client with default connect/request timeouts.
    pub fn new(credentials: Credentials) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to create HTTP client");
        Self {
            client,
            credentials,
        }
    }

    /// Auth query parameters attached to every request. A sub-account id,
    /// when configured, replaces the main account id.
    pub(crate) fn auth_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(sub) = &self.credentials.sub_auth_id {
            params.push(("sub-auth-id", sub.clone()));
        } else {
            params.push(("auth-id", self.credentials.auth_id.clone()));
        }
        params.push(("auth-password", self.credentials.auth_password.clone()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_rounds_up_to_ladder() {
        assert_eq!(closest_ttl(1), 60);
        assert_eq!(closest_ttl(60), 60);
        assert_eq!(closest_ttl(61), 300);
        assert_eq!(closest_ttl(600), 900);
        assert_eq!(closest_ttl(86_400), 86_400);
    }

    #[test]
    fn ttl_clamped_to_maximum() {
        assert_eq!(closest_ttl(9_999_999), 2_592_000);
    }

    #[test]
    fn auth_params_main_account() {
        let client = CloudnsClient::new(Credentials::new("1001", "pw"));
        let params = client.auth_params();
        assert_eq!(
            params,
            vec![
                ("auth-id", "1001".to_string()),
                ("auth-password", "pw".to_string()),
            ]
        );
    }

    #[test]
    fn auth_params_sub_account_replaces_main() {
        let mut credentials = Credentials::new("1001", "pw");
        credentials.sub_auth_id = Some("77".to_string());
        let client = CloudnsClient::new(credentials);
        let params = client.auth_params();
        assert_eq!(
            params,
            vec![
                ("sub-auth-id", "77".to_string()),
                ("auth-password", "pw".to_string()),
            ]
        );
    }
}
