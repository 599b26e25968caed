//! Shared helpers for the live integration tests.

#![allow(dead_code)]

use std::env;

use cloudns_provider::{CloudnsProvider, Credentials, Record, RecordType};

/// Skip the current test when a required environment variable is absent.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that a `Result` is `Ok` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Generate a unique test record name.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Generate a unique ACME-style challenge name.
pub fn generate_challenge_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_acme-challenge._test-{}", &uuid.to_string()[..8])
}

/// Test context wrapping a provider and the zone under test.
pub struct TestContext {
    pub provider: CloudnsProvider,
    pub zone: String,
}

impl TestContext {
    /// Build a context from `CLOUDNS_AUTH_ID`, `CLOUDNS_AUTH_PASSWORD`,
    /// optional `CLOUDNS_SUB_AUTH_ID`, and `TEST_ZONE`.
    pub fn from_env() -> Option<Self> {
        let auth_id = env::var("CLOUDNS_AUTH_ID").ok()?;
        let auth_password = env::var("CLOUDNS_AUTH_PASSWORD").ok()?;
        let zone = env::var("TEST_ZONE").ok()?;

        let mut credentials = Credentials::new(auth_id, auth_password);
        credentials.sub_auth_id = env::var("CLOUDNS_SUB_AUTH_ID").ok();

        Some(Self {
            provider: CloudnsProvider::new(credentials),
            zone,
        })
    }

    /// Build a TXT record candidate for this zone.
    pub fn txt_candidate(&self, name: &str, value: &str) -> Record {
        Record::new(RecordType::Txt, name, value, 60)
    }

    /// Delete a batch of records, ignoring failures.
    pub async fn cleanup_records(&self, records: &[Record]) {
        let _ = self.provider.delete_records(&self.zone, records).await;
    }

    /// Find and delete every leftover test record (names containing
    /// `_test-`).
    pub async fn cleanup_all_test_records(&self) {
        if let Ok(records) = self.provider.get_records(&self.zone).await {
            let leftovers: Vec<Record> = records
                .into_iter()
                .filter(|r| r.name.contains("_test-"))
                .collect();
            let _ = self.provider.delete_records(&self.zone, &leftovers).await;
        }
    }
}
