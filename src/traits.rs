use async_trait::async_trait;

use crate::error::ClientResult;
use crate::types::{Record, RecordType};

/// Remote record CRUD contract consumed by
/// [`CloudnsProvider`](crate::CloudnsProvider).
///
/// [`CloudnsClient`](crate::CloudnsClient) is the production implementation;
/// tests substitute a recording mock through
/// [`CloudnsProvider::with_client`](crate::CloudnsProvider::with_client).
///
/// All methods take the zone already normalized (no trailing dot) and are
/// synchronous single calls: no retries, no internal parallelism.
#[async_trait]
pub trait RecordClient: Send + Sync {
    /// Check that the stored credentials are accepted by the remote API.
    async fn validate_credentials(&self) -> ClientResult<bool>;

    /// List every record in the zone.
    async fn get_records(&self, zone: &str) -> ClientResult<Vec<Record>>;

    /// Create a record and return it with its newly assigned id.
    async fn add_record(
        &self,
        zone: &str,
        record_type: RecordType,
        name: &str,
        value: &str,
        ttl: u32,
    ) -> ClientResult<Record>;

    /// Update the record identified by `record_id` in place and return the
    /// record as it now stands, id preserved. `record_type` is not sent on
    /// the wire (ClouDNS record types are immutable); it shapes the returned
    /// record.
    async fn update_record(
        &self,
        zone: &str,
        record_id: &str,
        record_type: RecordType,
        name: &str,
        value: &str,
        ttl: u32,
    ) -> ClientResult<Record>;

    /// Delete the record identified by `record_id`.
    async fn delete_record(&self, zone: &str, record_id: &str) -> ClientResult<()>;
}
