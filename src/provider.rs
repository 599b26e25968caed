//! Record reconciliation over a [`RecordClient`].
//!
//! The append path is the only place with real decision logic: repeated ACME
//! DNS-01 challenges would otherwise pile up stale TXT records under the
//! same name, hit per-name record limits, and let validators read an old
//! token. For ACME names, append converges the zone to a single canonical
//! record per `(type, name)`; ordinary multi-value names (several A records,
//! say) are left alone and always created.

use crate::cloudns::CloudnsClient;
use crate::error::{BatchError, ClientResult, ProviderError};
use crate::traits::RecordClient;
use crate::types::{Credentials, Record, compare_record_ids, normalize_zone};

/// Record-management adapter for a ClouDNS account.
///
/// Exposes four batch operations (get / append / set / delete) over a single
/// owned [`RecordClient`]. Batches are processed sequentially with no
/// internal parallelism and no retries; the first failure aborts the rest of
/// the batch. Already-applied remote mutations are not rolled back — the
/// returned [`BatchError`] carries them instead.
///
/// Concurrent calls against the same zone are not coordinated: two
/// simultaneous appends of the same ACME name can both observe an empty zone
/// and both create a record. The duplicate is removed by the next converge
/// pass.
pub struct CloudnsProvider<C = CloudnsClient> {
    client: C,
}

impl CloudnsProvider {
    /// Build a provider talking to the ClouDNS API with the given
    /// credentials. The HTTP client is constructed once and reused for
    /// every call.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: CloudnsClient::new(credentials),
        }
    }
}

impl<C: RecordClient> CloudnsProvider<C> {
    /// Build a provider over any [`RecordClient`] implementation.
    pub fn with_client(client: C) -> Self {
        Self { client }
    }

    /// Check the stored credentials against the remote API.
    pub async fn validate_credentials(&self) -> ClientResult<bool> {
        self.client.validate_credentials().await
    }

    /// List every record in the zone, verbatim.
    pub async fn get_records(&self, zone: &str) -> Result<Vec<Record>, ProviderError> {
        let zone = normalize_zone(zone);
        self.client
            .get_records(zone)
            .await
            .map_err(ProviderError::GetRecords)
    }

    /// Add records to the zone, converging ACME challenge records instead of
    /// duplicating them.
    ///
    /// Per candidate, in input order: a name carrying the
    /// [`ACME_CHALLENGE_PREFIX`](crate::ACME_CHALLENGE_PREFIX) triggers a
    /// full zone listing; existing records with the candidate's
    /// `(type, name)` identity are reduced to the one with the smallest id
    /// (the oldest instance), the rest are deleted as stale duplicates, and
    /// the survivor is updated in place with the candidate's value and TTL.
    /// Without a match — and for every non-ACME candidate — the record is
    /// plainly created.
    ///
    /// Returns the created/updated records in candidate order.
    pub async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, BatchError> {
        let zone = normalize_zone(zone);
        let mut applied = Vec::with_capacity(records.len());
        for (index, candidate) in records.iter().enumerate() {
            match self.append_one(zone, candidate).await {
                Ok(record) => applied.push(record),
                Err(source) => {
                    return Err(BatchError {
                        applied,
                        index,
                        source,
                    });
                }
            }
        }
        Ok(applied)
    }

    async fn append_one(&self, zone: &str, candidate: &Record) -> Result<Record, ProviderError> {
        if candidate.is_acme_challenge() {
            let existing = self
                .client
                .get_records(zone)
                .await
                .map_err(ProviderError::GetRecords)?;

            let mut matches: Vec<&Record> = existing
                .iter()
                .filter(|record| record.same_identity(candidate))
                .collect();
            // Survivor selection must not depend on listing order: keep the
            // smallest id, everything younger is a stale duplicate.
            matches.sort_by(|a, b| compare_record_ids(&a.id, &b.id));

            if let Some((survivor, stale)) = matches.split_first() {
                for duplicate in stale {
                    log::debug!(
                        "removing stale ACME challenge record {} ({}) in {zone}",
                        duplicate.id,
                        duplicate.name
                    );
                    self.client
                        .delete_record(zone, &duplicate.id)
                        .await
                        .map_err(ProviderError::DeleteStale)?;
                }

                log::debug!(
                    "converging ACME challenge record {} ({}) in {zone}",
                    survivor.id,
                    survivor.name
                );
                return self
                    .client
                    .update_record(
                        zone,
                        &survivor.id,
                        candidate.record_type,
                        &candidate.name,
                        &candidate.value,
                        candidate.ttl,
                    )
                    .await
                    .map_err(ProviderError::UpdateChallenge);
            }
        }

        self.client
            .add_record(
                zone,
                candidate.record_type,
                &candidate.name,
                &candidate.value,
                candidate.ttl,
            )
            .await
            .map_err(ProviderError::AddRecord)
    }

    /// Ensure each record exists exactly as given: records without an id are
    /// created, records with an id are updated in place. No ACME
    /// special-casing — callers of this path guarantee uniqueness
    /// themselves.
    pub async fn set_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, BatchError> {
        let zone = normalize_zone(zone);
        let mut applied = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let result = if record.id.is_empty() {
                self.client
                    .add_record(
                        zone,
                        record.record_type,
                        &record.name,
                        &record.value,
                        record.ttl,
                    )
                    .await
                    .map_err(ProviderError::AddRecord)
            } else {
                self.client
                    .update_record(
                        zone,
                        &record.id,
                        record.record_type,
                        &record.name,
                        &record.value,
                        record.ttl,
                    )
                    .await
                    .map_err(ProviderError::UpdateRecord)
            };
            match result {
                Ok(record) => applied.push(record),
                Err(source) => {
                    return Err(BatchError {
                        applied,
                        index,
                        source,
                    });
                }
            }
        }
        Ok(applied)
    }

    /// Delete each record by its id, returning the deleted records as
    /// confirmation.
    pub async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, BatchError> {
        let zone = normalize_zone(zone);
        let mut applied = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match self.client.delete_record(zone, &record.id).await {
                Ok(()) => applied.push(record.clone()),
                Err(source) => {
                    return Err(BatchError {
                        applied,
                        index,
                        source: ProviderError::DeleteRecord(source),
                    });
                }
            }
        }
        Ok(applied)
    }
}
