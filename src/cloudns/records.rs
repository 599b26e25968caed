//! [`RecordClient`] implementation over the ClouDNS record endpoints.

use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};
use crate::traits::RecordClient;
use crate::types::{Record, RecordType};

use super::error::FailureContext;
use super::http::{check_failure, parse_json};
use super::{AddRecordResponse, ApiRecord, CloudnsClient, RecordsResponse, StatusResponse, closest_ttl};

/// Convert a raw listing entry into a [`Record`].
fn api_record_to_record(raw: ApiRecord) -> ClientResult<Record> {
    let record_type = RecordType::parse(&raw.record_type).ok_or_else(|| ClientError::Parse {
        detail: format!("unsupported record type '{}'", raw.record_type),
    })?;
    let ttl = raw.ttl.parse::<u32>().map_err(|e| ClientError::Parse {
        detail: format!("invalid ttl '{}': {e}", raw.ttl),
    })?;
    Ok(Record {
        id: raw.id,
        record_type,
        name: raw.host,
        value: raw.record,
        ttl,
    })
}

#[async_trait]
impl RecordClient for CloudnsClient {
    async fn validate_credentials(&self) -> ClientResult<bool> {
        let body = self.call("login.json", &[]).await?;
        let envelope: StatusResponse = parse_json(&body)?;
        Ok(envelope.is_success())
    }

    async fn get_records(&self, zone: &str) -> ClientResult<Vec<Record>> {
        let params = [("domain-name", zone.to_string())];
        let body = self.call("records.json", &params).await?;
        check_failure(&body, FailureContext::zone(zone))?;

        let listing: RecordsResponse = parse_json(&body)?;
        listing
            .into_sorted()
            .into_iter()
            .map(api_record_to_record)
            .collect()
    }

    async fn add_record(
        &self,
        zone: &str,
        record_type: RecordType,
        name: &str,
        value: &str,
        ttl: u32,
    ) -> ClientResult<Record> {
        let ttl = closest_ttl(ttl);
        let params = [
            ("domain-name", zone.to_string()),
            ("record-type", record_type.as_str().to_string()),
            ("host", name.to_string()),
            ("record", value.to_string()),
            ("ttl", ttl.to_string()),
        ];
        let body = self.call("add-record.json", &params).await?;

        let response: AddRecordResponse = parse_json(&body)?;
        if !response.is_success() {
            return Err(super::error::map_failure(
                &response.status_description,
                FailureContext::zone(zone),
            ));
        }
        let id = response.data.ok_or_else(|| ClientError::Parse {
            detail: "add-record response is missing data.id".to_string(),
        })?;

        log::debug!("[cloudns] created {record_type} record {name} in {zone} (id {})", id.id);
        Ok(Record {
            id: id.id.to_string(),
            record_type,
            name: name.to_string(),
            value: value.to_string(),
            ttl,
        })
    }

    async fn update_record(
        &self,
        zone: &str,
        record_id: &str,
        record_type: RecordType,
        name: &str,
        value: &str,
        ttl: u32,
    ) -> ClientResult<Record> {
        let ttl = closest_ttl(ttl);
        let params = [
            ("domain-name", zone.to_string()),
            ("record-id", record_id.to_string()),
            ("host", name.to_string()),
            ("record", value.to_string()),
            ("ttl", ttl.to_string()),
        ];
        let body = self.call("mod-record.json", &params).await?;

        let envelope: StatusResponse = parse_json(&body)?;
        if !envelope.is_success() {
            return Err(super::error::map_failure(
                &envelope.status_description,
                FailureContext::record(zone, record_id),
            ));
        }

        log::debug!("[cloudns] updated record {record_id} in {zone}");
        // mod-record answers with a bare status envelope; the updated record
        // is rebuilt from the request, id preserved.
        Ok(Record {
            id: record_id.to_string(),
            record_type,
            name: name.to_string(),
            value: value.to_string(),
            ttl,
        })
    }

    async fn delete_record(&self, zone: &str, record_id: &str) -> ClientResult<()> {
        let params = [
            ("domain-name", zone.to_string()),
            ("record-id", record_id.to_string()),
        ];
        let body = self.call("delete-record.json", &params).await?;

        let envelope: StatusResponse = parse_json(&body)?;
        if !envelope.is_success() {
            return Err(super::error::map_failure(
                &envelope.status_description,
                FailureContext::record(zone, record_id),
            ));
        }

        log::debug!("[cloudns] deleted record {record_id} in {zone}");
        Ok(())
    }
}
