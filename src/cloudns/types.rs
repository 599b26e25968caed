//! ClouDNS API response envelopes.
//!
//! Mutation endpoints answer with a status envelope; `records.json` answers
//! with a JSON object keyed by record id, where every field value is a
//! string. An empty zone comes back as an empty JSON *array* instead of an
//! empty object, so the listing shape is an untagged union.

use std::collections::HashMap;

use serde::Deserialize;

/// Status envelope returned by mutation endpoints and `login.json`:
/// `{"status":"Success","statusDescription":"..."}`.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default, rename = "statusDescription")]
    pub status_description: String,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        self.status == "Success"
    }
}

/// `add-record.json` response: status envelope plus the new record id.
#[derive(Debug, Deserialize)]
pub struct AddRecordResponse {
    pub status: String,
    #[serde(default, rename = "statusDescription")]
    pub status_description: String,
    pub data: Option<AddRecordData>,
}

#[derive(Debug, Deserialize)]
pub struct AddRecordData {
    pub id: u64,
}

impl AddRecordResponse {
    pub fn is_success(&self) -> bool {
        self.status == "Success"
    }
}

/// A single entry of the `records.json` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub host: String,
    pub record: String,
    pub ttl: String,
}

/// `records.json` success body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordsResponse {
    Map(HashMap<String, ApiRecord>),
    Empty(Vec<ApiRecord>),
}

impl RecordsResponse {
    /// Flatten into a record list ordered by numeric id, so listings are
    /// deterministic regardless of JSON object iteration order.
    pub fn into_sorted(self) -> Vec<ApiRecord> {
        let mut records = match self {
            Self::Map(map) => map.into_values().collect::<Vec<_>>(),
            Self::Empty(records) => records,
        };
        records.sort_by(|a, b| crate::types::compare_record_ids(&a.id, &b.id));
        records
    }
}
