use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name prefix marking ACME DNS-01 challenge records.
///
/// Records whose (zone-relative) name starts with this prefix get
/// converge-instead-of-append treatment in
/// [`CloudnsProvider::append_records`](crate::CloudnsProvider::append_records).
pub const ACME_CHALLENGE_PREFIX: &str = "_acme-challenge.";

/// Strip any trailing root-label dot from a zone name.
///
/// `"example.com."` and `"example.com"` are interchangeable everywhere a
/// zone is accepted.
pub fn normalize_zone(zone: &str) -> &str {
    zone.trim_end_matches('.')
}

// ============ Record types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"TXT"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl RecordType {
    /// Uppercase wire representation, as the ClouDNS API expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }

    /// Parse a record type string, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "A" => Some(Self::A),
            "AAAA" => Some(Self::Aaaa),
            "CNAME" => Some(Self::Cname),
            "MX" => Some(Self::Mx),
            "TXT" => Some(Self::Txt),
            "NS" => Some(Self::Ns),
            "SRV" => Some(Self::Srv),
            "CAA" => Some(Self::Caa),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single DNS resource record.
///
/// Records are ephemeral value objects: callers build them without an id,
/// the remote API assigns one on creation, and every mutation returns a new
/// `Record` reflecting the remote state. Identity during reconciliation is
/// the `(record_type, name)` pair; `id` distinguishes concrete instances
/// once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Provider-assigned record identifier; empty until created.
    #[serde(default)]
    pub id: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Zone-relative record name (e.g. `"www"` or `"_acme-challenge.www"`).
    pub name: String,
    /// Record value.
    pub value: String,
    /// Time to live in seconds.
    pub ttl: u32,
}

impl Record {
    /// Build a candidate record with no id, ready for creation.
    pub fn new(
        record_type: RecordType,
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            id: String::new(),
            record_type,
            name: name.into(),
            value: value.into(),
            ttl,
        }
    }

    /// Whether this record's name carries the ACME challenge prefix.
    #[must_use]
    pub fn is_acme_challenge(&self) -> bool {
        self.name.starts_with(ACME_CHALLENGE_PREFIX)
    }

    /// Whether `other` names the same logical record (same type and name).
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.record_type == other.record_type && self.name == other.name
    }
}

/// Order record ids numerically when both parse as integers, falling back to
/// lexicographic order. Provider ids are decimal strings, so numeric order
/// matches creation order.
pub(crate) fn compare_record_ids(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

// ============ Credentials ============

/// Validation error for ClouDNS API credentials.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    #[error("missing required field: {label}")]
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty or whitespace-only.
    #[error("field must not be empty: {label}")]
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

/// ClouDNS API credentials, supplied at provider construction and passed
/// through unchanged on every request.
///
/// Either a main account id or a sub-account id works; when `sub_auth_id`
/// is set it is sent instead of `auth_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Main account API user id.
    pub auth_id: String,
    /// Sub-account API user id, if the account uses one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_auth_id: Option<String>,
    /// API password.
    pub auth_password: String,
}

impl Credentials {
    /// Credentials for a main API account.
    pub fn new(auth_id: impl Into<String>, auth_password: impl Into<String>) -> Self {
        Self {
            auth_id: auth_id.into(),
            sub_auth_id: None,
            auth_password: auth_password.into(),
        }
    }

    /// Construct credentials from a flat key-value map, validating required
    /// fields. Keys: `authId`, `subAuthId` (optional), `authPassword`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing
    /// or empty.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            auth_id: Self::get_required_field(map, "authId", "Auth ID")?,
            sub_auth_id: map
                .get("subAuthId")
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(ToString::to_string),
            auth_password: Self::get_required_field(map, "authPassword", "Auth Password")?,
        })
    }

    fn get_required_field(
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert credentials to a flat key-value map for storage.
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = [
            ("authId".to_string(), self.auth_id.clone()),
            ("authPassword".to_string(), self.auth_password.clone()),
        ]
        .into();
        if let Some(sub) = &self.sub_auth_id {
            map.insert("subAuthId".to_string(), sub.clone());
        }
        map
    }
}
