//! Record management for [ClouDNS](https://www.cloudns.net/) zones, built
//! for ACME DNS-01 automation.
//!
//! The crate is a thin adapter over the ClouDNS HTTP API with one piece of
//! real logic: [`CloudnsProvider::append_records`] recognizes ACME challenge
//! names (the `_acme-challenge.` prefix) and converges the zone to a single
//! challenge record per `(type, name)` instead of accumulating duplicates
//! across renewals.
//!
//! # Quick start
//!
//! ```no_run
//! use cloudns_provider::{CloudnsProvider, Credentials, Record, RecordType};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = CloudnsProvider::new(Credentials::new("1001", "s3cret"));
//!
//! let challenge = Record::new(
//!     RecordType::Txt,
//!     "_acme-challenge.www",
//!     "dns01-token-value",
//!     60,
//! );
//! let applied = provider.append_records("example.com.", &[challenge]).await?;
//! println!("challenge record id: {}", applied[0].id);
//! # Ok(())
//! # }
//! ```
//!
//! # Batches and errors
//!
//! The four operations (get / append / set / delete) take record batches and
//! process them sequentially, aborting on the first failure without rolling
//! back. The returned [`BatchError`] names the failing sub-operation
//! ([`ProviderError`]), the index of the failing record, and the records
//! already applied. Transport and API failures are classified as
//! [`ClientError`] and carried as the error source.
//!
//! # Custom transports
//!
//! [`CloudnsProvider`] is generic over [`RecordClient`], so the reconciliation
//! logic can be driven against any backend (or a test double) via
//! [`CloudnsProvider::with_client`].

mod cloudns;
mod error;
mod provider;
mod traits;
mod types;

pub use cloudns::CloudnsClient;
pub use error::{BatchError, ClientError, ClientResult, ProviderError};
pub use provider::CloudnsProvider;
pub use traits::RecordClient;
pub use types::{
    ACME_CHALLENGE_PREFIX, CredentialValidationError, Credentials, Record, RecordType,
    normalize_zone,
};
