// # DNS Manager Trait
//
// Defines the interface for a single DNS-managing device (a UniFi controller).
//
// ## Implementations
//
// - UniFi Network: `tudns-provider-unifi` crate
//
// ## Usage
//
// ```rust,ignore
// use tudns_core::DnsManager;
//
// let client = /* DnsManager implementation */;
// let result = client
//     .upsert_address_record("app.example.com", "192.168.1.10".parse()?)
//     .await?;
// ```

use crate::config::DeviceConfig;
use crate::error::Result;
use crate::record::{AddressRecord, UpsertResult};
use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for DNS-managing device clients
///
/// A client owns one device's session. The session starts unauthenticated,
/// is created lazily on first need and may be dropped and recreated any
/// number of times. Sessions are never shared between devices.
///
/// # Session Expiry
///
/// A 401 from a business request downgrades the session to unauthenticated.
/// [`DnsManager::upsert_address_record`] retries the whole read-then-write
/// once after such a downgrade; nothing else retries.
///
/// # Idempotency
///
/// `upsert_address_record` must never issue a write when the listed record
/// already holds the target IP.
#[async_trait]
pub trait DnsManager: Send + Sync {
    /// Exchange credentials for a session token
    ///
    /// A success response without the expected token artifact is an error.
    async fn login(&self) -> Result<()>;

    /// List every address record currently held by the device
    ///
    /// Logs in first if the session is unauthenticated. Other failures
    /// propagate without a re-login.
    async fn list_address_records(&self) -> Result<Vec<AddressRecord>>;

    /// Create, update or leave alone the record for `hostname`
    ///
    /// # Parameters
    ///
    /// - `hostname`: The record key (e.g., "app.example.com")
    /// - `ip`: The address the record must point at
    ///
    /// # Returns
    ///
    /// - `Ok(UpsertResult)`: What was done
    /// - `Err(Error)`: Login, list or write failure
    async fn upsert_address_record(&self, hostname: &str, ip: Ipv4Addr) -> Result<UpsertResult>;

    /// The device endpoint, for logging
    fn endpoint(&self) -> &str;
}

/// Builds a [`DnsManager`] for one configured device
pub trait DnsManagerFactory: Send + Sync {
    /// Create a client for `device`
    ///
    /// `insecure_skip_verify_tls` is the global TLS flag; implementations
    /// OR it with the per-device flag.
    fn create(
        &self,
        device: &DeviceConfig,
        insecure_skip_verify_tls: bool,
    ) -> Result<Box<dyn DnsManager>>;
}
