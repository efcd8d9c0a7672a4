// # Address Source Trait
//
// Defines how the engine learns the IPv4 address to publish for every
// exposed hostname.
//
// ## Implementations
//
// - Host interfaces: `tudns-ip-interface` crate

use crate::error::Result;
use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for local address sources
///
/// Asked once at the start of every pass. An error aborts the pass before
/// any device is contacted.
#[async_trait]
pub trait AddressSource: Send + Sync {
    /// The first non-loopback IPv4 address of this host
    async fn local_ipv4(&self) -> Result<Ipv4Addr>;
}
