// # Interface Address Source
//
// Finds the IPv4 address to publish by enumerating the host's network
// interfaces.
//
// ## Selection
//
// Interfaces are read in the order the operating system reports them. The
// first address that is IPv4 and not loopback wins. There is no preference
// for a particular interface name or subnet.

use async_trait::async_trait;
use std::net::Ipv4Addr;
use tudns_core::address::select_local_ipv4;
use tudns_core::traits::AddressSource;
use tudns_core::{Error, Result};

/// Host interface address source
#[derive(Debug, Default, Clone, Copy)]
pub struct InterfaceAddressSource;

impl InterfaceAddressSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AddressSource for InterfaceAddressSource {
    async fn local_ipv4(&self) -> Result<Ipv4Addr> {
        let interfaces = if_addrs::get_if_addrs()
            .map_err(|e| Error::local_address(format!("failed to list interfaces: {}", e)))?;

        tracing::debug!("Found {} interface addresses", interfaces.len());

        select_local_ipv4(interfaces.iter().map(|iface| iface.ip()))
            .ok_or_else(|| Error::local_address("no suitable IP address found"))
    }
}
