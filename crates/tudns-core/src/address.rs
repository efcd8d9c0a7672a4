//! Local address selection

use std::net::{IpAddr, Ipv4Addr};

/// Pick the first non-loopback IPv4 address, in the order given
pub fn select_local_ipv4<I>(addrs: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = IpAddr>,
{
    addrs.into_iter().find_map(|addr| match addr {
        IpAddr::V4(v4) if !v4.is_loopback() => Some(v4),
        _ => None,
    })
}
