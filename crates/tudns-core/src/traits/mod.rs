//! Core traits for tudns
//!
//! This module defines the seams between the engine and its collaborators.
//!
//! - [`DnsManager`]: Per-device session and address-record upserts
//! - [`RouteSource`]: Hostnames currently exposed by the reverse proxy
//! - [`AddressSource`]: The host's own reachable IPv4 address

pub mod address_source;
pub mod dns_manager;
pub mod route_source;

pub use address_source::AddressSource;
pub use dns_manager::{DnsManager, DnsManagerFactory};
pub use route_source::{ExposedRoute, RouteSource};
