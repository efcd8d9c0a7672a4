//! Hostname → device routing
//!
//! Devices are kept in declaration order and tested first to last; the first
//! pattern that finds a match anywhere in the hostname wins. Overlapping
//! patterns are allowed, and the earlier device always takes the hostname.

use crate::config::DeviceConfig;
use crate::error::Result;
use crate::traits::{DnsManager, DnsManagerFactory};
use regex::Regex;
use tracing::{debug, info};

/// One routable device
pub struct DeviceRoute {
    /// Ordinal device id (position in the configuration)
    pub id: usize,
    /// Compiled hostname pattern
    pub pattern: Regex,
    /// Client owning this device's session
    pub client: Box<dyn DnsManager>,
}

/// Ordered set of (pattern, client) pairs built once at startup
pub struct DeviceRouter {
    routes: Vec<DeviceRoute>,
}

impl DeviceRouter {
    /// Build the router from configuration
    ///
    /// Fails on the first empty or non-compiling pattern, or if the factory
    /// cannot build a client. Nothing is deferred to resolve time.
    ///
    /// # Parameters
    ///
    /// - `devices`: Device list in declaration order
    /// - `factory`: Builds one client per device
    /// - `insecure_skip_verify_tls`: Global TLS flag passed to the factory
    pub fn from_config(
        devices: &[DeviceConfig],
        factory: &dyn DnsManagerFactory,
        insecure_skip_verify_tls: bool,
    ) -> Result<Self> {
        let mut routes = Vec::with_capacity(devices.len());

        for (id, device) in devices.iter().enumerate() {
            let pattern = device.compile_pattern(id)?;
            let client = factory.create(device, insecure_skip_verify_tls)?;
            info!(
                device = id,
                endpoint = client.endpoint(),
                pattern = %pattern,
                "Registered DNS device"
            );
            routes.push(DeviceRoute {
                id,
                pattern,
                client,
            });
        }

        Ok(Self { routes })
    }

    /// Build a router from already compiled routes
    pub fn from_routes(routes: Vec<DeviceRoute>) -> Self {
        Self { routes }
    }

    /// Resolve a hostname to the device responsible for it
    ///
    /// Returns `None` when no pattern matches; callers skip the route.
    pub fn resolve(&self, hostname: &str) -> Option<&DeviceRoute> {
        let route = self.routes.iter().find(|r| r.pattern.is_match(hostname));
        match route {
            Some(r) => debug!(hostname, device = r.id, "Found matching device"),
            None => debug!(hostname, "No device pattern matches"),
        }
        route
    }

    /// Number of configured devices
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no device is configured
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
