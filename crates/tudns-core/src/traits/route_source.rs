// # Route Source Trait
//
// Defines the interface for reading the reverse proxy's routing table.
//
// ## Implementations
//
// - Traefik API: `tudns-routes-traefik` crate

use crate::error::Result;
use async_trait::async_trait;

/// One router entry that opted into DNS management
///
/// Recreated on every poll; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExposedRoute {
    /// Rule expression, e.g. ``Host(`app.example.com`)``
    pub rule: String,
    /// Router name, if reported
    pub name: Option<String>,
    /// Service label, if reported
    pub service: Option<String>,
    /// Marker labels (middleware names) attached to the route
    pub markers: Vec<String>,
}

impl ExposedRoute {
    /// Create a route from a rule
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            ..Self::default()
        }
    }

    /// Set the router name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a marker label
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// Whether any attached label carries `marker`
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m.contains(marker))
    }

    /// Label for logs: the router name, falling back to the rule
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.rule)
    }
}

/// Trait for routing-table sources
///
/// Implementations issue one read per call, drop malformed entries instead of
/// failing the whole fetch, keep the order received and do not dedup.
#[async_trait]
pub trait RouteSource: Send + Sync {
    /// Fetch the routes that carry the DNS marker
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ExposedRoute>)`: Marked routes, in source order
    /// - `Err(Error)`: Transport failure, non-success status or undecodable body
    async fn fetch_exposed_routes(&self) -> Result<Vec<ExposedRoute>>;

    /// Source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
