// # Traefik Route Source
//
// Reads the Traefik HTTP routing table and returns the routers that opted
// into DNS management by attaching the marker middleware.
//
// ## Tolerated Encodings
//
// Traefik reports `middlewares` as a list of strings. Some setups report a
// single string instead; both are accepted. Entries that carry neither a
// string `rule` nor a recognizable middleware field are dropped one by one,
// so a malformed router never hides the others.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tudns_core::traits::{ExposedRoute, RouteSource};
use tudns_core::{Error, Result};

/// Routers endpoint relative to the API base URL
pub const ROUTERS_PATH: &str = "/api/http/routers";

/// Default HTTP timeout for API requests (10 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Traefik API route source
#[derive(Debug)]
pub struct TraefikRouteSource {
    /// API base URL without trailing slash
    base_url: String,

    /// Substring a middleware name must contain
    marker: String,

    /// HTTP client
    client: reqwest::Client,
}

impl TraefikRouteSource {
    /// Create a new Traefik route source
    ///
    /// # Parameters
    ///
    /// - `base_url`: Traefik API URL (e.g., "http://localhost:8080")
    /// - `marker`: Middleware name fragment that opts a router in
    /// - `insecure_skip_verify_tls`: Accept self-signed certificates
    pub fn new(
        base_url: &str,
        marker: impl Into<String>,
        insecure_skip_verify_tls: bool,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::info!(
            "Creating Traefik client for API URL: {} (insecureSkipVerify: {})",
            base_url,
            insecure_skip_verify_tls
        );

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .danger_accept_invalid_certs(insecure_skip_verify_tls)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            marker: marker.into(),
            client,
        })
    }
}

#[async_trait]
impl RouteSource for TraefikRouteSource {
    async fn fetch_exposed_routes(&self) -> Result<Vec<ExposedRoute>> {
        let url = format!("{}{}", self.base_url, ROUTERS_PATH);
        tracing::debug!("Fetching routers from Traefik API: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::route_source(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::route_source(format!(
                "status code {}",
                status.as_u16()
            )));
        }

        let raw: Vec<Value> = response
            .json()
            .await
            .map_err(|e| Error::route_source(format!("failed to decode router response: {}", e)))?;

        let total = raw.len();
        let routes: Vec<ExposedRoute> = raw
            .iter()
            .filter_map(parse_router)
            .filter(|route| route.has_marker(&self.marker))
            .collect();

        tracing::info!(
            "Retrieved {} of {} routers carrying the {} middleware",
            routes.len(),
            total,
            self.marker
        );
        Ok(routes)
    }

    fn source_name(&self) -> &'static str {
        "traefik"
    }
}

/// Convert one raw router entry, or `None` if it is malformed
fn parse_router(raw: &Value) -> Option<ExposedRoute> {
    let rule = match raw.get("rule").and_then(Value::as_str) {
        Some(rule) if !rule.is_empty() => rule,
        _ => {
            tracing::warn!("Router has invalid or missing rule, skipping");
            return None;
        }
    };

    let markers = match raw.get("middlewares") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(single)) => vec![single.clone()],
        _ => {
            tracing::warn!(rule, "Invalid middlewares format in router data, skipping");
            return None;
        }
    };

    let text = |field: &str| raw.get(field).and_then(Value::as_str).map(str::to_string);

    Some(ExposedRoute {
        rule: rule.to_string(),
        name: text("name"),
        service: text("service"),
        markers,
    })
}
