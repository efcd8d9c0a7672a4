//! Reconciliation engine
//!
//! The [`Reconciler`] runs one pass: local address → routing table → for each
//! route, hostname → device → upsert. The [`Scheduler`] drives passes on a
//! fixed interval.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   ┌──────────────┐
//! │ AddressSource │   │ RouteSource  │
//! └───────────────┘   └──────────────┘
//!         │                  │
//!         └────────┬─────────┘
//!                  ▼
//!          ┌──────────────┐        ┌──────────────┐
//!          │  Reconciler  │──────▶ │ DeviceRouter │
//!          └──────────────┘        └──────────────┘
//!                                          │
//!                                          ▼
//!                                  ┌──────────────┐
//!                                  │  DnsManager  │ (one per device)
//!                                  └──────────────┘
//! ```
//!
//! ## Failure Policy
//!
//! 1. No local IPv4 address → pass aborts, no device contacted
//! 2. Route list unavailable → pass aborts
//! 3. Anything per route → logged, next route
//!
//! Nothing is retried within a pass; the next tick is the retry.

mod scheduler;

pub use scheduler::Scheduler;

use crate::error::{Error, Result};
use crate::record::UpsertResult;
use crate::router::DeviceRouter;
use crate::rule::extract_hostname;
use crate::traits::{AddressSource, RouteSource};
use chrono::{DateTime, Utc};
use std::net::Ipv4Addr;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// What happened to one route during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteStatus {
    /// The rule names no hostname
    NoHostname,
    /// No device pattern matches the hostname
    NoDevice,
    /// The device converged (with or without a write)
    Upserted(UpsertResult),
    /// Login, list or write failed
    Failed(String),
}

/// Per-route outcome, only ever logged and reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    /// Router name or rule
    pub route: String,
    /// Extracted hostname (empty if none)
    pub hostname: String,
    /// Device that handled it, if any
    pub device: Option<usize>,
    /// Result
    pub status: RouteStatus,
}

/// Summary of a completed pass
#[derive(Debug, Clone)]
pub struct PassReport {
    /// Address published for every hostname
    pub local_ip: Ipv4Addr,
    /// When the pass started
    pub started_at: DateTime<Utc>,
    /// When the pass finished
    pub finished_at: DateTime<Utc>,
    /// One entry per route, in source order
    pub outcomes: Vec<RouteOutcome>,
}

impl PassReport {
    /// Number of routes that caused a write
    pub fn writes(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(&o.status, RouteStatus::Upserted(r) if r.wrote()))
            .count()
    }

    /// Number of routes that failed at the device
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RouteStatus::Failed(_)))
            .count()
    }

    /// Number of routes skipped (no hostname or no device)
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RouteStatus::NoHostname | RouteStatus::NoDevice))
            .count()
    }
}

/// Orchestrates reconciliation passes
///
/// Passes are serialized by an internal lock that also holds the last-run
/// timestamp; a second caller waits for the running pass to finish.
pub struct Reconciler {
    /// Source of the address to publish
    address_source: Box<dyn AddressSource>,

    /// Source of exposed routes
    route_source: Box<dyn RouteSource>,

    /// Hostname → device routing
    router: DeviceRouter,

    /// Pass lock; holds the completion time of the last pass
    last_run: Mutex<Option<DateTime<Utc>>>,
}

impl Reconciler {
    /// Create a new reconciler
    pub fn new(
        address_source: Box<dyn AddressSource>,
        route_source: Box<dyn RouteSource>,
        router: DeviceRouter,
    ) -> Self {
        Self {
            address_source,
            route_source,
            router,
            last_run: Mutex::new(None),
        }
    }

    /// Completion time of the last pass that got past both aborting stages
    pub async fn last_run(&self) -> Option<DateTime<Utc>> {
        *self.last_run.lock().await
    }

    /// Run one reconciliation pass
    ///
    /// # Returns
    ///
    /// - `Ok(PassReport)`: The pass ran; per-route failures are in the report
    /// - `Err(Error)`: No local address or no route list
    pub async fn run_pass(&self) -> Result<PassReport> {
        let mut last_run = self.last_run.lock().await;
        let started_at = Utc::now();
        info!("Starting DNS update cycle");

        let local_ip = self.address_source.local_ipv4().await.map_err(|e| {
            error!(error = %e, "Failed to get local IP");
            match e {
                Error::LocalAddress(_) => e,
                other => Error::local_address(other.to_string()),
            }
        })?;
        info!(ip = %local_ip, "Using local IP");

        let routes = self.route_source.fetch_exposed_routes().await.map_err(|e| {
            error!(source = self.route_source.source_name(), error = %e, "Failed to get routers");
            match e {
                Error::RouteSource(_) => e,
                other => Error::route_source(other.to_string()),
            }
        })?;
        info!(count = routes.len(), "Retrieved routers");

        let mut outcomes = Vec::with_capacity(routes.len());
        for route in &routes {
            let hostname = extract_hostname(&route.rule);
            let mut outcome = RouteOutcome {
                route: route.label().to_string(),
                hostname: hostname.clone(),
                device: None,
                status: RouteStatus::NoHostname,
            };

            if hostname.is_empty() {
                debug!(route = route.label(), "No hostname in rule, skipping");
                outcomes.push(outcome);
                continue;
            }

            let Some(device) = self.router.resolve(&hostname) else {
                warn!(hostname = %hostname, "No matching DNS device found for hostname");
                outcome.status = RouteStatus::NoDevice;
                outcomes.push(outcome);
                continue;
            };
            outcome.device = Some(device.id);

            match device
                .client
                .upsert_address_record(&hostname, local_ip)
                .await
            {
                Ok(result) => {
                    match &result {
                        UpsertResult::Created => {
                            info!(hostname = %hostname, device = device.id, ip = %local_ip, "Created DNS record")
                        }
                        UpsertResult::Updated { previous } => {
                            info!(hostname = %hostname, device = device.id, ip = %local_ip, previous = %previous, "Updated DNS record")
                        }
                        UpsertResult::Unchanged => {
                            debug!(hostname = %hostname, device = device.id, "DNS record already up to date")
                        }
                    }
                    outcome.status = RouteStatus::Upserted(result);
                }
                Err(e) => {
                    let err = Error::device(device.id, device.client.endpoint(), &hostname, e);
                    error!(error = %err, "Failed to update DNS record");
                    outcome.status = RouteStatus::Failed(err.to_string());
                }
            }
            outcomes.push(outcome);
        }

        let finished_at = Utc::now();
        *last_run = Some(finished_at);

        let report = PassReport {
            local_ip,
            started_at,
            finished_at,
            outcomes,
        };
        info!(
            routes = report.outcomes.len(),
            writes = report.writes(),
            skipped = report.skipped(),
            failures = report.failures(),
            last_update = %finished_at.to_rfc3339(),
            "Completed DNS update cycle"
        );

        Ok(report)
    }
}
