//! Test doubles and common utilities for engine contract tests
//!
//! These doubles count calls so tests can assert which collaborators were
//! contacted, and how often.

#![allow(dead_code)]

use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tudns_core::error::{Error, Result};
use tudns_core::record::{AddressRecord, UpsertPlan, UpsertResult, plan_upsert};
use tudns_core::traits::{AddressSource, DnsManager, ExposedRoute, RouteSource};
use tudns_core::{DeviceRoute, DeviceRouter, Reconciler};

/// Address source returning a fixed IP
pub struct FixedAddressSource {
    ip: Ipv4Addr,
    calls: Arc<AtomicUsize>,
}

impl FixedAddressSource {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            ip,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl AddressSource for FixedAddressSource {
    async fn local_ipv4(&self) -> Result<Ipv4Addr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip)
    }
}

/// Address source for a host with no usable IPv4 address
pub struct NoAddressSource;

#[async_trait]
impl AddressSource for NoAddressSource {
    async fn local_ipv4(&self) -> Result<Ipv4Addr> {
        Err(Error::local_address("no suitable IP address found"))
    }
}

/// Route source serving a fixed list, or failing
pub struct StaticRouteSource {
    routes: Vec<ExposedRoute>,
    fail: bool,
    fetch_count: Arc<AtomicUsize>,
}

impl StaticRouteSource {
    pub fn new(rules: &[&str]) -> Self {
        Self {
            routes: rules
                .iter()
                .map(|r| ExposedRoute::new(*r).with_marker("traefikunifidns@file"))
                .collect(),
            fail: false,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            routes: Vec::new(),
            fail: true,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            routes: other.routes.clone(),
            fail: other.fail,
            fetch_count: Arc::clone(&other.fetch_count),
        }
    }
}

#[async_trait]
impl RouteSource for StaticRouteSource {
    async fn fetch_exposed_routes(&self) -> Result<Vec<ExposedRoute>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::route_source("status code 502"));
        }
        Ok(self.routes.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// In-memory DNS device that tracks calls
///
/// Upserts follow the same list → plan → write sequence as real clients.
pub struct MockDnsManager {
    endpoint: String,
    records: Arc<Mutex<Vec<AddressRecord>>>,
    upsert_count: Arc<AtomicUsize>,
    create_count: Arc<AtomicUsize>,
    update_count: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    fail_writes: bool,
    delay: Duration,
}

impl MockDnsManager {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            records: Arc::new(Mutex::new(Vec::new())),
            upsert_count: Arc::new(AtomicUsize::new(0)),
            create_count: Arc::new(AtomicUsize::new(0)),
            update_count: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            fail_writes: false,
            delay: Duration::ZERO,
        }
    }

    /// Every write answers with a 500
    pub fn failing(endpoint: &str) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(endpoint)
        }
    }

    /// Each upsert takes `delay`
    pub fn slow(endpoint: &str, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(endpoint)
        }
    }

    pub fn with_record(self, record: AddressRecord) -> Self {
        self.records.lock().unwrap().push(record);
        self
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            endpoint: other.endpoint.clone(),
            records: Arc::clone(&other.records),
            upsert_count: Arc::clone(&other.upsert_count),
            create_count: Arc::clone(&other.create_count),
            update_count: Arc::clone(&other.update_count),
            in_flight: Arc::clone(&other.in_flight),
            max_in_flight: Arc::clone(&other.max_in_flight),
            fail_writes: other.fail_writes,
            delay: other.delay,
        }
    }

    pub fn upsert_count(&self) -> usize {
        self.upsert_count.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.create_count.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.create_count() + self.update_count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<AddressRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsManager for MockDnsManager {
    async fn login(&self) -> Result<()> {
        Ok(())
    }

    async fn list_address_records(&self) -> Result<Vec<AddressRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn upsert_address_record(&self, hostname: &str, ip: Ipv4Addr) -> Result<UpsertResult> {
        self.upsert_count.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let records = self.list_address_records().await?;
        let result = match plan_upsert(&records, hostname, ip) {
            UpsertPlan::Unchanged => Ok(UpsertResult::Unchanged),
            _ if self.fail_writes => Err(Error::status("DNS operation", 500)),
            UpsertPlan::Update { id, previous } => {
                self.update_count.fetch_add(1, Ordering::SeqCst);
                let mut records = self.records.lock().unwrap();
                if let Some(r) = records.iter_mut().find(|r| r.id == id) {
                    r.value = ip.to_string();
                }
                Ok(UpsertResult::Updated { previous })
            }
            UpsertPlan::Create => {
                self.create_count.fetch_add(1, Ordering::SeqCst);
                let mut records = self.records.lock().unwrap();
                let id = format!("id-{}", records.len() + 1);
                records.push(AddressRecord::new(id, hostname, ip.to_string()));
                Ok(UpsertResult::Created)
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Build a router from (pattern, manager) pairs in declaration order
pub fn router(devices: Vec<(&str, MockDnsManager)>) -> DeviceRouter {
    DeviceRouter::from_routes(
        devices
            .into_iter()
            .enumerate()
            .map(|(id, (pattern, manager))| DeviceRoute {
                id,
                pattern: regex::Regex::new(pattern).unwrap(),
                client: Box::new(manager),
            })
            .collect(),
    )
}

/// Build a reconciler publishing `ip`
pub fn reconciler(ip: Ipv4Addr, routes: StaticRouteSource, router: DeviceRouter) -> Reconciler {
    Reconciler::new(Box::new(FixedAddressSource::new(ip)), Box::new(routes), router)
}

pub const LOCAL_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 10);
