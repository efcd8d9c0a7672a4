// # tudns-core
//
// Core library for keeping UniFi static DNS in sync with Traefik routers.
//
// ## Architecture Overview
//
// - **RouteSource**: Trait for reading routers that opted into DNS management
// - **AddressSource**: Trait for finding the host's own IPv4 address
// - **DnsManager**: Trait for one device's session and A-record upserts
// - **DeviceRouter**: Ordered hostname-pattern → device routing
// - **Reconciler**: One pass from address lookup through per-route upserts
// - **Scheduler**: Runs the reconciler at startup and on a fixed interval
//
// ## Design Principles
//
// 1. **Idempotency**: Never write when the listed record already matches
// 2. **Isolation**: One route's failure never aborts the batch
// 3. **Serialization**: Passes never overlap; no fan-out within a pass
// 4. **Fail Fast**: Bad patterns and intervals are rejected at startup

pub mod address;
pub mod config;
pub mod duration;
pub mod engine;
pub mod error;
pub mod record;
pub mod router;
pub mod rule;
pub mod traits;

// Re-export core types for convenience
pub use config::{AuthMode, DeviceConfig, SyncConfig};
pub use engine::{PassReport, Reconciler, RouteOutcome, RouteStatus, Scheduler};
pub use error::{Error, ErrorClass, Result};
pub use record::{AddressRecord, UpsertPlan, UpsertResult, plan_upsert};
pub use router::{DeviceRoute, DeviceRouter};
pub use rule::extract_hostname;
pub use traits::{AddressSource, DnsManager, DnsManagerFactory, ExposedRoute, RouteSource};
