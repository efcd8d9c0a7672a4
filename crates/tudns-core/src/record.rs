//! Address records and upsert planning
//!
//! The decision "create, update or leave alone" is made here, without I/O,
//! from a freshly listed set of records. Clients list, plan, then write.

use std::net::Ipv4Addr;

/// An address (A) record as held by a DNS-managing device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// Opaque remote identifier, used for update-in-place
    pub id: String,
    /// Hostname key
    pub hostname: String,
    /// Current value as stored remotely
    pub value: String,
}

impl AddressRecord {
    /// Create a new record
    pub fn new(
        id: impl Into<String>,
        hostname: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            hostname: hostname.into(),
            value: value.into(),
        }
    }

    /// Whether the stored value already points at `ip`
    pub fn points_to(&self, ip: Ipv4Addr) -> bool {
        self.value.trim().parse::<Ipv4Addr>().is_ok_and(|v| v == ip)
    }
}

/// What a client must do to converge one hostname
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertPlan {
    /// Record exists with the target IP; no write
    Unchanged,
    /// Record exists with another value; update it in place
    Update {
        /// Remote id of the existing record
        id: String,
        /// The value being replaced
        previous: String,
    },
    /// No record for the hostname; create one
    Create,
}

/// Result of an upsert, reported back to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertResult {
    /// A new record was created
    Created,
    /// An existing record was rewritten
    Updated {
        /// Previous value
        previous: String,
    },
    /// Record already matched (no write issued)
    Unchanged,
}

impl UpsertResult {
    /// Whether a write call was issued
    pub fn wrote(&self) -> bool {
        !matches!(self, UpsertResult::Unchanged)
    }
}

/// Decide how to converge `hostname` onto `ip` given the remote records
///
/// The first record whose hostname equals `hostname` is authoritative.
pub fn plan_upsert(records: &[AddressRecord], hostname: &str, ip: Ipv4Addr) -> UpsertPlan {
    match records.iter().find(|r| r.hostname == hostname) {
        Some(record) if record.points_to(ip) => UpsertPlan::Unchanged,
        Some(record) => UpsertPlan::Update {
            id: record.id.clone(),
            previous: record.value.clone(),
        },
        None => UpsertPlan::Create,
    }
}
