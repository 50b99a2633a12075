use std::collections::BTreeMap;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ResourceType;

/// A single completed unit of billable work
///
/// Created exactly once per completed request and never mutated. The
/// event log is the authoritative record; quota counters are projections
/// of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Unique event identifier
    pub event_id: Uuid,
    /// Account that consumed the resource
    pub account_id: String,
    /// Optional project attribution
    pub project_id: Option<String>,
    /// What kind of resource was consumed
    pub resource_type: ResourceType,
    /// Number of units consumed
    pub unit_count: u64,
    /// Backend that served the request, if any
    pub backend_id: Option<String>,
    /// Derived monetary cost, 6 decimal places
    pub cost: Decimal,
    /// When the event was committed
    pub created_at: Timestamp,
    /// Bounded opaque key-value metadata
    pub metadata: BTreeMap<String, String>,
}

/// Filter for querying the usage event log
#[derive(Debug, Clone, Default)]
pub struct UsageFilter {
    /// Inclusive lower bound on `created_at`
    pub from: Option<Timestamp>,
    /// Exclusive upper bound on `created_at`
    pub to: Option<Timestamp>,
    /// Restrict to one resource type
    pub resource_type: Option<ResourceType>,
    /// Restrict to one project
    pub project_id: Option<String>,
}

impl UsageFilter {
    /// Filter covering `[from, to)`
    pub const fn period(from: Timestamp, to: Timestamp) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            resource_type: None,
            project_id: None,
        }
    }

    /// Whether an event passes this filter
    pub fn matches(&self, event: &UsageEvent) -> bool {
        if self.from.is_some_and(|from| event.created_at < from) {
            return false;
        }
        if self.to.is_some_and(|to| event.created_at >= to) {
            return false;
        }
        if self.resource_type.is_some_and(|rt| event.resource_type != rt) {
            return false;
        }
        if let Some(ref project) = self.project_id
            && event.project_id.as_deref() != Some(project.as_str())
        {
            return false;
        }
        true
    }
}

/// Cached projection of an account's current-period consumption
///
/// Reconcilable from the event log at any time; never the sole source
/// of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaRecord {
    /// Account this record belongs to
    pub account_id: String,
    /// Unit limit for the current period
    pub period_limit: u64,
    /// Units consumed in the current period
    pub period_used: u64,
    /// Next period boundary
    pub reset_at: Timestamp,
}

/// Point-in-time quota standing for an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaStatus {
    /// Unit limit for the current period
    pub limit: u64,
    /// Units consumed in the current period
    pub used: u64,
    /// Units still available
    pub remaining: u64,
}
