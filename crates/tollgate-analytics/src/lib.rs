//! Usage analytics over the event log
//!
//! Read path only, eventually consistent: summaries and suggestions are
//! computed from whatever events the store returns, and an empty log is
//! a zeroed summary, not an error.

#![allow(clippy::must_use_candidate)]

mod advisor;

pub use advisor::{Suggestion, SuggestionRule};

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tollgate_core::{ResourceType, StoreError, UsageFilter, UsageStore};

/// Aggregate consumption for one resource type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceBreakdown {
    /// Units consumed
    pub units: u64,
    /// Cost of those units
    pub cost: Decimal,
    /// Number of events
    pub events: u64,
}

/// Aggregate consumption for an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageSummary {
    /// Units across all resource types
    pub total_units: u64,
    /// Cost across all resource types
    pub total_cost: Decimal,
    /// Per-resource-type breakdown
    pub by_resource_type: BTreeMap<ResourceType, ResourceBreakdown>,
}

impl UsageSummary {
    /// Total number of events in the summary
    pub fn total_events(&self) -> u64 {
        self.by_resource_type.values().map(|b| b.events).sum()
    }

    /// Breakdown for one resource type, zeroed when absent
    pub fn breakdown(&self, resource_type: ResourceType) -> ResourceBreakdown {
        self.by_resource_type.get(&resource_type).cloned().unwrap_or_default()
    }
}

/// Computes summaries and optimization suggestions from the event log
pub struct AnalyticsEngine {
    store: Arc<dyn UsageStore>,
}

impl AnalyticsEngine {
    /// Create an engine over a usage store
    pub fn new(store: Arc<dyn UsageStore>) -> Self {
        Self { store }
    }

    /// Summarize an account's usage under a filter
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be read; partial or
    /// empty data summarizes cleanly
    pub async fn summarize(&self, account_id: &str, filter: &UsageFilter) -> Result<UsageSummary, StoreError> {
        let events = self.store.events(account_id, filter).await?;

        let mut summary = UsageSummary::default();
        for event in &events {
            let breakdown = summary.by_resource_type.entry(event.resource_type).or_default();
            breakdown.units += event.unit_count;
            breakdown.cost += event.cost;
            breakdown.events += 1;

            summary.total_units += event.unit_count;
            summary.total_cost += event.cost;
        }

        tracing::debug!(account_id, events = events.len(), "usage summarized");
        Ok(summary)
    }

    /// Suggest optimizations for an account
    ///
    /// Deterministic threshold rules over the full event log, at most
    /// one suggestion per rule, ordered by estimated monthly savings
    /// descending.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be read
    pub async fn suggest(&self, account_id: &str) -> Result<Vec<Suggestion>, StoreError> {
        let summary = self.summarize(account_id, &UsageFilter::default()).await?;
        Ok(advisor::evaluate(&summary))
    }
}

impl std::fmt::Debug for AnalyticsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsEngine").finish_non_exhaustive()
    }
}
