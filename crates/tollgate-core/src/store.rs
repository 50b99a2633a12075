use async_trait::async_trait;

use crate::{UsageEvent, UsageFilter};

/// Errors surfaced by a usage store implementation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The durable store cannot be reached
    #[error("usage store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected a write
    #[error("usage store rejected write: {0}")]
    Rejected(String),
}

/// Append-only usage event log with range queries
///
/// Implemented by the persistence collaborator. Events for one account
/// must be returned in commit order; no ordering is guaranteed across
/// accounts. The quota ledger serializes its own read-modify-write per
/// account, so the store itself only needs atomic single-event appends.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Append one immutable event to the log
    async fn append(&self, event: UsageEvent) -> Result<(), StoreError>;

    /// Query events for an account, in commit order
    async fn events(&self, account_id: &str, filter: &UsageFilter) -> Result<Vec<UsageEvent>, StoreError>;

    /// Sum of `unit_count` over matching events
    ///
    /// Default implementation folds over `events`; stores with native
    /// aggregation can override.
    async fn total_units(&self, account_id: &str, filter: &UsageFilter) -> Result<u64, StoreError> {
        let events = self.events(account_id, filter).await?;
        Ok(events.iter().map(|e| e.unit_count).sum())
    }
}
