use async_trait::async_trait;
use dashmap::DashMap;
use tollgate_core::{StoreError, UsageEvent, UsageFilter, UsageStore};

/// In-memory usage event log
///
/// Append order per account is commit order. Single instance only:
/// quota enforced against this store does not survive a restart, which
/// is acceptable for tests and development but not production.
#[derive(Debug, Default)]
pub struct MemoryUsageStore {
    events: DashMap<String, Vec<UsageEvent>>,
}

impl MemoryUsageStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total events across all accounts
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.iter().map(|entry| entry.value().len()).sum()
    }

    /// Whether the store holds no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UsageStore for MemoryUsageStore {
    async fn append(&self, event: UsageEvent) -> Result<(), StoreError> {
        self.events.entry(event.account_id.clone()).or_default().push(event);
        Ok(())
    }

    async fn events(&self, account_id: &str, filter: &UsageFilter) -> Result<Vec<UsageEvent>, StoreError> {
        Ok(self.events.get(account_id).map_or_else(Vec::new, |entry| {
            entry.iter().filter(|e| filter.matches(e)).cloned().collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;
    use tollgate_core::ResourceType;
    use uuid::Uuid;

    fn event(account_id: &str, resource_type: ResourceType, units: u64) -> UsageEvent {
        UsageEvent {
            event_id: Uuid::new_v4(),
            account_id: account_id.to_owned(),
            project_id: None,
            resource_type,
            unit_count: units,
            backend_id: None,
            cost: Decimal::ZERO,
            created_at: Timestamp::now(),
            metadata: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn events_come_back_in_commit_order() {
        let store = MemoryUsageStore::new();
        for units in [1, 2, 3] {
            store.append(event("acct-1", ResourceType::Input, units)).await.unwrap();
        }

        let events = store.events("acct-1", &UsageFilter::default()).await.unwrap();
        let units: Vec<u64> = events.iter().map(|e| e.unit_count).collect();
        assert_eq!(units, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn accounts_are_isolated() {
        let store = MemoryUsageStore::new();
        store.append(event("acct-1", ResourceType::Input, 5)).await.unwrap();
        store.append(event("acct-2", ResourceType::Input, 7)).await.unwrap();

        assert_eq!(store.total_units("acct-1", &UsageFilter::default()).await.unwrap(), 5);
        assert_eq!(store.total_units("acct-2", &UsageFilter::default()).await.unwrap(), 7);
        assert!(store.events("acct-3", &UsageFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn filter_by_resource_type() {
        let store = MemoryUsageStore::new();
        store.append(event("acct-1", ResourceType::Input, 5)).await.unwrap();
        store.append(event("acct-1", ResourceType::Embedding, 9)).await.unwrap();

        let filter = UsageFilter {
            resource_type: Some(ResourceType::Embedding),
            ..Default::default()
        };
        assert_eq!(store.total_units("acct-1", &filter).await.unwrap(), 9);
    }
}
