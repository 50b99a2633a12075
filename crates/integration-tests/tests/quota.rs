//! Quota enforcement across the full request flow

mod harness;

use std::collections::BTreeMap;
use std::sync::Arc;

use harness::backend::MockBackend;
use harness::config::ConfigBuilder;
use harness::directory::TestDirectory;
use jiff::Timestamp;
use rust_decimal::Decimal;
use tollgate_core::{ResourceType, UsageEvent, UsageStore};
use tollgate_gateway::{DenyReason, Gateway, RouteRequest};
use tollgate_quota::storage::MemoryUsageStore;
use uuid::Uuid;

fn gateway_over(
    store: Arc<MemoryUsageStore>,
    starter_limit: u64,
    backend: Arc<MockBackend>,
) -> Gateway {
    Gateway::new(
        &ConfigBuilder::new().with_starter_limit(starter_limit).build(),
        store,
        backend,
        Arc::new(TestDirectory::one_per_tier()),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn usage_accrues_until_the_limit_denies() {
    harness::init_logging();
    let store = Arc::new(MemoryUsageStore::new());
    // Each request commits 40 input + 10 output units against a limit of 100
    let gateway = gateway_over(Arc::clone(&store), 100, Arc::new(MockBackend::new(40, 10)));

    for _ in 0..2 {
        let result = gateway.route(RouteRequest::new("starter", "hi")).await.unwrap();
        assert!(!result.denied);
    }

    let result = gateway.route(RouteRequest::new("starter", "hi")).await.unwrap();
    assert!(result.denied);
    assert_eq!(
        result.deny_reason,
        Some(DenyReason::QuotaExceeded { limit: 100, remaining: 0 })
    );

    let status = gateway.get_quota_status("starter").await.unwrap();
    assert_eq!(status.used, 100);
    assert_eq!(status.remaining, 0);
    // Two committed requests, two events each
    assert_eq!(store.len(), 4);
}

#[tokio::test]
async fn failed_invocation_leaves_quota_untouched() {
    let store = Arc::new(MemoryUsageStore::new());
    let gateway = gateway_over(Arc::clone(&store), 100, Arc::new(MockBackend::failing(40, 10, 1)));

    assert!(gateway.route(RouteRequest::new("starter", "hi")).await.is_err());
    assert!(store.is_empty());
    assert_eq!(gateway.get_quota_status("starter").await.unwrap().used, 0);

    // The released reservation leaves room for the retry
    let result = gateway.route(RouteRequest::new("starter", "hi")).await.unwrap();
    assert!(!result.denied);
    assert_eq!(gateway.get_quota_status("starter").await.unwrap().used, 50);
}

#[tokio::test]
async fn concurrent_requests_never_oversubscribe_one_account() {
    let store = Arc::new(MemoryUsageStore::new());
    // 23 words estimate to ceil(23 * 1.3) = 30 units; the backend reports
    // the same 30 on commit
    let prompt = "word ".repeat(23).trim_end().to_owned();
    let gateway = Arc::new(gateway_over(Arc::clone(&store), 100, Arc::new(MockBackend::new(30, 0))));

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let gateway = Arc::clone(&gateway);
            let prompt = prompt.clone();
            tokio::spawn(async move { gateway.route(RouteRequest::new("starter", prompt)).await.unwrap() })
        })
        .collect();

    let mut admitted = 0;
    for task in tasks {
        if !task.await.unwrap().denied {
            admitted += 1;
        }
    }

    // 10 requests of 30 units against a limit of 100: at most 3 fit
    assert_eq!(admitted, 3);
    let status = gateway.get_quota_status("starter").await.unwrap();
    assert_eq!(status.used, 90);
}

#[tokio::test]
async fn status_reconciles_from_the_event_log() {
    let store = Arc::new(MemoryUsageStore::new());
    store
        .append(UsageEvent {
            event_id: Uuid::new_v4(),
            account_id: "starter".to_owned(),
            project_id: None,
            resource_type: ResourceType::Input,
            unit_count: 77,
            backend_id: Some("gpt-basic".to_owned()),
            cost: Decimal::ZERO,
            created_at: Timestamp::now(),
            metadata: BTreeMap::new(),
        })
        .await
        .unwrap();

    let gateway = gateway_over(store, 200, Arc::new(MockBackend::new(1, 1)));

    let first = gateway.get_quota_status("starter").await.unwrap();
    let second = gateway.get_quota_status("starter").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.used, 77);
    assert_eq!(first.remaining, 123);
}

#[tokio::test]
async fn tiers_are_isolated_from_each_other() {
    let store = Arc::new(MemoryUsageStore::new());
    let gateway = gateway_over(Arc::clone(&store), 100, Arc::new(MockBackend::new(40, 10)));

    let result = gateway.route(RouteRequest::new("starter", "hi")).await.unwrap();
    assert!(!result.denied);

    // Professional account shares no state with the starter account
    assert_eq!(gateway.get_quota_status("professional").await.unwrap().used, 0);
    assert_eq!(gateway.get_quota_status("starter").await.unwrap().used, 50);
}
