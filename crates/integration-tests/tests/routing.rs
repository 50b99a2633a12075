//! End-to-end routing through the gateway

mod harness;

use std::sync::Arc;
use std::time::Duration;

use harness::backend::MockBackend;
use harness::config::ConfigBuilder;
use harness::directory::TestDirectory;
use rust_decimal_macros::dec;
use tollgate_core::{ComplexityLevel, InvokeError};
use tollgate_gateway::{Gateway, GatewayError, RouteRequest};
use tollgate_quota::storage::MemoryUsageStore;

fn gateway(config: &tollgate_config::Config, backend: Arc<MockBackend>) -> Gateway {
    Gateway::new(
        config,
        Arc::new(MemoryUsageStore::new()),
        backend,
        Arc::new(TestDirectory::one_per_tier()),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn simple_prompt_routes_to_the_cheap_backend() {
    harness::init_logging();
    let backend = Arc::new(MockBackend::new(1000, 200));
    let gateway = gateway(&ConfigBuilder::new().build(), Arc::clone(&backend));

    let result = gateway.route(RouteRequest::new("starter", "hi")).await.unwrap();

    assert!(!result.denied);
    assert_eq!(result.complexity, ComplexityLevel::Simple);
    assert_eq!(result.backend_used.as_deref(), Some("gpt-basic"));
    assert_eq!(result.units_used, 1200);
    assert_eq!(result.cost, dec!(0.001900));
    assert_eq!(result.text.as_deref(), Some("response from gpt-basic"));
    assert_eq!(backend.invocations(), 1);
}

#[tokio::test]
async fn critical_pattern_overrides_the_size_bucket() {
    let backend = Arc::new(MockBackend::new(5000, 1000));
    let gateway = gateway(&ConfigBuilder::new().build(), Arc::clone(&backend));

    // 600+ characters, but the intent pattern decides
    let filler = "the rollout plan covers several regions and services. ".repeat(11);
    let prompt = format!("Review our production deployment architecture before launch. {filler}");
    assert!(prompt.len() > 600);

    let result = gateway.route(RouteRequest::new("starter", &prompt)).await.unwrap();

    assert_eq!(result.complexity, ComplexityLevel::Critical);
    assert_eq!(result.backend_used.as_deref(), Some("gpt-plus"));
}

#[tokio::test]
async fn higher_tiers_get_equal_or_better_quality() {
    let quality = |backend_id: &str| match backend_id {
        "gpt-basic" => 62,
        "gpt-plus" => 78,
        "gpt-frontier" => 95,
        other => panic!("unexpected backend {other}"),
    };

    let backend = Arc::new(MockBackend::new(100, 50));
    let gateway = gateway(&ConfigBuilder::new().build(), backend);

    let prompt = "Design and implement an algorithm to optimize our data pipeline architecture across multiple services";
    let mut last = 0;
    for account_id in ["starter", "professional", "enterprise"] {
        let result = gateway.route(RouteRequest::new(account_id, prompt)).await.unwrap();
        let score = quality(result.backend_used.as_deref().unwrap());
        assert!(score >= last, "quality regressed for {account_id}");
        last = score;
    }
}

#[tokio::test(start_paused = true)]
async fn slow_backend_times_out_without_charge() {
    let backend = Arc::new(MockBackend::slow(100, 50, Duration::from_secs(120)));
    let config = ConfigBuilder::new().with_invoke_timeout(1).build();
    let gateway = gateway(&config, backend);

    let err = gateway.route(RouteRequest::new("starter", "hi")).await.unwrap_err();
    match err {
        GatewayError::Invocation {
            backend_id,
            complexity,
            source,
        } => {
            assert_eq!(backend_id, "gpt-basic");
            assert_eq!(complexity, ComplexityLevel::Simple);
            assert!(matches!(source, InvokeError::Timeout { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }

    let status = gateway.get_quota_status("starter").await.unwrap();
    assert_eq!(status.used, 0);
}

#[tokio::test]
async fn transient_backend_failure_surfaces_retry_context() {
    let backend = Arc::new(MockBackend::failing(100, 50, 1));
    let gateway = gateway(&ConfigBuilder::new().build(), Arc::clone(&backend));

    let err = gateway.route(RouteRequest::new("starter", "hi")).await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Invocation {
            source: InvokeError::Transient(_),
            ..
        }
    ));

    // The gateway never retries internally; the caller does
    assert_eq!(backend.invocations(), 1);
    let result = gateway.route(RouteRequest::new("starter", "hi")).await.unwrap();
    assert!(!result.denied);
}
