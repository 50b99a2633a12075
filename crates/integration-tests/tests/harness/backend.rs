//! Mock backend invoker returning canned invocations

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tollgate_core::{BackendInvoker, Invocation, InvokeError, InvokeOptions};

/// Backend that reports fixed unit counts and tracks calls
pub struct MockBackend {
    input_units: u64,
    output_units: u64,
    /// Fail this many invocations before succeeding
    fail_count: AtomicU32,
    invocations: AtomicU32,
    delay: Option<Duration>,
}

impl MockBackend {
    pub fn new(input_units: u64, output_units: u64) -> Self {
        Self {
            input_units,
            output_units,
            fail_count: AtomicU32::new(0),
            invocations: AtomicU32::new(0),
            delay: None,
        }
    }

    /// Fail the first `n` invocations with a transient error
    pub fn failing(input_units: u64, output_units: u64, n: u32) -> Self {
        let backend = Self::new(input_units, output_units);
        backend.fail_count.store(n, Ordering::SeqCst);
        backend
    }

    /// Sleep before answering, to trip invocation timeouts
    pub fn slow(input_units: u64, output_units: u64, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(input_units, output_units)
        }
    }

    pub fn invocations(&self) -> u32 {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendInvoker for MockBackend {
    async fn invoke(
        &self,
        backend_id: &str,
        _prompt: &str,
        _options: &InvokeOptions,
    ) -> Result<Invocation, InvokeError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let remaining = self
            .fail_count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if remaining {
            return Err(InvokeError::Transient("mock backend unavailable".to_owned()));
        }

        Ok(Invocation {
            output_text: format!("response from {backend_id}"),
            input_units: self.input_units,
            output_units: self.output_units,
        })
    }
}
