use std::time::Duration;

use async_trait::async_trait;

/// Options for a single backend invocation
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    /// Cap on output units the backend may generate
    pub max_output_units: Option<u64>,
    /// Sampling temperature, if the backend supports it
    pub temperature: Option<f64>,
}

/// Result of a completed backend invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Generated output text
    pub output_text: String,
    /// Input units actually consumed, as reported by the backend
    pub input_units: u64,
    /// Output units actually generated
    pub output_units: u64,
}

/// Errors from the external backend invoker
///
/// The router never retries internally; transient/permanent
/// classification exists so callers can make their own retry decisions.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// Temporary failure, safe to retry
    #[error("transient backend failure: {0}")]
    Transient(String),

    /// Permanent failure, retrying the same backend will not help
    #[error("permanent backend failure: {0}")]
    Permanent(String),

    /// The invocation exceeded the caller-specified deadline
    #[error("backend invocation timed out after {after:?}")]
    Timeout {
        /// Deadline that was exceeded
        after: Duration,
    },
}

/// Executes a request against a chosen backend
///
/// Implemented by the LLM transport collaborator. Reports the units
/// actually consumed so the meter never has to guess.
#[async_trait]
pub trait BackendInvoker: Send + Sync {
    /// Invoke a backend with a prompt
    async fn invoke(&self, backend_id: &str, prompt: &str, options: &InvokeOptions)
    -> Result<Invocation, InvokeError>;
}
