//! Optional LLM-backed complexity probe
//!
//! A probe is a fallback-ranked alternative to the heuristic: when it
//! answers in time its level is used, and on any error or timeout the
//! deterministic heuristic decides instead. Classification stays total.

use std::time::Duration;

use async_trait::async_trait;
use tollgate_core::ComplexityLevel;

use crate::{Classifier, Context};

/// Probe failure; absorbed by the heuristic fallback
#[derive(Debug, thiserror::Error)]
#[error("complexity probe failed: {0}")]
pub struct ProbeError(pub String);

/// Model-backed complexity assessment
#[async_trait]
pub trait ComplexityProbe: Send + Sync {
    /// Assess the complexity of request text
    async fn assess(&self, text: &str) -> Result<ComplexityLevel, ProbeError>;
}

impl Classifier {
    /// Classify with a probe, falling back to the heuristic
    ///
    /// Total like [`Classifier::classify`]: probe errors and timeouts
    /// are logged and absorbed.
    pub async fn classify_with_probe(
        &self,
        text: &str,
        context: Option<&Context>,
        probe: &dyn ComplexityProbe,
        timeout: Duration,
    ) -> ComplexityLevel {
        match tokio::time::timeout(timeout, probe.assess(text)).await {
            Ok(Ok(level)) => level,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "complexity probe failed, using heuristic");
                self.classify(text, context)
            }
            Err(_) => {
                tracing::warn!(timeout_ms = timeout.as_millis(), "complexity probe timed out, using heuristic");
                self.classify(text, context)
            }
        }
    }
}
