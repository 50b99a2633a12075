//! Request router for Tollgate
//!
//! Sequences classification, backend selection, quota admission, the
//! external invocation, metering, and commit. Admission denials come
//! back as structured results; only invocation and lookup failures are
//! errors. Quota is committed strictly after a successful invocation,
//! so abandoned or failed requests never consume units.

#![allow(clippy::must_use_candidate)]

mod error;
mod request;

pub use error::{GatewayError, SetupError};
pub use request::{DenyReason, RouteRequest, RouteResult};

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;
use tollgate_analytics::{AnalyticsEngine, Suggestion, UsageSummary};
use tollgate_catalog::Catalog;
use tollgate_classify::{Classifier, ComplexityProbe};
use tollgate_config::Config;
use tollgate_core::{
    Account, AccountDirectory, BackendInvoker, ComplexityLevel, InvokeError, QuotaStatus, ResourceType, Tokenizer,
    UsageEvent, UsageFilter, UsageStore,
};
use tollgate_metering::UsageMeter;
use tollgate_quota::{QuotaLedger, ReservationId};
use tollgate_routing::PolicyTable;
use uuid::Uuid;

/// Cost-optimizing router in front of external LLM backends
///
/// Immutable after construction apart from the quota ledger's internal
/// state; safe to share behind an `Arc` across any number of workers.
pub struct Gateway {
    classifier: Classifier,
    policy: PolicyTable,
    meter: UsageMeter,
    ledger: QuotaLedger,
    analytics: AnalyticsEngine,
    invoker: Arc<dyn BackendInvoker>,
    directory: Arc<dyn AccountDirectory>,
    probe: Option<Arc<dyn ComplexityProbe>>,
    probe_timeout: Duration,
    invoke_timeout: Duration,
    metadata_max_entries: usize,
}

impl Gateway {
    /// Build a gateway from configuration and collaborators
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the catalog is mispriced or the policy
    /// table references a backend the catalog does not have. These are
    /// configuration errors and fatal at startup.
    pub fn new(
        config: &Config,
        store: Arc<dyn UsageStore>,
        invoker: Arc<dyn BackendInvoker>,
        directory: Arc<dyn AccountDirectory>,
        tokenizer: Option<Arc<dyn Tokenizer>>,
    ) -> Result<Self, SetupError> {
        let catalog = Arc::new(Catalog::from_config(&config.catalog)?);
        let policy = PolicyTable::from_config(&config.routing, &catalog)?;

        Ok(Self {
            classifier: Classifier::new(&config.classify),
            policy,
            meter: UsageMeter::new(catalog, tokenizer),
            ledger: QuotaLedger::new(Arc::clone(&store), &config.quota),
            analytics: AnalyticsEngine::new(store),
            invoker,
            directory,
            probe: None,
            probe_timeout: Duration::from_millis(config.classify.probe_timeout_ms),
            invoke_timeout: Duration::from_secs(config.gateway.invoke_timeout_secs),
            metadata_max_entries: config.gateway.metadata_max_entries,
        })
    }

    /// Attach an LLM-backed complexity probe
    ///
    /// The probe's answer is preferred when it arrives within the
    /// configured timeout; otherwise the heuristic decides.
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn ComplexityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Route one request end to end
    ///
    /// Classify, select a backend by tier policy, reserve quota, invoke,
    /// meter the actuals, and commit. Quota denials and store outages
    /// are structured denials in the result. A failed or timed-out
    /// invocation releases the reservation and surfaces the backend and
    /// complexity for the caller's retry decision.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Account`] for unknown accounts and
    /// [`GatewayError::Invocation`] when the backend fails; in the
    /// latter case no usage was recorded and no quota consumed
    pub async fn route(&self, request: RouteRequest) -> Result<RouteResult, GatewayError> {
        let account = self.directory.get_account(&request.account_id).await?;
        let complexity = self.classify(&request).await;
        let backend_id = self.policy.select(complexity, account.tier).to_owned();

        let estimate = self.meter.count_units(&request.prompt, &backend_id);
        let decision = match self.ledger.check_and_reserve(&account, estimate).await {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    account_id = %account.account_id,
                    "quota check failed, denying admission"
                );
                return Ok(RouteResult::denial(complexity, DenyReason::StoreUnavailable));
            }
        };

        let Some(reservation) = decision.reservation else {
            return Ok(RouteResult::denial(
                complexity,
                DenyReason::QuotaExceeded {
                    limit: decision.limit,
                    remaining: decision.remaining,
                },
            ));
        };

        let invocation = match tokio::time::timeout(
            self.invoke_timeout,
            self.invoker.invoke(&backend_id, &request.prompt, &request.options),
        )
        .await
        {
            Ok(Ok(invocation)) => invocation,
            Ok(Err(source)) => {
                self.ledger.release(&account.account_id, reservation).await;
                return Err(GatewayError::Invocation {
                    backend_id,
                    complexity,
                    source,
                });
            }
            Err(_) => {
                self.ledger.release(&account.account_id, reservation).await;
                return Err(GatewayError::Invocation {
                    backend_id,
                    complexity,
                    source: InvokeError::Timeout {
                        after: self.invoke_timeout,
                    },
                });
            }
        };

        let metered = match self.meter.measure(&backend_id, invocation.input_units, invocation.output_units) {
            Ok(metered) => metered,
            Err(e) => {
                self.ledger.release(&account.account_id, reservation).await;
                return Err(e.into());
            }
        };

        self.commit_usage(&account, &request, &backend_id, &invocation, &metered, reservation)
            .await;

        tracing::info!(
            account_id = %account.account_id,
            %backend_id,
            %complexity,
            units = metered.total_units,
            cost = %metered.cost,
            "request routed"
        );

        Ok(RouteResult {
            text: Some(invocation.output_text),
            backend_used: Some(backend_id),
            complexity,
            units_used: metered.total_units,
            cost: metered.cost,
            denied: false,
            deny_reason: None,
        })
    }

    /// Summarize an account's usage
    ///
    /// # Errors
    ///
    /// Returns an error if the usage store cannot be read
    pub async fn get_usage_summary(
        &self,
        account_id: &str,
        filter: &UsageFilter,
    ) -> Result<UsageSummary, GatewayError> {
        Ok(self.analytics.summarize(account_id, filter).await?)
    }

    /// Current-period quota standing for an account
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown or the store cannot
    /// be read
    pub async fn get_quota_status(&self, account_id: &str) -> Result<QuotaStatus, GatewayError> {
        let account = self.directory.get_account(account_id).await?;
        Ok(self.ledger.status(&account).await?)
    }

    /// Cost optimization suggestions for an account
    ///
    /// # Errors
    ///
    /// Returns an error if the usage store cannot be read
    pub async fn get_suggestions(&self, account_id: &str) -> Result<Vec<Suggestion>, GatewayError> {
        Ok(self.analytics.suggest(account_id).await?)
    }

    async fn classify(&self, request: &RouteRequest) -> ComplexityLevel {
        match &self.probe {
            Some(probe) => {
                self.classifier
                    .classify_with_probe(&request.prompt, request.context.as_ref(), probe.as_ref(), self.probe_timeout)
                    .await
            }
            None => self.classifier.classify(&request.prompt, request.context.as_ref()),
        }
    }

    /// Append input and output events and settle the reservation
    ///
    /// A commit failure is logged and swallowed: the invocation already
    /// succeeded, so the caller still gets its result and the
    /// reservation is left to expire.
    async fn commit_usage(
        &self,
        account: &Account,
        request: &RouteRequest,
        backend_id: &str,
        invocation: &tollgate_core::Invocation,
        metered: &tollgate_metering::Metered,
        reservation: ReservationId,
    ) {
        let metadata = self.bounded_metadata(&request.metadata);
        let created_at = Timestamp::now();

        let events = vec![
            UsageEvent {
                event_id: Uuid::new_v4(),
                account_id: account.account_id.clone(),
                project_id: request.project_id.clone(),
                resource_type: ResourceType::Input,
                unit_count: invocation.input_units,
                backend_id: Some(backend_id.to_owned()),
                cost: metered.input_cost,
                created_at,
                metadata: metadata.clone(),
            },
            UsageEvent {
                event_id: Uuid::new_v4(),
                account_id: account.account_id.clone(),
                project_id: request.project_id.clone(),
                resource_type: ResourceType::Output,
                unit_count: invocation.output_units,
                backend_id: Some(backend_id.to_owned()),
                cost: metered.output_cost,
                created_at,
                metadata,
            },
        ];

        if let Err(e) = self.ledger.commit(&account.account_id, reservation, events).await {
            tracing::warn!(
                error = %e,
                account_id = %account.account_id,
                "usage commit failed, reservation left to expire"
            );
        }
    }

    fn bounded_metadata(&self, metadata: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        if metadata.len() > self.metadata_max_entries {
            tracing::warn!(
                entries = metadata.len(),
                cap = self.metadata_max_entries,
                "request metadata truncated"
            );
        }
        metadata
            .iter()
            .take(self.metadata_max_entries)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("invoke_timeout", &self.invoke_timeout)
            .field("has_probe", &self.probe.is_some())
            .finish_non_exhaustive()
    }
}
