use tollgate_catalog::CatalogError;
use tollgate_core::{ComplexityLevel, DirectoryError, InvokeError, StoreError};
use tollgate_metering::MeterError;
use tollgate_quota::QuotaError;
use tollgate_routing::RoutingError;

/// Startup failures
///
/// Configuration problems are fatal before the first request; nothing
/// here is recoverable mid-flight.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Catalog could not be built from configuration
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Policy table references a backend the catalog does not have
    #[error(transparent)]
    Routing(#[from] RoutingError),
}

/// Per-request failures surfaced to the caller
///
/// Quota denials are not errors; they come back as a structured denial
/// in the route result. Everything here failed the request outright.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The account could not be resolved
    #[error(transparent)]
    Account(#[from] DirectoryError),

    /// The backend invocation failed; no usage was committed
    ///
    /// Carries the backend and complexity so the caller can retry
    /// against a different backend with backoff.
    #[error("invocation of backend '{backend_id}' failed for {complexity} request: {source}")]
    Invocation {
        /// Backend that was invoked
        backend_id: String,
        /// Complexity the request classified as
        complexity: ComplexityLevel,
        /// Underlying invoker failure
        source: InvokeError,
    },

    /// Metering failed after a completed invocation
    #[error(transparent)]
    Meter(#[from] MeterError),

    /// The usage store could not be read
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The quota ledger could not reconcile against the store
    #[error(transparent)]
    Quota(#[from] QuotaError),
}
