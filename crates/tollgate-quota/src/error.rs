use tollgate_core::StoreError;

/// Quota ledger errors
///
/// All of these fail the request, not the process. A store failure
/// during admission means deny: failing open would permit unbounded
/// cost exposure.
#[derive(Debug, thiserror::Error)]
pub enum QuotaError {
    /// The durable store could not be reached; admission fails closed
    #[error("quota store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// Period boundary computation failed
    #[error("quota period computation failed: {0}")]
    Period(#[from] jiff::Error),
}
