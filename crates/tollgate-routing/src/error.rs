use tollgate_core::{ComplexityLevel, SubscriptionTier};

/// Routing policy errors
///
/// These only occur while building the policy table; selection itself
/// never fails.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// A policy entry references a backend missing from the catalog
    #[error("policy for tier '{tier}' level '{level}' references unknown backend '{backend_id}'")]
    UnknownBackend {
        /// Tier whose policy entry is invalid
        tier: SubscriptionTier,
        /// Complexity level of the invalid entry
        level: ComplexityLevel,
        /// The missing backend id
        backend_id: String,
    },
}
