use serde::Deserialize;

use crate::CatalogConfig;

/// Routing policy configuration
///
/// The policy table is a business decision, not a formula: every
/// tier × complexity combination names its backend explicitly. Missing
/// entries are a deserialization error, so the table is exhaustive by
/// construction.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Policy entries per subscription tier
    pub policy: PolicyConfig,
}

/// Backend assignments for all subscription tiers
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Starter tier assignments
    pub starter: TierPolicyConfig,
    /// Professional tier assignments
    pub professional: TierPolicyConfig,
    /// Enterprise tier assignments
    pub enterprise: TierPolicyConfig,
}

/// Backend assignments for one tier across all complexity levels
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierPolicyConfig {
    /// Backend for simple requests
    pub simple: String,
    /// Backend for moderate requests
    pub moderate: String,
    /// Backend for complex requests
    pub complex: String,
    /// Backend for critical requests
    pub critical: String,
}

impl TierPolicyConfig {
    /// All four assignments in ascending complexity order
    pub fn entries(&self) -> [&str; 4] {
        [&self.simple, &self.moderate, &self.complex, &self.critical]
    }
}

impl RoutingConfig {
    /// Validate the policy table against the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if any policy entry names a backend that is not
    /// in the catalog
    pub fn validate(&self, catalog: &CatalogConfig) -> anyhow::Result<()> {
        for (tier, policy) in [
            ("starter", &self.policy.starter),
            ("professional", &self.policy.professional),
            ("enterprise", &self.policy.enterprise),
        ] {
            for backend_id in policy.entries() {
                if !catalog.contains(backend_id) {
                    anyhow::bail!("routing policy for tier '{tier}' references unknown backend '{backend_id}'");
                }
            }
        }
        Ok(())
    }
}
