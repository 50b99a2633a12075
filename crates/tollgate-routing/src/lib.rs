//! Tier-aware backend selection
//!
//! Selection is a lookup table, not a formula: every tier × complexity
//! combination names its backend explicitly because those combinations
//! encode business decisions that change independently. The table is
//! exhaustive by construction and validated against the catalog at
//! startup, so `select` itself is pure, total, and infallible.

#![allow(clippy::must_use_candidate)]

mod error;

pub use error::RoutingError;

use tollgate_catalog::Catalog;
use tollgate_config::{RoutingConfig, TierPolicyConfig};
use tollgate_core::{ComplexityLevel, SubscriptionTier};

/// Validated tier × complexity → backend lookup table
#[derive(Debug, Clone)]
pub struct PolicyTable {
    // Indexed [tier][level], both in ascending declaration order
    entries: [[String; 4]; 3],
}

impl PolicyTable {
    /// Build and validate the policy table
    ///
    /// Every entry must name a backend present in the catalog. A catalog
    /// whose quality scores are not monotone across tiers for some level
    /// is logged at warn level but accepted: graceful degradation (a
    /// starter account capped below the frontier backend) is a valid
    /// policy shape.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry references an unknown backend
    pub fn from_config(config: &RoutingConfig, catalog: &Catalog) -> Result<Self, RoutingError> {
        let entries = [
            validate_tier(SubscriptionTier::Starter, &config.policy.starter, catalog)?,
            validate_tier(SubscriptionTier::Professional, &config.policy.professional, catalog)?,
            validate_tier(SubscriptionTier::Enterprise, &config.policy.enterprise, catalog)?,
        ];

        if !catalog.is_quality_cost_aligned() {
            tracing::warn!("catalog quality scores are not monotone in cost; policy assignments may be inverted");
        }

        let table = Self { entries };
        table.warn_on_quality_inversions(catalog);
        Ok(table)
    }

    /// Select the backend for a complexity level and subscription tier
    ///
    /// Pure, total, deterministic. Under `Critical` complexity a low
    /// tier is capped at the best backend that tier can afford rather
    /// than escalated to the most expensive one; that cap is expressed
    /// in the table itself.
    pub fn select(&self, level: ComplexityLevel, tier: SubscriptionTier) -> &str {
        let backend = self.entries[tier_index(tier)][level_index(level)].as_str();
        tracing::debug!(%level, %tier, backend, "backend selected");
        backend
    }

    /// Quality monotonicity check: for each level, a higher tier should
    /// never be assigned a lower-quality backend than a lower tier.
    fn warn_on_quality_inversions(&self, catalog: &Catalog) {
        for level in ComplexityLevel::ALL {
            let qualities: Vec<f64> = SubscriptionTier::ALL
                .iter()
                .filter_map(|tier| catalog.get(self.select(level, *tier)))
                .map(|p| p.quality_score)
                .collect();

            if qualities.windows(2).any(|pair| pair[0] > pair[1]) {
                tracing::warn!(
                    %level,
                    "policy assigns a lower-quality backend to a higher tier for this level"
                );
            }
        }
    }
}

fn validate_tier(
    tier: SubscriptionTier,
    policy: &TierPolicyConfig,
    catalog: &Catalog,
) -> Result<[String; 4], RoutingError> {
    let entries = policy.entries();
    for (level, backend_id) in ComplexityLevel::ALL.into_iter().zip(entries) {
        if catalog.get(backend_id).is_none() {
            return Err(RoutingError::UnknownBackend {
                tier,
                level,
                backend_id: backend_id.to_owned(),
            });
        }
    }
    Ok(entries.map(String::from))
}

const fn tier_index(tier: SubscriptionTier) -> usize {
    match tier {
        SubscriptionTier::Starter => 0,
        SubscriptionTier::Professional => 1,
        SubscriptionTier::Enterprise => 2,
    }
}

const fn level_index(level: ComplexityLevel) -> usize {
    match level {
        ComplexityLevel::Simple => 0,
        ComplexityLevel::Moderate => 1,
        ComplexityLevel::Complex => 2,
        ComplexityLevel::Critical => 3,
    }
}
