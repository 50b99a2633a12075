use serde::Deserialize;

/// Quota enforcement configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotaConfig {
    /// Default monthly unit limits per subscription tier
    #[serde(default)]
    pub limits: TierLimitsConfig,
    /// Seconds before an uncommitted reservation expires
    #[serde(default = "default_reservation_ttl_secs")]
    pub reservation_ttl_secs: u64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            limits: TierLimitsConfig::default(),
            reservation_ttl_secs: default_reservation_ttl_secs(),
        }
    }
}

/// Monthly unit limits per subscription tier
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierLimitsConfig {
    /// Monthly unit limit for starter accounts
    #[serde(default = "default_starter_limit")]
    pub starter: u64,
    /// Monthly unit limit for professional accounts
    #[serde(default = "default_professional_limit")]
    pub professional: u64,
    /// Monthly unit limit for enterprise accounts
    #[serde(default = "default_enterprise_limit")]
    pub enterprise: u64,
}

impl Default for TierLimitsConfig {
    fn default() -> Self {
        Self {
            starter: default_starter_limit(),
            professional: default_professional_limit(),
            enterprise: default_enterprise_limit(),
        }
    }
}

const fn default_reservation_ttl_secs() -> u64 {
    300
}

const fn default_starter_limit() -> u64 {
    100_000
}

const fn default_professional_limit() -> u64 {
    1_000_000
}

const fn default_enterprise_limit() -> u64 {
    10_000_000
}
