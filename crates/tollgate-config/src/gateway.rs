use serde::Deserialize;

/// Gateway orchestration configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Timeout in seconds for a single backend invocation
    #[serde(default = "default_invoke_timeout_secs")]
    pub invoke_timeout_secs: u64,
    /// Maximum number of metadata entries recorded per usage event
    #[serde(default = "default_metadata_max_entries")]
    pub metadata_max_entries: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            invoke_timeout_secs: default_invoke_timeout_secs(),
            metadata_max_entries: default_metadata_max_entries(),
        }
    }
}

const fn default_invoke_timeout_secs() -> u64 {
    60
}

const fn default_metadata_max_entries() -> usize {
    16
}
