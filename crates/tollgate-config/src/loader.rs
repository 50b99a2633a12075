use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        Self::from_toml(&expanded)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Configuration errors are fatal at startup; nothing here is
    /// recoverable mid-request.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is malformed or the policy table
    /// references unknown backends
    pub fn validate(&self) -> anyhow::Result<()> {
        self.catalog.validate()?;
        self.routing.validate(&self.catalog)?;

        if self.quota.reservation_ttl_secs == 0 {
            anyhow::bail!("quota.reservation_ttl_secs must be > 0");
        }
        if self.gateway.invoke_timeout_secs == 0 {
            anyhow::bail!("gateway.invoke_timeout_secs must be > 0");
        }

        Ok(())
    }
}
