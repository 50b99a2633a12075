use serde::Deserialize;

/// Backend pricing catalog configuration
///
/// Pure data: backend identifiers with pricing, capacity, and a quality
/// score. The catalog is immutable after load.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// All backends available for routing
    pub backends: Vec<BackendProfileConfig>,
}

/// Configuration for a single priced backend
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendProfileConfig {
    /// Backend identifier (e.g. "gpt-basic")
    pub id: String,
    /// Cost per 1k input units (USD)
    pub cost_per_1k_input: f64,
    /// Cost per 1k output units (USD)
    pub cost_per_1k_output: f64,
    /// Context window in tokens
    pub max_context_tokens: u32,
    /// Quality score in [0, 1]
    pub quality_score: f64,
}

impl CatalogConfig {
    /// Validate catalog well-formedness
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty, a backend id is
    /// duplicated, a price is negative or non-finite, or a quality score
    /// falls outside [0, 1]
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backends.is_empty() {
            anyhow::bail!("catalog must define at least one backend");
        }

        let mut seen = std::collections::HashSet::new();
        for backend in &self.backends {
            if !seen.insert(backend.id.as_str()) {
                anyhow::bail!("duplicate backend id in catalog: '{}'", backend.id);
            }

            for (field, value) in [
                ("cost_per_1k_input", backend.cost_per_1k_input),
                ("cost_per_1k_output", backend.cost_per_1k_output),
            ] {
                if !value.is_finite() || value < 0.0 {
                    anyhow::bail!("backend '{}' has invalid {field}: {value}", backend.id);
                }
            }

            if !(0.0..=1.0).contains(&backend.quality_score) {
                anyhow::bail!(
                    "backend '{}' has quality_score {} outside [0, 1]",
                    backend.id,
                    backend.quality_score
                );
            }
        }

        Ok(())
    }

    /// Whether a backend id is present in the catalog
    pub fn contains(&self, id: &str) -> bool {
        self.backends.iter().any(|b| b.id == id)
    }
}
