use serde::Deserialize;

/// Complexity classifier configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifyConfig {
    /// Enable intent-pattern matching before the size heuristic
    #[serde(default = "default_enhanced")]
    pub enhanced: bool,
    /// Timeout in milliseconds for an optional LLM-backed probe
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            enhanced: default_enhanced(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

const fn default_enhanced() -> bool {
    true
}

const fn default_probe_timeout_ms() -> u64 {
    250
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClassifyConfig::default();
        assert!(config.enhanced);
        assert_eq!(config.probe_timeout_ms, 250);
    }

    #[test]
    fn deserialize_overrides() {
        let config: ClassifyConfig = toml::from_str("enhanced = false\nprobe_timeout_ms = 50").unwrap();
        assert!(!config.enhanced);
        assert_eq!(config.probe_timeout_ms, 50);
    }
}
