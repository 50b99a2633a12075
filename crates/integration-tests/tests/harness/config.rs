//! Configuration builder for integration tests
//!
//! Builds TOML and runs it through the real loader so tests exercise
//! parsing and validation, not hand-assembled structs.

use tollgate_config::Config;

pub struct ConfigBuilder {
    starter_limit: u64,
    professional_limit: u64,
    enterprise_limit: u64,
    invoke_timeout_secs: u64,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            starter_limit: 100_000,
            professional_limit: 1_000_000,
            enterprise_limit: 10_000_000,
            invoke_timeout_secs: 60,
        }
    }

    pub fn with_starter_limit(mut self, limit: u64) -> Self {
        self.starter_limit = limit;
        self
    }

    pub fn with_invoke_timeout(mut self, secs: u64) -> Self {
        self.invoke_timeout_secs = secs;
        self
    }

    pub fn build(&self) -> Config {
        let toml = format!(
            r#"
            [[catalog.backends]]
            id = "gpt-basic"
            cost_per_1k_input = 0.0015
            cost_per_1k_output = 0.002
            max_context_tokens = 16000
            quality_score = 0.62

            [[catalog.backends]]
            id = "gpt-plus"
            cost_per_1k_input = 0.003
            cost_per_1k_output = 0.006
            max_context_tokens = 64000
            quality_score = 0.78

            [[catalog.backends]]
            id = "gpt-frontier"
            cost_per_1k_input = 0.01
            cost_per_1k_output = 0.03
            max_context_tokens = 200000
            quality_score = 0.95

            [routing.policy.starter]
            simple = "gpt-basic"
            moderate = "gpt-basic"
            complex = "gpt-plus"
            critical = "gpt-plus"

            [routing.policy.professional]
            simple = "gpt-basic"
            moderate = "gpt-plus"
            complex = "gpt-plus"
            critical = "gpt-frontier"

            [routing.policy.enterprise]
            simple = "gpt-plus"
            moderate = "gpt-plus"
            complex = "gpt-frontier"
            critical = "gpt-frontier"

            [quota.limits]
            starter = {starter}
            professional = {professional}
            enterprise = {enterprise}

            [gateway]
            invoke_timeout_secs = {invoke_timeout}
            "#,
            starter = self.starter_limit,
            professional = self.professional_limit,
            enterprise = self.enterprise_limit,
            invoke_timeout = self.invoke_timeout_secs,
        );

        Config::from_toml(&toml).expect("test config must be valid")
    }
}
