#![allow(clippy::must_use_candidate)]

pub mod catalog;
pub mod classify;
mod env;
pub mod gateway;
mod loader;
pub mod quota;
pub mod routing;
pub mod telemetry;

use serde::Deserialize;

pub use catalog::*;
pub use classify::*;
pub use gateway::*;
pub use quota::*;
pub use routing::*;
pub use telemetry::TelemetryConfig;

/// Top-level Tollgate configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend pricing catalog
    pub catalog: CatalogConfig,
    /// Routing policy table
    pub routing: RoutingConfig,
    /// Complexity classifier configuration
    #[serde(default)]
    pub classify: ClassifyConfig,
    /// Quota enforcement configuration
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Gateway orchestration configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
