//! Backend pricing catalog
//!
//! Immutable table of priced, capability-rated backends, built once
//! from configuration at startup and shared read-only across workers.
//! Prices are converted to `Decimal` here so monetary arithmetic never
//! touches floating point downstream.

#![allow(clippy::must_use_candidate)]

use rust_decimal::Decimal;
use tollgate_config::{BackendProfileConfig, CatalogConfig};

/// A priced, capability-rated backend
#[derive(Debug, Clone)]
pub struct BackendProfile {
    /// Backend identifier
    pub id: String,
    /// Cost per 1k input units (USD)
    pub cost_per_1k_input: Decimal,
    /// Cost per 1k output units (USD)
    pub cost_per_1k_output: Decimal,
    /// Context window in tokens
    pub max_context_tokens: u32,
    /// Quality score in [0, 1]
    pub quality_score: f64,
}

/// Errors building the catalog from configuration
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A configured price cannot be represented as a decimal
    #[error("backend '{id}' has unrepresentable price: {value}")]
    InvalidPrice {
        /// Backend whose price is invalid
        id: String,
        /// The offending value
        value: f64,
    },
}

/// Immutable catalog of backend profiles
#[derive(Debug)]
pub struct Catalog {
    profiles: Vec<BackendProfile>,
}

impl Catalog {
    /// Build a catalog from validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configured price cannot be converted to a
    /// decimal. This is a configuration error and fatal at startup.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let profiles = config
            .backends
            .iter()
            .map(build_profile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { profiles })
    }

    /// Look up a profile by backend id
    pub fn get(&self, id: &str) -> Option<&BackendProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Whether quality is non-decreasing as input cost increases
    ///
    /// The selector policy assumes a well-formed catalog has this shape;
    /// callers use the answer to warn at startup, not to reject.
    pub fn is_quality_cost_aligned(&self) -> bool {
        let mut sorted: Vec<&BackendProfile> = self.profiles.iter().collect();
        sorted.sort_by_key(|p| p.cost_per_1k_input);
        sorted.windows(2).all(|pair| pair[0].quality_score <= pair[1].quality_score)
    }
}

fn build_profile(config: &BackendProfileConfig) -> Result<BackendProfile, CatalogError> {
    let price = |value: f64| {
        Decimal::try_from(value).map_err(|_| CatalogError::InvalidPrice {
            id: config.id.clone(),
            value,
        })
    };

    Ok(BackendProfile {
        id: config.id.clone(),
        cost_per_1k_input: price(config.cost_per_1k_input)?,
        cost_per_1k_output: price(config.cost_per_1k_output)?,
        max_context_tokens: config.max_context_tokens,
        quality_score: config.quality_score,
    })
}
