//! Usage metering: unit counting and cost derivation
//!
//! Cost is the one place where silently-wrong output is worse than an
//! explicit failure, so an unknown backend is an error here rather than
//! a default rate. Unit counting, by contrast, degrades: if the
//! injected tokenizer is unavailable, a word-count approximation is
//! used and the request proceeds.

#![allow(clippy::must_use_candidate)]

mod tokenizer;

pub use tokenizer::TiktokenTokenizer;

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tollgate_catalog::Catalog;
use tollgate_core::Tokenizer;

/// Units per pricing row in the catalog
const PRICING_BLOCK: Decimal = dec!(1000);

/// Metering errors
#[derive(Debug, thiserror::Error)]
pub enum MeterError {
    /// The backend is not in the pricing catalog
    ///
    /// Never defaulted: mispricing must fail loudly.
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
}

/// Measured consumption for one completed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metered {
    /// Total units consumed (input + output)
    pub total_units: u64,
    /// Total cost, 6 decimal places
    pub cost: Decimal,
    /// Input share of the cost, 6 decimal places
    pub input_cost: Decimal,
    /// Output share of the cost, 6 decimal places
    pub output_cost: Decimal,
}

/// Computes consumed units and derives monetary cost from the catalog
pub struct UsageMeter {
    catalog: Arc<Catalog>,
    tokenizer: Option<Arc<dyn Tokenizer>>,
}

impl UsageMeter {
    /// Create a meter over a catalog, with an optional tokenizer
    pub fn new(catalog: Arc<Catalog>, tokenizer: Option<Arc<dyn Tokenizer>>) -> Self {
        Self { catalog, tokenizer }
    }

    /// Derive the cost of consumed units on a backend
    ///
    /// `cost = input/1000 × rate_in + output/1000 × rate_out`, with each
    /// component rounded half-to-even at 6 decimal places. The total is
    /// the sum of the rounded components so per-resource events
    /// reconcile exactly against the total.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError::UnknownBackend`] if the backend is not in
    /// the catalog
    pub fn measure(&self, backend_id: &str, input_units: u64, output_units: u64) -> Result<Metered, MeterError> {
        let profile = self
            .catalog
            .get(backend_id)
            .ok_or_else(|| MeterError::UnknownBackend(backend_id.to_owned()))?;

        let input_cost = round_cost(Decimal::from(input_units) * profile.cost_per_1k_input / PRICING_BLOCK);
        let output_cost = round_cost(Decimal::from(output_units) * profile.cost_per_1k_output / PRICING_BLOCK);

        Ok(Metered {
            total_units: input_units + output_units,
            cost: input_cost + output_cost,
            input_cost,
            output_cost,
        })
    }

    /// Count billable units in raw text for a backend
    ///
    /// Uses the injected tokenizer when available; otherwise falls back
    /// to `ceil(word_count × 1.3)`, a documented approximation. Never
    /// fails: counting feeds admission estimates, not final billing.
    pub fn count_units(&self, text: &str, backend_id: &str) -> u64 {
        if let Some(ref tokenizer) = self.tokenizer {
            match tokenizer.count(text, backend_id) {
                Ok(units) => return units,
                Err(e) => {
                    tracing::warn!(error = %e, backend_id, "tokenizer failed, using word-count approximation");
                }
            }
        }
        approximate_units(text)
    }
}

impl std::fmt::Debug for UsageMeter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageMeter")
            .field("has_tokenizer", &self.tokenizer.is_some())
            .finish_non_exhaustive()
    }
}

/// `ceil(word_count × 1.3)` computed exactly in integers
fn approximate_units(text: &str) -> u64 {
    let words = text.split_whitespace().count() as u64;
    (words * 13).div_ceil(10)
}

/// Round half-to-even at 6 decimal places, keeping scale 6
fn round_cost(raw: Decimal) -> Decimal {
    let mut cost = raw.round_dp_with_strategy(6, RoundingStrategy::MidpointNearestEven);
    cost.rescale(6);
    cost
}
