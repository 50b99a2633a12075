//! Threshold rules behind `suggest`
//!
//! Each rule fires at most once and carries a fixed savings estimate,
//! so the same summary always yields the same suggestions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tollgate_core::ResourceType;

use crate::UsageSummary;

/// Input units must account for this share of total units before prompt
/// trimming is worth suggesting
const INPUT_HEAVY_SHARE: Decimal = dec!(0.7);
/// Embedding event count above which caching starts to pay off
const EMBEDDING_EVENT_FLOOR: u64 = 100;
/// Event count above which batching becomes relevant
const SMALL_REQUEST_EVENT_FLOOR: u64 = 200;
/// Mean units per event below which requests count as small
const SMALL_REQUEST_MEAN_UNITS: u64 = 20;

/// Estimated fraction of input cost recoverable by trimming prompts
const TRIM_SAVINGS_RATE: Decimal = dec!(0.3);
/// Estimated fraction of embedding cost recoverable by caching
const CACHE_SAVINGS_RATE: Decimal = dec!(0.6);
/// Estimated fraction of total cost recoverable by batching
const BATCH_SAVINGS_RATE: Decimal = dec!(0.1);

/// Which rule produced a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionRule {
    /// Input tokens dominate spend
    TrimPrompts,
    /// Repeated embedding calls that a cache would absorb
    CacheEmbeddings,
    /// Many small requests that could share round trips
    BatchSmallRequests,
}

/// One actionable cost optimization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Rule that fired
    pub rule: SuggestionRule,
    /// Human-readable recommendation
    pub message: String,
    /// Rough monthly savings at the current usage rate
    pub estimated_monthly_savings: Decimal,
}

/// Run every rule against a summary, highest estimated savings first
pub(crate) fn evaluate(summary: &UsageSummary) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = [trim_prompts, cache_embeddings, batch_small_requests]
        .iter()
        .filter_map(|rule| rule(summary))
        .collect();
    suggestions.sort_by(|a, b| b.estimated_monthly_savings.cmp(&a.estimated_monthly_savings));
    suggestions
}

fn trim_prompts(summary: &UsageSummary) -> Option<Suggestion> {
    let input = summary.breakdown(ResourceType::Input);
    if summary.total_units == 0 || input.cost <= Decimal::ZERO {
        return None;
    }
    let share = Decimal::from(input.units) / Decimal::from(summary.total_units);
    if share < INPUT_HEAVY_SHARE {
        return None;
    }
    Some(Suggestion {
        rule: SuggestionRule::TrimPrompts,
        message: format!(
            "input tokens are {}% of total usage; trim prompt context or route to a cheaper backend",
            (share * dec!(100)).round_dp(0),
        ),
        estimated_monthly_savings: (input.cost * TRIM_SAVINGS_RATE).round_dp(6),
    })
}

fn cache_embeddings(summary: &UsageSummary) -> Option<Suggestion> {
    let embeddings = summary.breakdown(ResourceType::Embedding);
    if embeddings.events < EMBEDDING_EVENT_FLOOR || embeddings.cost <= Decimal::ZERO {
        return None;
    }
    Some(Suggestion {
        rule: SuggestionRule::CacheEmbeddings,
        message: format!(
            "{} embedding calls this period; cache embeddings for repeated inputs",
            embeddings.events,
        ),
        estimated_monthly_savings: (embeddings.cost * CACHE_SAVINGS_RATE).round_dp(6),
    })
}

fn batch_small_requests(summary: &UsageSummary) -> Option<Suggestion> {
    let events = summary.total_events();
    if events < SMALL_REQUEST_EVENT_FLOOR || summary.total_cost <= Decimal::ZERO {
        return None;
    }
    let mean_units = summary.total_units / events;
    if mean_units >= SMALL_REQUEST_MEAN_UNITS {
        return None;
    }
    Some(Suggestion {
        rule: SuggestionRule::BatchSmallRequests,
        message: format!(
            "{events} requests averaging {mean_units} units each; batch small requests to cut per-call overhead",
        ),
        estimated_monthly_savings: (summary.total_cost * BATCH_SAVINGS_RATE).round_dp(6),
    })
}
