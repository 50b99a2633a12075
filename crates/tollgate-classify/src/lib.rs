//! Heuristic complexity classification for admission routing
//!
//! Classifies request text into one of four complexity levels using
//! size heuristics and ordered intent-pattern matching. No ML pipeline;
//! pure, deterministic, and total — a classification failure must never
//! block an admission decision, so there is no error path here.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod patterns;
mod probe;

pub use probe::{ComplexityProbe, ProbeError};

use tollgate_config::ClassifyConfig;
use tollgate_core::ComplexityLevel;

/// Optional surrounding context for a request
///
/// Prior conversation text counts toward the size signal: a short
/// follow-up in a long exchange still needs a capable backend.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Prior message texts, oldest first
    pub history: Vec<String>,
}

/// Character thresholds for simple/moderate/complex buckets
const CHAR_THRESHOLDS: [usize; 3] = [50, 200, 500];

/// Word-count thresholds for simple/moderate/complex buckets
const WORD_THRESHOLDS: [usize; 3] = [10, 40, 100];

/// Complexity classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    enhanced: bool,
}

impl Classifier {
    /// Build a classifier from configuration
    pub fn new(config: &ClassifyConfig) -> Self {
        Self {
            enhanced: config.enhanced,
        }
    }

    /// Classify request text into a complexity level
    ///
    /// Pure and total: the same input always yields the same output, and
    /// malformed or empty input classifies as `Simple` rather than
    /// erroring. In enhanced mode, ordered intent patterns are checked
    /// first (critical, then complex, then simple — first match wins)
    /// and the size heuristic applies only when no pattern matches.
    pub fn classify(&self, text: &str, context: Option<&Context>) -> ComplexityLevel {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ComplexityLevel::Simple;
        }

        if self.enhanced
            && let Some(level) = patterns::match_intent(trimmed)
        {
            tracing::debug!(%level, "intent pattern matched");
            return level;
        }

        let level = classify_by_size(trimmed, context);
        tracing::debug!(%level, chars = trimmed.chars().count(), "size heuristic applied");
        level
    }
}

/// Classify by text length and whitespace-delimited word count
///
/// Context history is added to both signals before bucketing.
pub fn classify_by_size(text: &str, context: Option<&Context>) -> ComplexityLevel {
    let mut chars = text.chars().count();
    let mut words = text.split_whitespace().count();

    if let Some(context) = context {
        for prior in &context.history {
            chars += prior.chars().count();
            words += prior.split_whitespace().count();
        }
    }

    if chars < CHAR_THRESHOLDS[0] && words < WORD_THRESHOLDS[0] {
        ComplexityLevel::Simple
    } else if chars < CHAR_THRESHOLDS[1] && words < WORD_THRESHOLDS[1] {
        ComplexityLevel::Moderate
    } else if chars < CHAR_THRESHOLDS[2] && words < WORD_THRESHOLDS[2] {
        ComplexityLevel::Complex
    } else {
        ComplexityLevel::Critical
    }
}
