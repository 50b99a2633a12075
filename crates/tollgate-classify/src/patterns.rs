//! Ordered intent-pattern sets for enhanced classification
//!
//! Precedence is fixed: critical patterns are checked before complex
//! patterns before simple patterns, and the first match wins. When a
//! text matches both a critical and a complex pattern, it is critical.

use std::sync::LazyLock;

use regex::Regex;
use tollgate_core::ComplexityLevel;

static CRITICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)\b(?:
            production\s+deployment |
            deployment\s+architecture |
            system\s+architecture |
            distributed\s+system |
            security\s+audit |
            penetration\s+test |
            data\s+migration |
            disaster\s+recovery |
            high\s+availability |
            zero\s+downtime |
            compliance\s+(?:review|audit)
        )\b",
    )
    .expect("must be valid regex")
});

static COMPLEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)\b(?:
            implement |
            refactor |
            debug |
            optimi[sz]e |
            integrat(?:e|ion) |
            algorithm |
            benchmark |
            concurren(?:t|cy) |
            race\s+condition |
            schema\s+design |
            code\s+review
        )\b",
    )
    .expect("must be valid regex")
});

static SIMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^(?:
            hi | hello | hey | thanks | thank\s+you | yes | no | ok(?:ay)? |
            what\s+is | what\s+are | who\s+is | when\s+did | where\s+is |
            how\s+many | how\s+much | define\s
        )\b",
    )
    .expect("must be valid regex")
});

/// Match text against the ordered pattern sets
///
/// Returns `None` when no pattern matches, in which case the caller
/// falls back to the size heuristic.
pub fn match_intent(text: &str) -> Option<ComplexityLevel> {
    if CRITICAL_RE.is_match(text) {
        Some(ComplexityLevel::Critical)
    } else if COMPLEX_RE.is_match(text) {
        Some(ComplexityLevel::Complex)
    } else if SIMPLE_RE.is_match(text) {
        Some(ComplexityLevel::Simple)
    } else {
        None
    }
}
