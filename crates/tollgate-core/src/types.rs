use serde::{Deserialize, Serialize};

/// How much model capability a request needs
///
/// Totally ordered by increasing required capability, so levels can be
/// compared directly when reasoning about escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
    Critical,
}

impl ComplexityLevel {
    /// All levels in ascending order
    pub const ALL: [Self; 4] = [Self::Simple, Self::Moderate, Self::Complex, Self::Critical];
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
            Self::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Account subscription tier
///
/// Totally ordered by increasing quota and backend access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Starter,
    Professional,
    Enterprise,
}

impl SubscriptionTier {
    /// All tiers in ascending order
    pub const ALL: [Self; 3] = [Self::Starter, Self::Professional, Self::Enterprise];
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        };
        f.write_str(s)
    }
}

/// Billable resource category of a usage event
///
/// Closed set: accounting stays auditable because every event carries
/// exactly one of these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Prompt units consumed by a backend
    Input,
    /// Completion units generated by a backend
    Output,
    /// Embedding computation units
    Embedding,
    /// Search operations
    Search,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Embedding => "embedding",
            Self::Search => "search",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_levels_are_ordered() {
        assert!(ComplexityLevel::Simple < ComplexityLevel::Moderate);
        assert!(ComplexityLevel::Moderate < ComplexityLevel::Complex);
        assert!(ComplexityLevel::Complex < ComplexityLevel::Critical);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(SubscriptionTier::Starter < SubscriptionTier::Professional);
        assert!(SubscriptionTier::Professional < SubscriptionTier::Enterprise);
    }

    #[test]
    fn serde_round_trip_uses_snake_case() {
        let json = serde_json::to_string(&ComplexityLevel::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let level: ComplexityLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(level, ComplexityLevel::Critical);
    }
}
