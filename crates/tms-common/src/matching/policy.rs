use serde::{Deserialize, Serialize};

/// Caller-selected matching rules. Every flag defaults to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchingPolicy {
    /// Partial capability coverage adds a warning (never a rejection).
    pub require_all_capabilities: bool,
    /// Partial region coverage adds a warning (never a rejection).
    pub require_all_regions: bool,
    /// Drop carriers that are not `Active` before scoring.
    pub exclude_inactive_carriers: bool,
    /// Drop `Non-Compliant` carriers before scoring.
    pub exclude_non_compliant_carriers: bool,
}

impl Default for MatchingPolicy {
    fn default() -> Self {
        Self {
            require_all_capabilities: true,
            require_all_regions: true,
            exclude_inactive_carriers: true,
            exclude_non_compliant_carriers: true,
        }
    }
}

impl MatchingPolicy {
    /// Scores every carrier and never warns about partial coverage.
    pub fn permissive() -> Self {
        Self {
            require_all_capabilities: false,
            require_all_regions: false,
            exclude_inactive_carriers: false,
            exclude_non_compliant_carriers: false,
        }
    }
}
