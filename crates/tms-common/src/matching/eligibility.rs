use serde::Serialize;

use super::policy::MatchingPolicy;
use crate::{Carrier, CarrierStatus, ComplianceStatus};

/// Outcome of a single eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum EligibilityDecision {
    /// Removed from the pool before scoring.
    Excluded { reason: String },
    Pass,
}

impl EligibilityDecision {
    pub fn is_excluded(&self) -> bool {
        matches!(self, EligibilityDecision::Excluded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            EligibilityDecision::Excluded { reason } => Some(reason),
            EligibilityDecision::Pass => None,
        }
    }
}

/// Every check run against one carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    /// True when any check excluded the carrier.
    pub is_excluded: bool,
    pub decisions: Vec<(&'static str, EligibilityDecision)>,
}

impl EligibilityResult {
    pub fn new(decisions: Vec<(&'static str, EligibilityDecision)>) -> Self {
        let is_excluded = decisions.iter().any(|(_, d)| d.is_excluded());
        Self {
            is_excluded,
            decisions,
        }
    }

    /// Exclusion reasons joined with `; `.
    pub fn exclusion_reasons(&self) -> Option<String> {
        let reasons: Vec<_> = self
            .decisions
            .iter()
            .filter_map(|(name, d)| d.reason().map(|r| format!("{name}: {r}")))
            .collect();

        if reasons.is_empty() {
            None
        } else {
            Some(reasons.join("; "))
        }
    }
}

/// Runs the status and compliance checks the policy enables.
pub fn run_eligibility_checks(carrier: &Carrier, policy: &MatchingPolicy) -> EligibilityResult {
    EligibilityResult::new(vec![
        ("status", check_status(carrier.status, policy)),
        ("compliance", check_compliance(carrier.compliance_status, policy)),
    ])
}

fn check_status(status: CarrierStatus, policy: &MatchingPolicy) -> EligibilityDecision {
    if policy.exclude_inactive_carriers && !status.is_active() {
        EligibilityDecision::Excluded {
            reason: format!("carrier status is {status}"),
        }
    } else {
        EligibilityDecision::Pass
    }
}

fn check_compliance(status: ComplianceStatus, policy: &MatchingPolicy) -> EligibilityDecision {
    if policy.exclude_non_compliant_carriers && status.is_non_compliant() {
        EligibilityDecision::Excluded {
            reason: "carrier is non-compliant".into(),
        }
    } else {
        EligibilityDecision::Pass
    }
}
