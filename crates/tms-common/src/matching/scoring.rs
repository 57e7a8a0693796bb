use std::collections::BTreeSet;

use serde::Serialize;

use super::{config::MatcherConfig, jitter::JitterSource, policy::MatchingPolicy};
use crate::{
    corrections::{normalize_capability_set, normalize_region_set},
    Carrier, ComplianceStatus, JobRequirements,
};

pub const MAX_MATCH_SCORE: i32 = 100;

/// Points awarded for one scoring dimension plus the text explaining them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionScore {
    pub points: u32,
    pub max_points: u32,
    pub status: &'static str,
    pub reason: Option<String>,
    pub warning: Option<String>,
}

/// Per-dimension breakdown for one carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarrierScore {
    pub capability: DimensionScore,
    pub region: DimensionScore,
    pub compliance: DimensionScore,
    pub jitter: i32,
    /// Clamped into `[0, 100]`.
    pub total: u32,
}

impl CarrierScore {
    /// Reasons in evaluation order: capability, region, compliance.
    pub fn reasons(&self) -> Vec<String> {
        self.dimensions()
            .filter_map(|d| d.reason.clone())
            .collect()
    }

    /// Warnings in evaluation order: capability, region, compliance.
    pub fn warnings(&self) -> Vec<String> {
        self.dimensions()
            .filter_map(|d| d.warning.clone())
            .collect()
    }

    fn dimensions(&self) -> impl Iterator<Item = &DimensionScore> {
        [&self.capability, &self.region, &self.compliance].into_iter()
    }
}

/// Job tag sets, normalized once per matching run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSets {
    pub capabilities: BTreeSet<String>,
    pub regions: BTreeSet<String>,
}

impl RequirementSets {
    pub fn from_job(job: &JobRequirements) -> Self {
        Self {
            capabilities: normalize_capability_set(&job.required_capabilities),
            regions: normalize_region_set(&job.required_regions),
        }
    }
}

pub struct ScoringEngine {
    config: MatcherConfig,
}

impl ScoringEngine {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Scores a carrier on all dimensions, then applies one jitter draw.
    pub fn score_carrier(
        &self,
        requirements: &RequirementSets,
        carrier: &Carrier,
        policy: &MatchingPolicy,
        jitter: &mut dyn JitterSource,
    ) -> CarrierScore {
        let capability = self.score_capabilities(requirements, carrier, policy);
        let region = self.score_regions(requirements, carrier, policy);
        let compliance = self.score_compliance(carrier.compliance_status);

        // A spread wider than the whole point budget only saturates the clamp.
        let budget = i32::try_from(self.config.weights.max_total()).unwrap_or(i32::MAX);
        let spread = self.config.jitter_spread.clamp(0, budget.min(MAX_MATCH_SCORE));
        let jitter = jitter.next_in_range(-spread, spread);

        let subtotal = capability
            .points
            .saturating_add(region.points)
            .saturating_add(compliance.points);
        let raw = i32::try_from(subtotal)
            .unwrap_or(i32::MAX)
            .saturating_add(jitter);
        let total = raw.clamp(0, MAX_MATCH_SCORE) as u32;

        CarrierScore {
            capability,
            region,
            compliance,
            jitter,
            total,
        }
    }

    fn score_capabilities(
        &self,
        requirements: &RequirementSets,
        carrier: &Carrier,
        policy: &MatchingPolicy,
    ) -> DimensionScore {
        let offered = normalize_capability_set(&carrier.capabilities);
        let matched = requirements.capabilities.intersection(&offered).count();

        score_coverage(
            self.config.weights.capability,
            matched,
            requirements.capabilities.len(),
            policy.require_all_capabilities,
            CoverageText {
                full: "Has all required capabilities",
                partial_noun: "required capabilities",
                partial_verb: "Matches",
                partial_warning: "Missing some required capabilities",
                none_warning: "No matching capabilities",
            },
        )
    }

    fn score_regions(
        &self,
        requirements: &RequirementSets,
        carrier: &Carrier,
        policy: &MatchingPolicy,
    ) -> DimensionScore {
        let declared = carrier
            .operating_regions
            .as_deref()
            .map(normalize_region_set)
            .filter(|regions| !regions.is_empty());

        let Some(served) = declared else {
            return DimensionScore {
                points: self.config.weights.region_fallback,
                max_points: self.config.weights.region,
                status: "UNKNOWN",
                reason: Some("General regional coverage".into()),
                warning: Some("No specific regional information available".into()),
            };
        };

        let matched = requirements.regions.intersection(&served).count();

        score_coverage(
            self.config.weights.region,
            matched,
            requirements.regions.len(),
            policy.require_all_regions,
            CoverageText {
                full: "Operates in all required regions",
                partial_noun: "required regions",
                partial_verb: "Operates in",
                partial_warning: "Doesn't operate in all required regions",
                none_warning: "No regional coverage match",
            },
        )
    }

    fn score_compliance(&self, status: ComplianceStatus) -> DimensionScore {
        let weights = &self.config.weights;
        let max_points = weights.fully_compliant;

        match status {
            ComplianceStatus::FullyCompliant => DimensionScore {
                points: weights.fully_compliant,
                max_points,
                status: "PERFECT_MATCH",
                reason: Some("Fully compliant with regulations".into()),
                warning: None,
            },
            ComplianceStatus::Compliant => DimensionScore {
                points: weights.compliant,
                max_points,
                status: "MATCH",
                reason: Some("Compliant with regulations".into()),
                warning: None,
            },
            ComplianceStatus::Issues => DimensionScore {
                points: weights.compliance_issues,
                max_points,
                status: "PARTIAL_MATCH",
                reason: None,
                warning: Some("Has compliance issues that need attention".into()),
            },
            ComplianceStatus::NonCompliant | ComplianceStatus::Unrecognized => DimensionScore {
                points: 0,
                max_points,
                status: "MISS",
                reason: None,
                warning: Some("Non-compliant with regulations".into()),
            },
        }
    }
}

struct CoverageText {
    full: &'static str,
    partial_noun: &'static str,
    partial_verb: &'static str,
    partial_warning: &'static str,
    none_warning: &'static str,
}

/// Shared three-way branch for set coverage. An empty requirement set earns
/// full credit.
fn score_coverage(
    weight: u32,
    matched: usize,
    required: usize,
    require_all: bool,
    text: CoverageText,
) -> DimensionScore {
    if required == 0 || matched == required {
        return DimensionScore {
            points: weight,
            max_points: weight,
            status: "PERFECT_MATCH",
            reason: Some(text.full.into()),
            warning: None,
        };
    }

    if matched > 0 {
        let percent = rounded_share(100, matched, required);
        return DimensionScore {
            points: rounded_share(weight, matched, required),
            max_points: weight,
            status: "PARTIAL_MATCH",
            reason: Some(format!(
                "{} {}% of {}",
                text.partial_verb, percent, text.partial_noun
            )),
            warning: require_all.then(|| text.partial_warning.into()),
        };
    }

    DimensionScore {
        points: 0,
        max_points: weight,
        status: "MISS",
        reason: None,
        warning: Some(text.none_warning.into()),
    }
}

/// `round(scale * matched / required)` with halves rounded up. `required` must be > 0.
fn rounded_share(scale: u32, matched: usize, required: usize) -> u32 {
    let numerator = scale as u64 * matched as u64 * 2 + required as u64;
    (numerator / (required as u64 * 2)) as u32
}
