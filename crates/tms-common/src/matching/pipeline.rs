use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    config::MatcherConfig,
    eligibility::{run_eligibility_checks, EligibilityResult},
    jitter::{JitterSource, RandomJitter},
    policy::MatchingPolicy,
    scoring::{CarrierScore, RequirementSets, ScoringEngine},
};
use crate::{Carrier, JobRequirements};

/// One ranked carrier as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub job_id: String,
    pub carrier_id: String,
    pub carrier_name: String,
    pub match_score: u32,
    pub match_reasons: Vec<String>,
    pub match_warnings: Vec<String>,
}

/// A ranked carrier together with its score breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCarrier {
    pub result: MatchResult,
    pub score: CarrierScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedCarrier {
    pub carrier_id: String,
    pub carrier_name: String,
    pub reason: String,
}

/// Everything a matching run produced, including who was dropped and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub job_id: String,
    pub ranked: Vec<RankedCarrier>,
    pub excluded: Vec<ExcludedCarrier>,
    /// Size of the candidate pool.
    pub evaluated: usize,
    /// Carriers that survived the eligibility pre-filter.
    pub eligible: usize,
    /// Eligible carriers scoring above the threshold, before truncation.
    pub above_threshold: usize,
}

impl MatchOutcome {
    pub fn into_results(self) -> Vec<MatchResult> {
        self.ranked.into_iter().map(|r| r.result).collect()
    }
}

pub struct CarrierMatcher {
    engine: ScoringEngine,
}

impl CarrierMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            engine: ScoringEngine::new(config),
        }
    }

    /// Eligibility only, for explaining why a carrier was left out.
    pub fn evaluate_eligibility(
        &self,
        carrier: &Carrier,
        policy: &MatchingPolicy,
    ) -> EligibilityResult {
        run_eligibility_checks(carrier, policy)
    }

    /// Scores a single carrier regardless of eligibility.
    pub fn score_carrier(
        &self,
        job: &JobRequirements,
        carrier: &Carrier,
        policy: &MatchingPolicy,
        jitter: &mut dyn JitterSource,
    ) -> CarrierScore {
        self.engine
            .score_carrier(&RequirementSets::from_job(job), carrier, policy, jitter)
    }

    /// Pre-filter, score, drop scores at or below the threshold, sort by score
    /// (stable, so ties keep pool order) and keep the top entries.
    pub fn rank_carriers(
        &self,
        job: &JobRequirements,
        carriers: &[Carrier],
        policy: &MatchingPolicy,
        jitter: &mut dyn JitterSource,
    ) -> MatchOutcome {
        let requirements = RequirementSets::from_job(job);
        let config = self.engine.config();

        let mut excluded = Vec::new();
        let mut eligible = 0;
        let mut ranked = Vec::new();

        for carrier in carriers {
            let eligibility = run_eligibility_checks(carrier, policy);
            if eligibility.is_excluded {
                let reason = eligibility.exclusion_reasons().unwrap_or_default();
                debug!(job_id = %job.id, carrier_id = %carrier.id, %reason, "carrier excluded");
                excluded.push(ExcludedCarrier {
                    carrier_id: carrier.id.clone(),
                    carrier_name: carrier.name.clone(),
                    reason,
                });
                continue;
            }
            eligible += 1;

            let score = self
                .engine
                .score_carrier(&requirements, carrier, policy, jitter);
            debug!(
                job_id = %job.id,
                carrier_id = %carrier.id,
                capability = score.capability.points,
                region = score.region.points,
                compliance = score.compliance.points,
                jitter = score.jitter,
                total = score.total,
                "carrier scored"
            );

            if score.total <= config.min_score {
                continue;
            }

            ranked.push(build_ranked_carrier(job, carrier, score));
        }

        let above_threshold = ranked.len();
        ranked.sort_by(|a, b| b.result.match_score.cmp(&a.result.match_score));
        ranked.truncate(config.max_results);

        info!(
            job_id = %job.id,
            evaluated = carriers.len(),
            eligible,
            above_threshold,
            returned = ranked.len(),
            "carrier matching complete"
        );

        MatchOutcome {
            job_id: job.id.clone(),
            ranked,
            excluded,
            evaluated: carriers.len(),
            eligible,
            above_threshold,
        }
    }

    /// Ranked matches for a job with an injected jitter source.
    pub fn find_best_matches(
        &self,
        job: &JobRequirements,
        carriers: &[Carrier],
        policy: &MatchingPolicy,
        jitter: &mut dyn JitterSource,
    ) -> Vec<MatchResult> {
        self.rank_carriers(job, carriers, policy, jitter)
            .into_results()
    }
}

impl Default for CarrierMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

fn build_ranked_carrier(job: &JobRequirements, carrier: &Carrier, score: CarrierScore) -> RankedCarrier {
    RankedCarrier {
        result: MatchResult {
            job_id: job.id.clone(),
            carrier_id: carrier.id.clone(),
            carrier_name: carrier.name.clone(),
            match_score: score.total,
            match_reasons: score.reasons(),
            match_warnings: score.warnings(),
        },
        score,
    }
}

/// Ranked matches with the default configuration and an OS-seeded jitter
/// source. `None` uses [`MatchingPolicy::default`].
pub fn find_best_matches(
    job: &JobRequirements,
    carriers: &[Carrier],
    policy: Option<&MatchingPolicy>,
) -> Vec<MatchResult> {
    let policy = policy.copied().unwrap_or_default();
    CarrierMatcher::default().find_best_matches(job, carriers, &policy, &mut RandomJitter::new())
}
