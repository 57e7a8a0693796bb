use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::matching::{ExcludedCarrier, MatchOutcome, MatchResult, RankedCarrier};

/// Ranked carriers for one job, as returned to the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub job_id: String,
    pub matches: Vec<MatchResult>,

    // === counts ===
    pub evaluated: usize,
    pub eligible: usize,
    pub above_threshold: usize,

    // === explain mode only ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdowns: Option<Vec<RankedCarrier>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded: Option<Vec<ExcludedCarrier>>,

    pub engine_version: String,
    pub matched_at: DateTime<Utc>,
}

impl MatchResponse {
    /// Builds the response; `explain` keeps score breakdowns and exclusions.
    pub fn from_outcome(outcome: MatchOutcome, explain: bool, matched_at: DateTime<Utc>) -> Self {
        let matches = outcome.ranked.iter().map(|r| r.result.clone()).collect();
        let (breakdowns, excluded) = if explain {
            (Some(outcome.ranked), Some(outcome.excluded))
        } else {
            (None, None)
        };

        Self {
            job_id: outcome.job_id,
            matches,
            evaluated: outcome.evaluated,
            eligible: outcome.eligible,
            above_threshold: outcome.above_threshold,
            breakdowns,
            excluded,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            matched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        matching::{CarrierMatcher, MatchingPolicy, NoJitter},
        Carrier, CarrierStatus, ComplianceStatus, JobRequirements,
    };

    fn outcome() -> MatchOutcome {
        let job = JobRequirements {
            id: "J-9".into(),
            required_capabilities: vec!["dry-van".into()],
            ..JobRequirements::default()
        };
        let mut good = Carrier::new("C-1", "Good", CarrierStatus::Active, ComplianceStatus::Compliant);
        good.capabilities = vec!["Dry Van".into()];
        let retired = Carrier::new("C-2", "Retired", CarrierStatus::Inactive, ComplianceStatus::Compliant);

        CarrierMatcher::default().rank_carriers(
            &job,
            &[good, retired],
            &MatchingPolicy::default(),
            &mut NoJitter,
        )
    }

    #[test]
    fn plain_response_omits_explain_fields() {
        let response = MatchResponse::from_outcome(outcome(), false, Utc::now());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["jobId"], "J-9");
        assert_eq!(json["matches"][0]["carrierId"], "C-1");
        assert_eq!(json["matches"][0]["matchScore"], 80);
        assert_eq!(json["evaluated"], 2);
        assert_eq!(json["eligible"], 1);
        assert!(json.get("breakdowns").is_none());
        assert!(json.get("excluded").is_none());
    }

    #[test]
    fn explain_response_keeps_breakdowns() {
        let response = MatchResponse::from_outcome(outcome(), true, Utc::now());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["breakdowns"][0]["score"]["region"]["points"], 15);
        assert_eq!(json["excluded"][0]["carrierId"], "C-2");
    }
}
