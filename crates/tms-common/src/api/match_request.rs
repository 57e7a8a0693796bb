use serde::Deserialize;

use crate::{matching::MatchingPolicy, Carrier, JobRequirements};

/// Matching request as posted by the carrier-matching screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub job: JobRequirements,
    #[serde(default)]
    pub carriers: Vec<Carrier>,
    #[serde(default)]
    pub policy: MatchingPolicy,
    /// Overrides the configured result cap.
    #[serde(default)]
    pub limit: Option<usize>,
}
