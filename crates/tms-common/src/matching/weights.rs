/// Point budget per scoring dimension.
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    capability: 50,
    region: 30,
    region_fallback: 15,
    fully_compliant: 20,
    compliant: 15,
    compliance_issues: 5,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub capability: u32,
    pub region: u32,
    /// Awarded when a carrier declares no operating regions.
    pub region_fallback: u32,
    pub fully_compliant: u32,
    pub compliant: u32,
    pub compliance_issues: u32,
}

impl ScoreWeights {
    /// Best achievable score before jitter.
    pub fn max_total(&self) -> u32 {
        self.capability
            .saturating_add(self.region)
            .saturating_add(self.fully_compliant)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one_hundred() {
        assert_eq!(DEFAULT_WEIGHTS.max_total(), 100);
    }

    #[test]
    fn fallback_is_half_of_region_credit() {
        assert_eq!(DEFAULT_WEIGHTS.region_fallback * 2, DEFAULT_WEIGHTS.region);
    }

    #[test]
    fn max_total_saturates() {
        let weights = ScoreWeights {
            capability: u32::MAX,
            ..DEFAULT_WEIGHTS
        };
        assert_eq!(weights.max_total(), u32::MAX);
    }
}
