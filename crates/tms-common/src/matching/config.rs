use tracing::warn;

use super::weights::{ScoreWeights, DEFAULT_WEIGHTS};

pub const MIN_SCORE_ENV: &str = "TMS_MATCH_MIN_SCORE";
pub const MAX_RESULTS_ENV: &str = "TMS_MATCH_MAX_RESULTS";
pub const JITTER_SPREAD_ENV: &str = "TMS_MATCH_JITTER_SPREAD";

#[derive(Debug, Clone)]
pub struct MatcherConfig {
    pub weights: ScoreWeights,
    /// Results must score strictly above this to be returned.
    pub min_score: u32,
    /// Ranked list is cut to this many entries.
    pub max_results: usize,
    /// Jitter is drawn from `[-jitter_spread, jitter_spread]`.
    pub jitter_spread: i32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            min_score: 40,
            max_results: 5,
            jitter_spread: 5,
        }
    }
}

impl MatcherConfig {
    /// Defaults overridden by `TMS_MATCH_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            weights: defaults.weights,
            min_score: parse_or(&lookup, MIN_SCORE_ENV, defaults.min_score, |v: &u32| {
                *v <= 100
            }),
            max_results: parse_or(&lookup, MAX_RESULTS_ENV, defaults.max_results, |v| *v > 0),
            jitter_spread: parse_or(&lookup, JITTER_SPREAD_ENV, defaults.jitter_spread, |v| {
                (0..=100).contains(v)
            }),
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            warn!(env = key, value = %raw, fallback = %default, "invalid matcher setting; using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = MatcherConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.min_score, 40);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.jitter_spread, 5);
    }

    #[test]
    fn applies_valid_overrides() {
        let config = MatcherConfig::from_lookup(lookup_from(&[
            (MIN_SCORE_ENV, "55"),
            (MAX_RESULTS_ENV, "10"),
            (JITTER_SPREAD_ENV, "0"),
        ]));
        assert_eq!(config.min_score, 55);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.jitter_spread, 0);
    }

    #[test]
    fn invalid_overrides_fall_back() {
        let config = MatcherConfig::from_lookup(lookup_from(&[
            (MIN_SCORE_ENV, "abc"),
            (MAX_RESULTS_ENV, "0"),
            (JITTER_SPREAD_ENV, "-3"),
        ]));
        assert_eq!(config.min_score, 40);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.jitter_spread, 5);
    }
}
