pub mod config;
pub mod eligibility;
pub mod jitter;
pub mod pipeline;
pub mod policy;
pub mod scoring;
pub mod weights;

pub use config::MatcherConfig;
pub use eligibility::{EligibilityDecision, EligibilityResult};
pub use jitter::{FixedJitter, JitterSource, NoJitter, RandomJitter};
pub use pipeline::{
    find_best_matches, CarrierMatcher, ExcludedCarrier, MatchOutcome, MatchResult, RankedCarrier,
};
pub use policy::MatchingPolicy;
pub use scoring::{CarrierScore, DimensionScore};
