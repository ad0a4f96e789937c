pub mod eligibility;
pub mod features;
pub mod location;
pub mod ranker;
pub mod reasons;
pub mod scoring;
pub mod skills;
pub mod weights;

pub use features::{extract_features, FeatureSet, PreparedProfile};
pub use ranker::{ListingSnapshot, MatchResult, RankedListings, Ranker};
pub use scoring::Scorer;
pub use weights::{Weights, DEFAULT_WEIGHTS};
