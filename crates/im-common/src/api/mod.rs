pub mod recommendation_query;
pub mod recommendation_response;

pub use recommendation_query::RecommendationQuery;
pub use recommendation_response::{FeatureBreakdown, MatchResultDto, RecommendationResponse};
