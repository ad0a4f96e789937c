use std::collections::HashSet;

use serde::Deserialize;

use crate::recommend::RecommendOptions;

/// Query string of `GET /api/students/:student_id/recommendations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default)]
    pub include_ineligible: bool,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    /// Comma-separated listing ids.
    #[serde(default)]
    pub exclude: Option<String>,
}

impl RecommendationQuery {
    pub fn exclude_ids(&self) -> HashSet<String> {
        self.exclude
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Range checks belong to the caller; this only maps fields.
    pub fn to_options(&self) -> RecommendOptions {
        RecommendOptions {
            include_ineligible: self.include_ineligible,
            min_score: self.min_score.unwrap_or(0.0),
            limit: self.limit,
            offset: self.offset.unwrap_or(0),
            exclude_listing_ids: self.exclude_ids(),
            deadline: None,
        }
    }
}
