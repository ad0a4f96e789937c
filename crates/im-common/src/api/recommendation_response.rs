use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::matching::{location::LocationMatch, MatchResult};

/// Response body for a student's recommendations.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub student_id: String,
    /// Number of entries in `results`.
    pub total: usize,
    pub results: Vec<MatchResultDto>,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationResponse {
    pub fn new(student_id: impl Into<String>, results: &[MatchResult], generated_at: DateTime<Utc>) -> Self {
        let results: Vec<MatchResultDto> = results.iter().map(MatchResultDto::from).collect();
        Self {
            student_id: student_id.into(),
            total: results.len(),
            results,
            generated_at,
        }
    }
}

/// One ranked listing as the UI consumes it.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResultDto {
    pub listing_id: String,
    pub score: f64,
    /// `score` rounded to a whole percent, for badges.
    pub score_percent: u8,
    pub eligible: bool,
    pub reasons: Vec<String>,
    pub breakdown: FeatureBreakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureBreakdown {
    pub skill_overlap: f64,
    pub location_fit: f64,
    pub stipend_fit: f64,
    pub location_match: LocationMatch,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl From<&MatchResult> for MatchResultDto {
    fn from(result: &MatchResult) -> Self {
        let features = &result.features;
        Self {
            listing_id: result.listing_id.clone(),
            score: result.score,
            score_percent: (result.score.clamp(0.0, 1.0) * 100.0).round() as u8,
            eligible: result.eligible,
            reasons: result.reasons.clone(),
            breakdown: FeatureBreakdown {
                skill_overlap: features.skill_overlap,
                location_fit: features.location_fit,
                stipend_fit: features.stipend_fit,
                location_match: features.location,
                matched_skills: features.skills.matched.clone(),
                missing_skills: features.skills.missing.clone(),
            },
        }
    }
}
