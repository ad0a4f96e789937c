use super::{features::FeatureSet, weights::Weights};
use crate::error::MatchingError;

/// Combines a [`FeatureSet`] into one score in `[0, 1]`.
///
/// Weights are validated at construction, so a built scorer cannot produce a
/// score outside the range.
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: Weights,
}

impl Scorer {
    pub fn new(weights: Weights) -> Result<Self, MatchingError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn score(&self, features: &FeatureSet) -> f64 {
        let eligibility_bonus = if features.eligible() { 1.0 } else { 0.0 };
        let w = self.weights;

        let total = w.skills * features.skill_overlap
            + w.location * features.location_fit
            + w.stipend * features.stipend_fit
            + w.eligibility * eligibility_bonus;

        // Sum tolerance is 1e-6, so a perfect match can land a hair above 1.0.
        total.clamp(0.0, 1.0)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
        }
    }
}
