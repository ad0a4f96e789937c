use std::collections::BTreeSet;

use super::{
    eligibility::{run_eligibility_checks, EligibilityResult},
    location::{evaluate_location, preference_rank, LocationMatch},
    skills::{skill_overlap, SkillOverlap},
};
use crate::{
    normalize::{clamp_non_negative, normalize_location_preferences},
    skill_normalizer::normalize_skill_set,
    Listing, Profile,
};

/// Comparable features for one profile/listing pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub skill_overlap: f64,
    pub location_fit: f64,
    pub stipend_fit: f64,
    pub eligibility: EligibilityResult,
    pub skills: SkillOverlap,
    pub location: LocationMatch,
    /// Position of the listing's location in the student's preferences.
    pub preference_rank: Option<usize>,
}

impl FeatureSet {
    pub fn eligible(&self) -> bool {
        self.eligibility.eligible
    }
}

/// A profile with its skills and locations normalized once, so ranking a
/// whole catalog does not renormalize the student side per listing.
#[derive(Debug, Clone)]
pub struct PreparedProfile<'a> {
    pub profile: &'a Profile,
    pub skills: BTreeSet<String>,
    pub preferred_locations: Vec<String>,
}

impl<'a> PreparedProfile<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self {
            profile,
            skills: normalize_skill_set(&profile.skills),
            preferred_locations: normalize_location_preferences(&profile.preferred_locations),
        }
    }

    pub fn extract(&self, listing: &Listing) -> FeatureSet {
        let required = normalize_skill_set(&listing.skills_required);
        let skills = skill_overlap(&required, &self.skills);
        let location = evaluate_location(&self.preferred_locations, &listing.location);

        FeatureSet {
            skill_overlap: skills.ratio,
            location_fit: location.fit,
            stipend_fit: stipend_fit(listing.stipend_amount, self.profile.stipend_expectation),
            eligibility: run_eligibility_checks(self.profile, listing),
            skills,
            location: location.kind,
            preference_rank: preference_rank(&self.preferred_locations, &listing.location),
        }
    }
}

/// Pure feature extraction for a single pair.
pub fn extract_features(profile: &Profile, listing: &Listing) -> FeatureSet {
    PreparedProfile::new(profile).extract(listing)
}

/// 1.0 when either side is unspecified or the stipend meets the expectation;
/// otherwise decays linearly with `stipend / expectation`. Negative inputs are
/// clamped to zero first.
pub fn stipend_fit(stipend: Option<f64>, expectation: Option<f64>) -> f64 {
    let (Some(stipend), Some(expectation)) = (stipend, expectation) else {
        return 1.0;
    };

    let stipend = clamp_non_negative(stipend);
    let expectation = clamp_non_negative(expectation);

    if stipend >= expectation {
        1.0
    } else {
        clamp_non_negative(stipend / expectation).min(1.0)
    }
}
