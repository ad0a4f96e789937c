use super::{features::FeatureSet, location::LocationMatch};
use crate::{Listing, Profile};

/// Short, UI-ready explanations in a fixed order: skills, location, stipend,
/// then any failed eligibility checks.
pub fn explain(profile: &Profile, listing: &Listing, features: &FeatureSet) -> Vec<String> {
    let mut reasons = Vec::with_capacity(4);

    let skills = &features.skills;
    if skills.required_count == 0 {
        reasons.push("No specific skills required".to_string());
    } else if skills.matched.is_empty() {
        reasons.push(format!(
            "None of the {} required skills matched",
            skills.required_count
        ));
    } else {
        reasons.push(format!(
            "Matches {} of {} required skills ({})",
            skills.matched.len(),
            skills.required_count,
            skills.matched.join(", ")
        ));
    }

    reasons.push(match features.location {
        LocationMatch::Remote => "Remote internship".to_string(),
        LocationMatch::Preferred => format!("In your preferred location: {}", listing.location),
        LocationMatch::NoPreference => format!("Located in {}", listing.location),
        LocationMatch::Mismatch => format!("Outside your preferred locations: {}", listing.location),
    });

    match (listing.stipend_amount, profile.stipend_expectation) {
        (None, _) => reasons.push("Stipend not specified".to_string()),
        (Some(_), None) => reasons.push("No stipend expectation set".to_string()),
        (Some(_), Some(_)) if features.stipend_fit >= 1.0 => {
            reasons.push("Stipend meets your expectation".to_string())
        }
        (Some(_), Some(_)) => reasons.push(format!(
            "Stipend is {:.0}% of your expectation",
            features.stipend_fit * 100.0
        )),
    }

    reasons.extend(features.eligibility.failure_reasons().map(str::to_string));
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::features::extract_features;
    use crate::ListingLocation;

    #[test]
    fn scenario_b_reasons_cover_every_factor() {
        let profile = Profile {
            skills: vec!["python".into(), "react".into()],
            preferred_locations: vec!["Remote".into()],
            cgpa: 8.0,
            ..Profile::default()
        };
        let listing = Listing {
            location: ListingLocation::from("Delhi"),
            stipend_amount: Some(50_000.0),
            cgpa_requirement: Some(9.0),
            ..Listing::default()
        };

        let reasons = explain(&profile, &listing, &extract_features(&profile, &listing));
        assert_eq!(
            reasons,
            vec![
                "No specific skills required",
                "Outside your preferred locations: Delhi",
                "No stipend expectation set",
                "CGPA 8.0 is below the required 9.0",
            ]
        );
    }

    #[test]
    fn partial_skill_and_stipend_reasons() {
        let profile = Profile {
            skills: vec!["python".into()],
            stipend_expectation: Some(10_000.0),
            ..Profile::default()
        };
        let listing = Listing {
            skills_required: vec!["Python".into(), "SQL".into()],
            location: ListingLocation::Remote,
            stipend_amount: Some(5_000.0),
            ..Listing::default()
        };

        let reasons = explain(&profile, &listing, &extract_features(&profile, &listing));
        assert_eq!(reasons[0], "Matches 1 of 2 required skills (python)");
        assert_eq!(reasons[1], "Remote internship");
        assert_eq!(reasons[2], "Stipend is 50% of your expectation");
        assert_eq!(reasons.len(), 3);
    }

    #[test]
    fn stipend_reason_follows_expectation() {
        let listing = Listing {
            location: ListingLocation::Remote,
            stipend_amount: Some(15_000.0),
            ..Listing::default()
        };
        let stipend_reason = |expectation: Option<f64>| {
            let profile = Profile {
                stipend_expectation: expectation,
                ..Profile::default()
            };
            explain(&profile, &listing, &extract_features(&profile, &listing))[2].clone()
        };

        assert_eq!(stipend_reason(None), "No stipend expectation set");
        assert_eq!(stipend_reason(Some(12_000.0)), "Stipend meets your expectation");
        assert_eq!(stipend_reason(Some(20_000.0)), "Stipend is 75% of your expectation");
    }
}
