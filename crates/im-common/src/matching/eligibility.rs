use crate::{normalize::clamp_non_negative, Listing, Profile};

/// Outcome of one hard-constraint check.
#[derive(Debug, Clone, PartialEq)]
pub enum EligibilityDecision {
    Pass,
    Fail { reason: String },
}

impl EligibilityDecision {
    pub fn is_fail(&self) -> bool {
        matches!(self, EligibilityDecision::Fail { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            EligibilityDecision::Fail { reason } => Some(reason),
            EligibilityDecision::Pass => None,
        }
    }
}

/// Aggregated eligibility gate (check name, decision).
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub decisions: Vec<(&'static str, EligibilityDecision)>,
}

impl EligibilityResult {
    pub fn new(decisions: Vec<(&'static str, EligibilityDecision)>) -> Self {
        let eligible = !decisions.iter().any(|(_, d)| d.is_fail());
        Self {
            eligible,
            decisions,
        }
    }

    pub fn failure_reasons(&self) -> impl Iterator<Item = &str> {
        self.decisions.iter().filter_map(|(_, d)| d.reason())
    }
}

/// Runs every hard-constraint check. A failure demotes the listing; it never
/// removes it or zeroes its score.
pub fn run_eligibility_checks(profile: &Profile, listing: &Listing) -> EligibilityResult {
    EligibilityResult::new(vec![
        ("cgpa", check_cgpa(profile, listing)),
        ("duration", check_duration(profile, listing)),
    ])
}

fn check_cgpa(profile: &Profile, listing: &Listing) -> EligibilityDecision {
    let Some(required) = listing.cgpa_requirement.map(clamp_non_negative) else {
        return EligibilityDecision::Pass;
    };
    let actual = clamp_non_negative(profile.cgpa);

    if actual >= required {
        EligibilityDecision::Pass
    } else {
        EligibilityDecision::Fail {
            reason: format!("CGPA {actual:.1} is below the required {required:.1}"),
        }
    }
}

fn check_duration(profile: &Profile, listing: &Listing) -> EligibilityDecision {
    match (listing.duration_weeks, profile.available_duration_weeks) {
        (Some(required), Some(available)) if required > available => EligibilityDecision::Fail {
            reason: format!("Runs {required} weeks, you are available for {available}"),
        },
        _ => EligibilityDecision::Pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: "s-1".into(),
            cgpa: 8.0,
            available_duration_weeks: Some(8),
            ..Profile::default()
        }
    }

    #[test]
    fn passes_without_constraints() {
        let result = run_eligibility_checks(&profile(), &Listing::default());
        assert!(result.eligible);
        assert_eq!(result.decisions.len(), 2);
        assert_eq!(result.failure_reasons().count(), 0);
    }

    #[test]
    fn fails_on_cgpa_below_requirement() {
        let listing = Listing {
            cgpa_requirement: Some(9.0),
            ..Listing::default()
        };

        let result = run_eligibility_checks(&profile(), &listing);
        assert!(!result.eligible);
        let reasons: Vec<_> = result.failure_reasons().collect();
        assert_eq!(reasons, vec!["CGPA 8.0 is below the required 9.0"]);
    }

    #[test]
    fn cgpa_equal_to_requirement_passes() {
        let listing = Listing {
            cgpa_requirement: Some(8.0),
            ..Listing::default()
        };
        assert!(run_eligibility_checks(&profile(), &listing).eligible);
    }

    #[test]
    fn negative_requirement_and_cgpa_are_clamped() {
        let listing = Listing {
            cgpa_requirement: Some(-3.0),
            ..Listing::default()
        };
        let mut student = profile();
        student.cgpa = -1.0;

        assert!(run_eligibility_checks(&student, &listing).eligible);
    }

    #[test]
    fn duration_longer_than_availability_fails() {
        let listing = Listing {
            duration_weeks: Some(12),
            ..Listing::default()
        };
        let result = run_eligibility_checks(&profile(), &listing);
        assert!(!result.eligible);

        let mut open_ended = profile();
        open_ended.available_duration_weeks = None;
        assert!(run_eligibility_checks(&open_ended, &listing).eligible);
    }
}
