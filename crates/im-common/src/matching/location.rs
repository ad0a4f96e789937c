use serde::Serialize;

use crate::ListingLocation;

/// Neutral credit when the student gave no location preference.
pub const NO_PREFERENCE_FIT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMatch {
    /// Remote listings bypass location constraints entirely.
    Remote,
    Preferred,
    NoPreference,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationEvaluation {
    pub fit: f64,
    pub kind: LocationMatch,
}

/// Location fit against a normalized preference list.
///
/// Preference order does not change the fit; it only feeds the ranker's
/// tie-break through [`preference_rank`].
pub fn evaluate_location(preferences: &[String], location: &ListingLocation) -> LocationEvaluation {
    if location.is_remote() {
        return LocationEvaluation {
            fit: 1.0,
            kind: LocationMatch::Remote,
        };
    }

    if preferences.is_empty() {
        return LocationEvaluation {
            fit: NO_PREFERENCE_FIT,
            kind: LocationMatch::NoPreference,
        };
    }

    if preference_rank(preferences, location).is_some() {
        LocationEvaluation {
            fit: 1.0,
            kind: LocationMatch::Preferred,
        }
    } else {
        LocationEvaluation {
            fit: 0.0,
            kind: LocationMatch::Mismatch,
        }
    }
}

/// Index of the listing's location in the preference list, if present.
/// Remote listings look up the remote token.
pub fn preference_rank(preferences: &[String], location: &ListingLocation) -> Option<usize> {
    let token = location.token();
    preferences.iter().position(|preferred| *preferred == token)
}
