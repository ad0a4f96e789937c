pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod recommend;
pub mod skill_normalizer;
pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::{MatchingError, StoreError};

/// Student attributes relevant to matching.
///
/// The engine always receives a complete snapshot; edits arrive as a full
/// replacement of this struct, never as a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    /// Raw skill tokens; normalized and deduplicated at match time.
    pub skills: Vec<String>,
    /// First entry is the strongest preference.
    pub preferred_locations: Vec<String>,
    pub education_level: Option<String>,
    pub course: Option<String>,
    pub graduation_year: Option<i32>,
    pub cgpa: f64,
    pub social_category: Option<String>,
    pub family_income_band: Option<String>,
    pub stipend_expectation: Option<f64>,
    pub available_duration_weeks: Option<u32>,
}

/// Internship posting attributes relevant to matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub skills_required: Vec<String>,
    pub location: ListingLocation,
    /// `None` means unpaid or unspecified.
    pub stipend_amount: Option<f64>,
    pub duration_weeks: Option<u32>,
    pub cgpa_requirement: Option<f64>,
    pub is_active: bool,
    pub is_approved: bool,
}

impl Listing {
    pub fn is_listable(&self) -> bool {
        self.is_active && self.is_approved
    }
}

/// Where an internship takes place.
///
/// Serialized as a plain string; any remote spelling (`"Remote"`, `"WFH"`,
/// `"work from home"`, ...) deserializes to [`ListingLocation::Remote`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListingLocation {
    #[default]
    Remote,
    OnSite(String),
}

impl ListingLocation {
    pub fn is_remote(&self) -> bool {
        matches!(self, ListingLocation::Remote)
    }

    /// Normalized token used for preference comparison.
    pub fn token(&self) -> String {
        match self {
            ListingLocation::Remote => normalize::REMOTE_TOKEN.to_string(),
            ListingLocation::OnSite(city) => normalize::normalize_location(city),
        }
    }
}

impl From<String> for ListingLocation {
    fn from(value: String) -> Self {
        if normalize::is_remote_token(&value) {
            ListingLocation::Remote
        } else {
            ListingLocation::OnSite(value.trim().to_string())
        }
    }
}

impl From<&str> for ListingLocation {
    fn from(value: &str) -> Self {
        ListingLocation::from(value.to_string())
    }
}

impl From<ListingLocation> for String {
    fn from(value: ListingLocation) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ListingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingLocation::Remote => f.write_str("Remote"),
            ListingLocation::OnSite(city) => f.write_str(city),
        }
    }
}
