use crate::error::MatchingError;

const SUM_TOLERANCE: f64 = 1e-6;

/// Default weighting: skills dominate, location next, stipend and
/// eligibility share the rest.
pub const DEFAULT_WEIGHTS: Weights = Weights {
    skills: 0.45,
    location: 0.25,
    stipend: 0.15,
    eligibility: 0.15,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub skills: f64,
    pub location: f64,
    pub stipend: f64,
    pub eligibility: f64,
}

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skills + self.location + self.stipend + self.eligibility
    }

    fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("skills", self.skills),
            ("location", self.location),
            ("stipend", self.stipend),
            ("eligibility", self.eligibility),
        ]
    }

    /// Each weight must be finite and non-negative, and the total within 1e-6 of 1.0.
    pub fn validate(&self) -> Result<(), MatchingError> {
        for (name, value) in self.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchingError::InvalidConfiguration(format!(
                    "weight {name} must be a non-negative number, got {value}"
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(MatchingError::InvalidConfiguration(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }

        Ok(())
    }
}
