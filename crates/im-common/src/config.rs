use std::time::Duration;

use crate::matching::weights::{Weights, DEFAULT_WEIGHTS};

const DEFAULT_FETCH_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_PARALLEL_THRESHOLD: usize = 2_000;
const DEFAULT_WORKER_THREADS: usize = 4;

/// Engine settings. Weights are validated when the scorer is built, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub weights: Weights,
    /// Deadline for the profile + listing fetch when the caller gives none.
    pub fetch_timeout: Duration,
    /// Catalog size at which feature extraction is split across workers.
    pub parallel_threshold: usize,
    pub worker_threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            worker_threads: DEFAULT_WORKER_THREADS,
        }
    }
}

impl EngineConfig {
    /// Reads `IM_WEIGHT_*`, `IM_FETCH_TIMEOUT_MS`, `IM_PARALLEL_THRESHOLD` and
    /// `IM_WORKER_THREADS`. Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let float = |name: &str| lookup(name).and_then(|raw| raw.trim().parse::<f64>().ok());
        let unsigned = |name: &str| {
            lookup(name)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|value| *value > 0)
        };

        let defaults = Self::default();
        let weights = Weights {
            skills: float("IM_WEIGHT_SKILLS").unwrap_or(defaults.weights.skills),
            location: float("IM_WEIGHT_LOCATION").unwrap_or(defaults.weights.location),
            stipend: float("IM_WEIGHT_STIPEND").unwrap_or(defaults.weights.stipend),
            eligibility: float("IM_WEIGHT_ELIGIBILITY").unwrap_or(defaults.weights.eligibility),
        };

        Self {
            weights,
            fetch_timeout: unsigned("IM_FETCH_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.fetch_timeout),
            parallel_threshold: unsigned("IM_PARALLEL_THRESHOLD")
                .map(|v| v as usize)
                .unwrap_or(defaults.parallel_threshold),
            worker_threads: unsigned("IM_WORKER_THREADS")
                .map(|v| v as usize)
                .unwrap_or(defaults.worker_threads),
        }
    }
}
