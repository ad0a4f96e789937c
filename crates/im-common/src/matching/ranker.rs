use std::{cmp::Ordering, sync::Arc};

use tracing::debug;

use super::{
    features::{FeatureSet, PreparedProfile},
    reasons::explain,
    scoring::Scorer,
};
use crate::{config::EngineConfig, error::MatchingError, Listing, Profile};

/// The engine's output unit for one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub listing_id: String,
    /// In `[0, 1]`.
    pub score: f64,
    pub reasons: Vec<String>,
    pub eligible: bool,
    pub features: FeatureSet,
}

/// Immutable listing catalog shared across ranking passes.
///
/// Cloning is cheap, so a caller can keep the snapshot it fetched and re-rank
/// after a profile edit without going back to the listing store.
#[derive(Debug, Clone)]
pub struct ListingSnapshot {
    listings: Arc<[Listing]>,
}

impl ListingSnapshot {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings: listings.into(),
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl From<Vec<Listing>> for ListingSnapshot {
    fn from(listings: Vec<Listing>) -> Self {
        Self::new(listings)
    }
}

/// Fully ordered ranking. Finite and restartable: `iter()` and `page()` can
/// be called any number of times and always see the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedListings {
    results: Vec<MatchResult>,
}

impl RankedListings {
    pub fn iter(&self) -> std::slice::Iter<'_, MatchResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Slice starting at `offset`; `limit = None` means "to the end".
    pub fn page(&self, offset: usize, limit: Option<usize>) -> &[MatchResult] {
        let start = offset.min(self.results.len());
        let end = match limit {
            Some(limit) => start.saturating_add(limit).min(self.results.len()),
            None => self.results.len(),
        };
        &self.results[start..end]
    }

    pub fn into_vec(self) -> Vec<MatchResult> {
        self.results
    }
}

impl IntoIterator for RankedListings {
    type Item = MatchResult;
    type IntoIter = std::vec::IntoIter<MatchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedListings {
    type Item = &'a MatchResult;
    type IntoIter = std::slice::Iter<'a, MatchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Scores every listing in a snapshot and produces a total order.
#[derive(Debug, Clone)]
pub struct Ranker {
    scorer: Scorer,
    parallel_threshold: usize,
    worker_threads: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(Scorer::default())
    }
}

impl Ranker {
    pub fn new(scorer: Scorer) -> Self {
        let defaults = EngineConfig::default();
        Self {
            scorer,
            parallel_threshold: defaults.parallel_threshold,
            worker_threads: defaults.worker_threads,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, MatchingError> {
        let scorer = Scorer::new(config.weights)?;
        Ok(Self::new(scorer).with_parallelism(config.parallel_threshold, config.worker_threads))
    }

    pub fn with_parallelism(mut self, threshold: usize, worker_threads: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self.worker_threads = worker_threads.max(1);
        self
    }

    /// Ranks the snapshot for `profile`.
    ///
    /// Order: score desc, eligible first, earlier location preference first
    /// (no match last), listing id asc.
    pub fn rank(&self, profile: &Profile, snapshot: &ListingSnapshot) -> RankedListings {
        let prepared = PreparedProfile::new(profile);
        let listings = snapshot.listings();
        let parallel = self.worker_threads > 1 && listings.len() >= self.parallel_threshold;

        let mut results = if parallel {
            self.evaluate_parallel(&prepared, listings)
        } else {
            listings
                .iter()
                .map(|listing| self.evaluate(&prepared, listing))
                .collect::<Vec<_>>()
        };

        results.sort_by(compare_results);

        debug!(
            profile_id = %profile.id,
            listings = listings.len(),
            parallel,
            "ranked listings"
        );

        RankedListings { results }
    }

    fn evaluate(&self, prepared: &PreparedProfile<'_>, listing: &Listing) -> MatchResult {
        let features = prepared.extract(listing);
        let score = self.scorer.score(&features);

        MatchResult {
            listing_id: listing.id.clone(),
            score,
            reasons: explain(prepared.profile, listing, &features),
            eligible: features.eligible(),
            features,
        }
    }

    /// Splits extraction over scoped worker threads. Chunks are joined back in
    /// input order, so the sort sees the same sequence as the sequential path.
    fn evaluate_parallel(
        &self,
        prepared: &PreparedProfile<'_>,
        listings: &[Listing],
    ) -> Vec<MatchResult> {
        let workers = self.worker_threads.min(listings.len()).max(1);
        let chunk_size = listings.len().div_ceil(workers);

        std::thread::scope(|scope| {
            let handles: Vec<_> = listings
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|listing| self.evaluate(prepared, listing))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        })
    }
}

fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.eligible.cmp(&a.eligible))
        .then_with(|| {
            let rank_a = a.features.preference_rank.unwrap_or(usize::MAX);
            let rank_b = b.features.preference_rank.unwrap_or(usize::MAX);
            rank_a.cmp(&rank_b)
        })
        .then_with(|| a.listing_id.cmp(&b.listing_id))
}
