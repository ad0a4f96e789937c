use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::{
    config::EngineConfig,
    error::{MatchingError, StoreError},
    matching::{ListingSnapshot, MatchResult, Ranker},
    store::{ListingStore, ProfileStore},
    Listing, Profile,
};

/// Per-call recommendation options.
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    /// Keep listings that fail the eligibility gate ("almost qualified").
    pub include_ineligible: bool,
    pub min_score: f64,
    /// `None` returns everything after `offset`.
    pub limit: Option<usize>,
    pub offset: usize,
    /// Listings the caller already saved or applied to.
    pub exclude_listing_ids: HashSet<String>,
    /// Overrides the configured fetch timeout.
    pub deadline: Option<Duration>,
}

/// Entry point for recommendations: fetches a profile and the catalog, ranks
/// once, filters and paginates. Holds no state between calls.
pub struct RecommendationService {
    profiles: Arc<dyn ProfileStore>,
    listings: Arc<dyn ListingStore>,
    ranker: Ranker,
    fetch_timeout: Duration,
}

impl RecommendationService {
    /// Fails with `InvalidConfiguration` when the configured weights are
    /// invalid; the service cannot be built in that case.
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        listings: Arc<dyn ListingStore>,
        config: &EngineConfig,
    ) -> Result<Self, MatchingError> {
        Ok(Self {
            profiles,
            listings,
            ranker: Ranker::from_config(config)?,
            fetch_timeout: config.fetch_timeout,
        })
    }

    #[instrument(skip(self, options), fields(include_ineligible = options.include_ineligible))]
    pub async fn recommend(
        &self,
        student_id: &str,
        options: &RecommendOptions,
    ) -> Result<Vec<MatchResult>, MatchingError> {
        let deadline = options.deadline.unwrap_or(self.fetch_timeout);
        let fetch = async {
            tokio::try_join!(
                self.profiles.get_profile(student_id),
                self.listings.list_active_approved_listings()
            )
        };

        let (profile, listings) = tokio::time::timeout(deadline, fetch)
            .await
            .map_err(|_| MatchingError::Timeout(deadline))??;

        let profile = profile.ok_or_else(|| MatchingError::ProfileNotFound(student_id.to_string()))?;
        let snapshot = ListingSnapshot::new(only_listable(listings));

        let results = self.rank_filtered(&profile, &snapshot, options);
        info!(
            catalog = snapshot.len(),
            returned = results.len(),
            "recommendations computed"
        );
        Ok(results)
    }

    /// Fetches the catalog once so the caller can re-rank it later.
    pub async fn fetch_snapshot(
        &self,
        deadline: Option<Duration>,
    ) -> Result<ListingSnapshot, MatchingError> {
        let deadline = deadline.unwrap_or(self.fetch_timeout);
        let listings = tokio::time::timeout(deadline, self.listings.list_active_approved_listings())
            .await
            .map_err(|_| MatchingError::Timeout(deadline))??;

        Ok(ListingSnapshot::new(only_listable(listings)))
    }

    /// Re-ranks a held snapshot against an edited profile. No I/O.
    pub fn rerank(
        &self,
        profile: &Profile,
        snapshot: &ListingSnapshot,
        options: &RecommendOptions,
    ) -> Vec<MatchResult> {
        if snapshot.listings().iter().all(Listing::is_listable) {
            return self.rank_filtered(profile, snapshot, options);
        }

        let filtered = ListingSnapshot::new(only_listable(snapshot.listings().to_vec()));
        self.rank_filtered(profile, &filtered, options)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.listings.ping().await
    }

    fn rank_filtered(
        &self,
        profile: &Profile,
        snapshot: &ListingSnapshot,
        options: &RecommendOptions,
    ) -> Vec<MatchResult> {
        self.ranker
            .rank(profile, snapshot)
            .into_iter()
            .filter(|result| options.include_ineligible || result.eligible)
            .filter(|result| result.score >= options.min_score)
            .filter(|result| !options.exclude_listing_ids.contains(&result.listing_id))
            .skip(options.offset)
            .take(options.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

fn only_listable(listings: Vec<Listing>) -> Vec<Listing> {
    let total = listings.len();
    let listable: Vec<Listing> = listings.into_iter().filter(Listing::is_listable).collect();

    let dropped = total - listable.len();
    if dropped > 0 {
        warn!(dropped, "listing store returned inactive or unapproved listings");
    }
    listable
}

/// Listing ids in `current` that were not in `previous`, in `current` order.
/// Callers use this to decide on "new match" notifications.
pub fn new_matches<'a>(previous: &[MatchResult], current: &'a [MatchResult]) -> Vec<&'a str> {
    let seen: HashSet<&str> = previous.iter().map(|r| r.listing_id.as_str()).collect();
    current
        .iter()
        .map(|result| result.listing_id.as_str())
        .filter(|id| !seen.contains(id))
        .collect()
}
