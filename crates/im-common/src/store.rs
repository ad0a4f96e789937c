use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::{error::StoreError, Listing, Profile};

/// Source of complete student profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `Ok(None)` when the student has no completed profile.
    async fn get_profile(&self, student_id: &str) -> Result<Option<Profile>, StoreError>;
}

/// Source of the listing catalog.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Listings that are both active and approved.
    async fn list_active_approved_listings(&self) -> Result<Vec<Listing>, StoreError>;

    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-process store backing tests and local runs.
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
    listings: Arc<RwLock<Vec<Listing>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(profiles: Vec<Profile>, listings: Vec<Listing>) -> Self {
        let store = Self::new();
        for profile in profiles {
            store.upsert_profile(profile);
        }
        store.replace_listings(listings);
        store
    }

    /// Full replacement of a student's profile.
    pub fn upsert_profile(&self, profile: Profile) {
        let mut profiles = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        profiles.insert(profile.id.clone(), profile);
    }

    pub fn replace_listings(&self, listings: Vec<Listing>) {
        let mut current = self.listings.write().unwrap_or_else(|e| e.into_inner());
        *current = listings;
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, student_id: &str) -> Result<Option<Profile>, StoreError> {
        let profiles = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        Ok(profiles.get(student_id).cloned())
    }
}

#[async_trait]
impl ListingStore for InMemoryStore {
    async fn list_active_approved_listings(&self) -> Result<Vec<Listing>, StoreError> {
        let listings = self.listings.read().unwrap_or_else(|e| e.into_inner());
        Ok(listings.iter().filter(|l| l.is_listable()).cloned().collect())
    }
}
