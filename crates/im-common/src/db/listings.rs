use async_trait::async_trait;
use tokio_postgres::Row;
use tracing::{debug, instrument};

use super::{profiles::weeks_from_db, util::timed_query, PgStore};
use crate::{
    error::StoreError, normalize::clamp_non_negative, store::ListingStore, Listing,
    ListingLocation,
};

const UNSPECIFIED_LOCATION: &str = "Unspecified";

const SELECT_ACTIVE_APPROVED: &str = "SELECT \
        id::text AS id,\
        skills_required,\
        location,\
        is_remote,\
        stipend_amount,\
        duration_weeks,\
        cgpa_requirement,\
        is_active,\
        is_approved \
    FROM public.internships \
    WHERE is_active = true AND is_approved = true \
    ORDER BY id";

/// `is_remote` wins over the free-text column. A blank on-site location is
/// kept as an explicit placeholder so it never matches a preference.
pub(crate) fn listing_location(is_remote: bool, location: Option<String>) -> ListingLocation {
    if is_remote {
        return ListingLocation::Remote;
    }

    match location {
        Some(text) if !text.trim().is_empty() => ListingLocation::from(text),
        _ => ListingLocation::OnSite(UNSPECIFIED_LOCATION.to_string()),
    }
}

fn listing_from_row(row: &Row) -> Result<Listing, StoreError> {
    Ok(Listing {
        id: row.try_get("id")?,
        skills_required: row
            .try_get::<_, Option<Vec<String>>>("skills_required")?
            .unwrap_or_default(),
        location: listing_location(
            row.try_get::<_, Option<bool>>("is_remote")?.unwrap_or(false),
            row.try_get("location")?,
        ),
        stipend_amount: row
            .try_get::<_, Option<f64>>("stipend_amount")?
            .map(clamp_non_negative),
        duration_weeks: weeks_from_db(row.try_get("duration_weeks")?),
        cgpa_requirement: row
            .try_get::<_, Option<f64>>("cgpa_requirement")?
            .map(clamp_non_negative),
        is_active: row.try_get("is_active")?,
        is_approved: row.try_get("is_approved")?,
    })
}

#[instrument(skip(store))]
pub async fn fetch_active_approved_listings(store: &PgStore) -> Result<Vec<Listing>, StoreError> {
    let client = store.pool.get().await?;
    let rows = timed_query(&client, SELECT_ACTIVE_APPROVED, &[], "fetch_active_approved_listings").await?;

    let listings = rows
        .iter()
        .map(listing_from_row)
        .collect::<Result<Vec<_>, StoreError>>()?;

    debug!(count = listings.len(), "fetched listings");
    Ok(listings)
}

#[async_trait]
impl ListingStore for PgStore {
    async fn list_active_approved_listings(&self) -> Result<Vec<Listing>, StoreError> {
        fetch_active_approved_listings(self).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_flag_overrides_location_text() {
        assert_eq!(listing_location(true, Some("Noida".into())), ListingLocation::Remote);
        assert_eq!(listing_location(false, Some("WFH".into())), ListingLocation::Remote);
    }

    #[test]
    fn blank_location_becomes_placeholder() {
        assert_eq!(
            listing_location(false, Some("   ".into())),
            ListingLocation::OnSite(UNSPECIFIED_LOCATION.into())
        );
        assert_eq!(
            listing_location(false, None),
            ListingLocation::OnSite(UNSPECIFIED_LOCATION.into())
        );
        assert_eq!(
            listing_location(false, Some("Hyderabad".into())),
            ListingLocation::OnSite("Hyderabad".into())
        );
    }
}
