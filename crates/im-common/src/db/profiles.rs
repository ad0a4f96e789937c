use async_trait::async_trait;
use tokio_postgres::Row;
use tracing::instrument;

use super::{util::timed_query, PgStore};
use crate::{error::StoreError, normalize::clamp_non_negative, store::ProfileStore, Profile};

const SELECT_COMPLETED_PROFILE: &str = "SELECT \
        id::text AS id,\
        skills,\
        preferred_locations,\
        education_level,\
        course,\
        graduation_year,\
        cgpa,\
        social_category,\
        family_income_band,\
        stipend_expectation,\
        available_duration_weeks \
    FROM public.student_profiles \
    WHERE id::text = $1 AND profile_completed = true";

/// Negative week counts from loosely validated forms collapse to zero.
pub(crate) fn weeks_from_db(value: Option<i32>) -> Option<u32> {
    value.map(|weeks| weeks.max(0) as u32)
}

fn profile_from_row(row: &Row) -> Result<Profile, StoreError> {
    Ok(Profile {
        id: row.try_get("id")?,
        skills: row
            .try_get::<_, Option<Vec<String>>>("skills")?
            .unwrap_or_default(),
        preferred_locations: row
            .try_get::<_, Option<Vec<String>>>("preferred_locations")?
            .unwrap_or_default(),
        education_level: row.try_get("education_level")?,
        course: row.try_get("course")?,
        graduation_year: row.try_get("graduation_year")?,
        cgpa: clamp_non_negative(row.try_get::<_, Option<f64>>("cgpa")?.unwrap_or_default()),
        social_category: row.try_get("social_category")?,
        family_income_band: row.try_get("family_income_band")?,
        stipend_expectation: row
            .try_get::<_, Option<f64>>("stipend_expectation")?
            .map(clamp_non_negative),
        available_duration_weeks: weeks_from_db(row.try_get("available_duration_weeks")?),
    })
}

#[instrument(skip(store))]
pub async fn fetch_completed_profile(
    store: &PgStore,
    student_id: &str,
) -> Result<Option<Profile>, StoreError> {
    let client = store.pool.get().await?;
    let rows = timed_query(
        &client,
        SELECT_COMPLETED_PROFILE,
        &[&student_id],
        "fetch_completed_profile",
    )
    .await?;

    match rows.first() {
        Some(row) => profile_from_row(row).map(Some),
        None => Ok(None),
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn get_profile(&self, student_id: &str) -> Result<Option<Profile>, StoreError> {
        fetch_completed_profile(self, student_id).await
    }
}
