use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use chrono::Utc;
use im_common::api::{RecommendationQuery, RecommendationResponse};
use tracing::instrument;

use super::pagination::{validate_min_score, validate_pagination};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

#[instrument(skip(state, auth, query), fields(subject = %auth.subject))]
pub async fn list_recommendations(
    State(state): State<SharedState>,
    Path(student_id): Path<String>,
    auth: AuthUser,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let Query(query) = query.map_err(|err| ApiError::BadRequest(err.body_text()))?;

    let student_id = student_id.trim();
    if student_id.is_empty() {
        return Err(ApiError::BadRequest("student_id is required".into()));
    }
    auth.ensure_can_read(student_id)?;

    let (limit, offset) = validate_pagination(query.limit, query.offset)?;
    let mut options = query.to_options();
    options.min_score = validate_min_score(query.min_score)?;
    options.limit = limit;
    options.offset = offset;

    let results = state.service.recommend(student_id, &options).await?;

    Ok(Json(RecommendationResponse::new(
        student_id,
        &results,
        Utc::now(),
    )))
}
