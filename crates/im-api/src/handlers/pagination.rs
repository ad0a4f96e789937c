use crate::error::ApiError;

const MAX_LIMIT: usize = 200;
const MAX_OFFSET: usize = 10_000;

/// Range checks for optional `limit` / `offset` query values.
pub fn validate_pagination(
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<(Option<usize>, usize), ApiError> {
    if let Some(limit) = limit {
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApiError::BadRequest(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
    }

    let offset = offset.unwrap_or(0);
    if offset > MAX_OFFSET {
        return Err(ApiError::BadRequest(format!(
            "offset must be between 0 and {MAX_OFFSET}"
        )));
    }

    Ok((limit, offset))
}

pub fn validate_min_score(min_score: Option<f64>) -> Result<f64, ApiError> {
    match min_score {
        None => Ok(0.0),
        Some(score) if (0.0..=1.0).contains(&score) => Ok(score),
        Some(_) => Err(ApiError::BadRequest(
            "min_score must be between 0 and 1".into(),
        )),
    }
}
