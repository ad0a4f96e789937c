use axum::async_trait;
use axum::extract::FromRef;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use clap::ValueEnum;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::ApiError;

/// Roles allowed to read any student's recommendations.
const PRIVILEGED_ROLES: &[&str] = &["admin", "service_role"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum AuthMode {
    ApiKey,
    Jwt,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub api_key: Option<String>,
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
    pub role: Option<String>,
}

impl AuthUser {
    fn is_privileged(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| PRIVILEGED_ROLES.contains(&role))
    }

    /// Students may only read their own recommendations.
    pub fn ensure_can_read(&self, student_id: &str) -> Result<(), ApiError> {
        if self.is_privileged() || self.subject == student_id {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "subject {} may not read recommendations of {student_id}",
                self.subject
            )))
        }
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: Option<usize>,
    #[serde(default)]
    role: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);

        match config.mode {
            AuthMode::ApiKey => authorize_api_key(parts, &config),
            AuthMode::Jwt => authorize_jwt(parts, &config),
        }
    }
}

fn authorize_api_key(parts: &Parts, config: &AuthConfig) -> Result<AuthUser, ApiError> {
    let expected = config
        .api_key
        .as_deref()
        .ok_or_else(|| ApiError::Unauthorized("missing IM_API_KEY".into()))?;

    let provided = parts
        .headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing X-API-Key header".into()))?;

    if provided != expected {
        return Err(ApiError::Unauthorized("invalid API key".into()));
    }

    // The key is shared with trusted backends only.
    Ok(AuthUser {
        subject: "api_key".to_string(),
        role: Some("service_role".to_string()),
    })
}

fn authorize_jwt(parts: &Parts, config: &AuthConfig) -> Result<AuthUser, ApiError> {
    let secret = config
        .jwt_secret
        .as_deref()
        .ok_or_else(|| ApiError::Unauthorized("missing JWT_SECRET".into()))?;

    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("expected Bearer token".into()))?;

    let mut validation = Validation::new(Algorithm::HS256);
    // Hosted-backend tokens carry `aud: authenticated`; the signature and expiry are what matter here.
    validation.validate_aud = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|err| ApiError::Unauthorized(format!("invalid token: {err}")))?;

    Ok(AuthUser {
        subject: data.claims.sub,
        role: data.claims.role,
    })
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        exp: usize,
        role: Option<&'a str>,
    }

    fn jwt_config() -> AuthConfig {
        AuthConfig {
            mode: AuthMode::Jwt,
            api_key: None,
            jwt_secret: Some("secret".into()),
        }
    }

    fn token(secret: &str, sub: &str, role: Option<&str>) -> String {
        let exp = (chrono::Utc::now().timestamp() + 3600) as usize;
        encode(
            &Header::new(Algorithm::HS256),
            &TestClaims { sub, exp, role },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn parts_with(name: &str, value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(name, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn jwt_subject_and_role_are_extracted() {
        let bearer = format!("Bearer {}", token("secret", "student-1", Some("authenticated")));
        let user = authorize_jwt(&parts_with("authorization", &bearer), &jwt_config()).unwrap();

        assert_eq!(user.subject, "student-1");
        assert!(user.ensure_can_read("student-1").is_ok());
        assert!(matches!(
            user.ensure_can_read("student-2"),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn privileged_roles_read_any_student() {
        let bearer = format!("Bearer {}", token("secret", "ops", Some("admin")));
        let user = authorize_jwt(&parts_with("authorization", &bearer), &jwt_config()).unwrap();
        assert!(user.ensure_can_read("student-9").is_ok());
    }

    #[test]
    fn jwt_with_wrong_secret_is_rejected() {
        let bearer = format!("Bearer {}", token("other", "student-1", None));
        assert!(matches!(
            authorize_jwt(&parts_with("authorization", &bearer), &jwt_config()),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn api_key_must_match() {
        let config = AuthConfig {
            mode: AuthMode::ApiKey,
            api_key: Some("k".into()),
            jwt_secret: None,
        };

        let user = authorize_api_key(&parts_with("x-api-key", "k"), &config).unwrap();
        assert!(user.ensure_can_read("anyone").is_ok());
        assert!(matches!(
            authorize_api_key(&parts_with("x-api-key", "nope"), &config),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
