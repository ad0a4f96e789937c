use axum::{body::Body, http::Request, http::StatusCode, Router};
use http_body_util::BodyExt;
use im_api::auth::{AuthConfig, AuthMode};
use im_common::store::InMemoryStore;
use im_common::{Listing, ListingLocation, Profile};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

fn student() -> Profile {
    Profile {
        id: "student-1".into(),
        skills: vec!["python".into(), "react".into()],
        preferred_locations: vec!["Remote".into()],
        cgpa: 8.0,
        ..Profile::default()
    }
}

fn listing(id: &str, skills: &[&str], location: &str) -> Listing {
    Listing {
        id: id.into(),
        skills_required: skills.iter().map(|s| s.to_string()).collect(),
        location: ListingLocation::from(location),
        is_active: true,
        is_approved: true,
        ..Listing::default()
    }
}

fn seeded_store() -> InMemoryStore {
    let mut strict = listing("b-strict", &[], "Delhi");
    strict.stipend_amount = Some(50_000.0);
    strict.cgpa_requirement = Some(9.0);

    let mut pending = listing("c-pending", &["python"], "Remote");
    pending.is_approved = false;

    InMemoryStore::with_data(
        vec![student()],
        vec![listing("a-remote", &["python", "sql"], "Remote"), strict, pending],
    )
}

fn api_key_app() -> Router {
    let auth = AuthConfig {
        mode: AuthMode::ApiKey,
        api_key: Some("test-key".into()),
        jwt_secret: None,
    };
    im_api::create_router(im_api::test_state_with(auth, seeded_store()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-api-key", "test-key")
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn livez_healthy_and_recommendations_require_auth() {
    let app = api_key_app();

    let livez_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/livez")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(livez_response.status(), StatusCode::OK);

    let unauthorized = app
        .oneshot(
            Request::builder()
                .uri("/api/students/student-1/recommendations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unauthorized).await["code"], "unauthorized");
}

#[tokio::test]
async fn returns_ranked_eligible_recommendations() {
    let response = api_key_app()
        .oneshot(get("/api/students/student-1/recommendations"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["student_id"], "student-1");
    assert_eq!(body["total"], 1);

    let first = &body["results"][0];
    assert_eq!(first["listing_id"], "a-remote");
    assert_eq!(first["eligible"], true);
    assert_eq!(first["score_percent"], 78);
    assert_eq!(
        first["reasons"],
        json!([
            "Matches 1 of 2 required skills (python)",
            "Remote internship",
            "Stipend not specified"
        ])
    );
}

#[tokio::test]
async fn include_ineligible_surfaces_demoted_listings() {
    let response = api_key_app()
        .oneshot(get(
            "/api/students/student-1/recommendations?include_ineligible=true",
        ))
        .await
        .unwrap();
    let body = body_json(response).await;

    let ids: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["listing_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a-remote", "b-strict"]);
    assert_eq!(body["results"][1]["eligible"], false);
    assert_eq!(body["results"][1]["score_percent"], 60);
}

#[tokio::test]
async fn exclude_and_min_score_filter_results() {
    let app = api_key_app();

    let excluded = app
        .clone()
        .oneshot(get(
            "/api/students/student-1/recommendations?include_ineligible=true&exclude=a-remote",
        ))
        .await
        .unwrap();
    let body = body_json(excluded).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["results"][0]["listing_id"], "b-strict");

    let high_bar = app
        .oneshot(get(
            "/api/students/student-1/recommendations?include_ineligible=true&min_score=0.7",
        ))
        .await
        .unwrap();
    assert_eq!(body_json(high_bar).await["total"], 1);
}

#[tokio::test]
async fn unknown_student_is_404() {
    let response = api_key_app()
        .oneshot(get("/api/students/ghost/recommendations"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "profile_not_found");
}

#[tokio::test]
async fn invalid_query_values_are_400() {
    let app = api_key_app();

    for query in ["limit=0", "limit=201", "offset=10001", "min_score=2", "limit=abc"] {
        let response = app
            .clone()
            .oneshot(get(&format!(
                "/api/students/student-1/recommendations?{query}"
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body_json(response).await["code"], "bad_request");
    }
}

#[derive(serde::Serialize)]
struct Claims<'a> {
    sub: &'a str,
    exp: usize,
    role: &'a str,
}

fn bearer(sub: &str, role: &str) -> String {
    let exp = (chrono::Utc::now().timestamp() + 600) as usize;
    let token = encode(
        &Header::new(Algorithm::HS256),
        &Claims { sub, exp, role },
        &EncodingKey::from_secret(b"jwt-secret"),
    )
    .unwrap();
    format!("Bearer {token}")
}

#[tokio::test]
async fn jwt_students_only_read_their_own_recommendations() {
    let auth = AuthConfig {
        mode: AuthMode::Jwt,
        api_key: None,
        jwt_secret: Some("jwt-secret".into()),
    };
    let app = im_api::create_router(im_api::test_state_with(auth, seeded_store()));

    let request = |token: String| {
        Request::builder()
            .uri("/api/students/student-1/recommendations")
            .header("authorization", token)
            .body(Body::empty())
            .unwrap()
    };

    let own = app
        .clone()
        .oneshot(request(bearer("student-1", "authenticated")))
        .await
        .unwrap();
    assert_eq!(own.status(), StatusCode::OK);

    let other = app
        .clone()
        .oneshot(request(bearer("student-2", "authenticated")))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::FORBIDDEN);

    let admin = app
        .oneshot(request(bearer("ops", "admin")))
        .await
        .unwrap();
    assert_eq!(admin.status(), StatusCode::OK);
}
