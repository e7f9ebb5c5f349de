mod common;

use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use common::{RecordingSender, get, jwt_config, registration_config};
use rollgate::modules::auth::service::AuthService;
use rollgate_core::{AppError, ErrorKind};
use rollgate_db::memory::{MemoryRoleStore, MemoryUserStore};
use rollgate_models::RegisterResponse;
use serde_json::{Map, Value, json};
use tower::ServiceExt;

fn mid_2023() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap()
}

fn body(username: &str, email: &str) -> Map<String, Value> {
    json!({ "email": email, "username": username, "password": "hunter22" })
        .as_object()
        .cloned()
        .unwrap()
}

async fn register_at(
    users: &MemoryUserStore,
    username: &str,
    email: &str,
    now: DateTime<Utc>,
) -> Result<RegisterResponse, AppError> {
    AuthService::register(
        users,
        &MemoryRoleStore::with_role("student"),
        &RecordingSender::new(users.clone()),
        body(username, email),
        &registration_config(),
        &jwt_config(),
        now,
    )
    .await
}

#[tokio::test]
async fn test_window_follows_injected_date() {
    let users = MemoryUserStore::new();

    for (roll, email) in [
        ("1912345", "a@nitp.ac.in"),
        ("2012345", "b@nitp.ac.in"),
        ("2112345", "c@nitp.ac.in"),
    ] {
        let response = register_at(&users, roll, email, mid_2023()).await.unwrap();
        assert_eq!(response.user.username, roll);
    }

    for roll in ["1812345", "2212345"] {
        let err = register_at(&users, roll, "d@nitp.ac.in", mid_2023())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRollIdentifier, "{roll}");
    }
    assert_eq!(users.len(), 3);
}

#[tokio::test]
async fn test_new_year_admits_next_batch() {
    let users = MemoryUserStore::new();
    let new_year = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    assert!(register_at(&users, "2212345", "a@nitp.ac.in", new_year).await.is_ok());
    let err = register_at(&users, "1912345", "b@nitp.ac.in", new_year)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidRollIdentifier);
}

#[tokio::test]
async fn test_configured_domain_is_used() {
    let users = MemoryUserStore::new();
    let config = rollgate_config::RegistrationConfig {
        institution_domain: "iitb.ac.in".to_string(),
        ..registration_config()
    };

    let err = AuthService::register(
        &users,
        &MemoryRoleStore::with_role("student"),
        &RecordingSender::new(users.clone()),
        body("2012345", "a@nitp.ac.in"),
        &config,
        &jwt_config(),
        mid_2023(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidEmail);
}

#[tokio::test]
async fn test_health() {
    let app = common::setup_test_app(registration_config());

    let response = app.router.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["status"], "ok");
}
