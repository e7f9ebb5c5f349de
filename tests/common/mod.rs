#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use chrono::Utc;
use http_body_util::BodyExt;
use rollgate::modules::auth::confirmation::{
    ConfirmationSender, generate_confirmation_token, token_digest,
};
use rollgate::router::init_router;
use rollgate::state::AppState;
use rollgate_config::{CorsConfig, EmailConfig, JwtConfig, RegistrationConfig};
use rollgate_db::UserStore;
use rollgate_db::memory::{MemoryRoleStore, MemoryStudentStore, MemoryUserStore};
use rollgate_models::{RollWindow, User};
use serde_json::Value;

pub const DOMAIN: &str = "nitp.ac.in";

/// Stands in for SMTP: stores the token digest like the real sender and
/// keeps the raw token so tests can follow the link.
#[derive(Default)]
pub struct RecordingSender {
    users: Option<MemoryUserStore>,
    fail: bool,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    pub fn new(users: MemoryUserStore) -> Self {
        Self {
            users: Some(users),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `(email, raw token)` for every confirmation sent so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationSender for RecordingSender {
    async fn send_confirmation(&self, user: &User) -> anyhow::Result<()> {
        if self.fail {
            bail!("SMTP connection refused");
        }

        let token = generate_confirmation_token();
        if let Some(users) = &self.users {
            users
                .set_confirmation_token(user.id, &token_digest(&token))
                .await?;
        }
        self.sent.lock().unwrap().push((user.email.clone(), token));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: MemoryUserStore,
    pub roles: MemoryRoleStore,
    pub students: MemoryStudentStore,
    pub sender: Arc<RecordingSender>,
}

pub fn registration_config() -> RegistrationConfig {
    RegistrationConfig::default()
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn email_config() -> EmailConfig {
    EmailConfig {
        enabled: false,
        smtp_host: "localhost".to_string(),
        smtp_port: 1025,
        smtp_username: String::new(),
        smtp_password: String::new(),
        from_email: "noreply@nitp.ac.in".to_string(),
        from_name: "Rollgate".to_string(),
        public_url: "http://localhost:3000".to_string(),
    }
}

pub fn build_state(
    users: &MemoryUserStore,
    roles: &MemoryRoleStore,
    students: &MemoryStudentStore,
    confirmations: Arc<dyn ConfirmationSender>,
    registration_config: RegistrationConfig,
) -> AppState {
    AppState {
        users: Arc::new(users.clone()),
        roles: Arc::new(roles.clone()),
        students: Arc::new(students.clone()),
        confirmations,
        jwt_config: jwt_config(),
        email_config: email_config(),
        registration_config,
        cors_config: CorsConfig::from_list("http://localhost:5173"),
    }
}

pub fn setup_test_app(registration_config: RegistrationConfig) -> TestApp {
    let users = MemoryUserStore::new();
    let roles = MemoryRoleStore::with_role("student");
    let students = MemoryStudentStore::new();
    let sender = Arc::new(RecordingSender::new(users.clone()));

    let state = build_state(
        &users,
        &roles,
        &students,
        sender.clone(),
        registration_config,
    );

    TestApp {
        router: init_router(state),
        users,
        roles,
        students,
        sender,
    }
}

/// A roll number from the most recent batch allowed to register today.
pub fn current_roll(serial: u32) -> String {
    let newest = RollWindow::for_date(&Utc::now()).codes()[2];
    format!("{:02}{:05}", newest, serial)
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
