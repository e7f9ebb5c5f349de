use axum::{Router, routing::post};

use super::controller::request_password_change;
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new().route("/password-change-requests", post(request_password_change))
}
