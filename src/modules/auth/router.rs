use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{confirm_email, register_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/local/register", post(register_user))
        .route("/email-confirmation", get(confirm_email))
}
