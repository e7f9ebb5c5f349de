use std::sync::Arc;

use rollgate_config::{CorsConfig, EmailConfig, JwtConfig, RegistrationConfig};
use rollgate_db::postgres::{PgRoleStore, PgStudentStore, PgUserStore};
use rollgate_db::{PgPool, RoleStore, StudentStore, UserStore};

use crate::modules::auth::confirmation::{ConfirmationSender, EmailConfirmationSender};
use crate::utils::email::EmailService;

/// Shared handler state: store handles and configuration values.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub roles: Arc<dyn RoleStore>,
    pub students: Arc<dyn StudentStore>,
    pub confirmations: Arc<dyn ConfirmationSender>,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub registration_config: RegistrationConfig,
    pub cors_config: CorsConfig,
}

/// PostgreSQL-backed state with configuration read from the environment.
pub fn init_app_state(pool: PgPool) -> AppState {
    let email_config = EmailConfig::from_env();
    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let confirmations = Arc::new(EmailConfirmationSender::new(
        users.clone(),
        EmailService::new(email_config.clone()),
    ));

    AppState {
        users,
        roles: Arc::new(PgRoleStore::new(pool.clone())),
        students: Arc::new(PgStudentStore::new(pool)),
        confirmations,
        jwt_config: JwtConfig::from_env(),
        email_config,
        registration_config: RegistrationConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
