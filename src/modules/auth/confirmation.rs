//! Confirmation-email dispatch for accounts created while
//! `EMAIL_CONFIRMATION` is on.
//!
//! Only the SHA-256 digest of a token is stored; the raw token exists in the
//! email alone.

use std::sync::Arc;

use anyhow::{Context, bail};
use async_trait::async_trait;
use rollgate_db::UserStore;
use rollgate_models::User;
use sha2::{Digest, Sha256};
use tracing::{info, instrument};

use crate::utils::email::EmailService;

#[async_trait]
pub trait ConfirmationSender: Send + Sync {
    /// Issues a fresh token for `user` and delivers it.
    async fn send_confirmation(&self, user: &User) -> anyhow::Result<()>;
}

/// Stores the token digest on the account and emails the raw token over SMTP.
pub struct EmailConfirmationSender {
    users: Arc<dyn UserStore>,
    email: EmailService,
}

impl EmailConfirmationSender {
    pub fn new(users: Arc<dyn UserStore>, email: EmailService) -> Self {
        Self { users, email }
    }
}

#[async_trait]
impl ConfirmationSender for EmailConfirmationSender {
    #[instrument(skip_all, fields(user_id = %user.id))]
    async fn send_confirmation(&self, user: &User) -> anyhow::Result<()> {
        if !self.email.is_enabled() {
            bail!("Email delivery is disabled, the confirmation email cannot be sent");
        }

        let token = generate_confirmation_token();
        self.users
            .set_confirmation_token(user.id, &token_digest(&token))
            .await
            .context("Failed to store the confirmation token")?;

        let link = self.email.confirmation_link(&token);
        self.email
            .send_confirmation_email(&user.email, &user.username, &link)
            .await?;

        info!("confirmation email sent");
        Ok(())
    }
}

/// 32 random bytes, hex encoded.
pub fn generate_confirmation_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
