//! Self-registration policy.
//!
//! # Environment Variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ALLOW_REGISTER` | `true` | Public self-registration is open |
//! | `UNIQUE_EMAIL` | `true` | One account per email across all providers |
//! | `EMAIL_CONFIRMATION` | `false` | New accounts must confirm their email first |
//! | `EMAIL_CONFIRMATION_REDIRECT` | unset | Where to send users after confirming |
//! | `DEFAULT_ROLE` | `student` | Role type bound to every self-registered account |
//! | `INSTITUTION_EMAIL_DOMAIN` | `nitp.ac.in` | Required email domain |

use std::env;

use crate::parse_flag;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationConfig {
    pub allow_register: bool,
    pub unique_email: bool,
    pub email_confirmation: bool,
    pub email_confirmation_redirect: Option<String>,
    pub default_role: String,
    pub institution_domain: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            allow_register: true,
            unique_email: true,
            email_confirmation: false,
            email_confirmation_redirect: None,
            default_role: "student".to_string(),
            institution_domain: "nitp.ac.in".to_string(),
        }
    }
}

impl RegistrationConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allow_register: parse_flag(env::var("ALLOW_REGISTER").ok(), defaults.allow_register),
            unique_email: parse_flag(env::var("UNIQUE_EMAIL").ok(), defaults.unique_email),
            email_confirmation: parse_flag(
                env::var("EMAIL_CONFIRMATION").ok(),
                defaults.email_confirmation,
            ),
            email_confirmation_redirect: env::var("EMAIL_CONFIRMATION_REDIRECT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            default_role: env::var("DEFAULT_ROLE").unwrap_or(defaults.default_role),
            institution_domain: env::var("INSTITUTION_EMAIL_DOMAIN")
                .unwrap_or(defaults.institution_domain),
        }
    }
}
