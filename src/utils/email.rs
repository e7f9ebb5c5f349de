use anyhow::{Context, anyhow};
use lettre::message::{Mailbox, MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use rollgate_config::EmailConfig;
use tracing::instrument;

#[derive(Clone, Debug)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Link the recipient follows to confirm `token`.
    pub fn confirmation_link(&self, token: &str) -> String {
        format!(
            "{}/api/auth/email-confirmation?confirmation={}",
            self.config.public_url.trim_end_matches('/'),
            token
        )
    }

    #[instrument(skip(self, confirmation_link))]
    pub async fn send_confirmation_email(
        &self,
        to_email: &str,
        username: &str,
        confirmation_link: &str,
    ) -> anyhow::Result<()> {
        let html_body = confirmation_template(username, confirmation_link);
        let text_body = format!(
            "Hi {},\n\n\
             Thank you for registering.\n\n\
             Please confirm your email address by opening the link below:\n\
             {}\n\n\
             If you did not create this account, you can ignore this email.\n\n\
             {}",
            username, confirmation_link, self.config.from_name
        );

        self.send_email(to_email, "Account confirmation", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> anyhow::Result<()> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(from.parse::<Mailbox>().context("Invalid from email")?)
            .to(to_email.parse::<Mailbox>().context("Invalid recipient email")?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .context("Failed to build email")?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .context("Failed to create SMTP relay")?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| anyhow!("Email task failed: {}", e))?
            .context("Failed to send email")?;

        Ok(())
    }
}

fn confirmation_template(username: &str, link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Account confirmation</title>
</head>
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" cellpadding="0" cellspacing="0" align="center" style="background-color: #ffffff; border-radius: 8px;">
        <tr>
            <td style="padding: 40px 30px;">
                <p style="color: #333333; font-size: 16px;">Hi <strong>{username}</strong>,</p>
                <p style="color: #666666; font-size: 16px; line-height: 1.5;">
                    Thank you for registering. Please confirm your email address:
                </p>
                <p style="margin: 30px 0; text-align: center;">
                    <a href="{link}" style="padding: 14px 40px; background-color: #1D4ED8; color: #ffffff; text-decoration: none; border-radius: 6px;">Confirm email</a>
                </p>
                <p style="color: #666666; font-size: 14px; word-break: break-all;">{link}</p>
            </td>
        </tr>
    </table>
</body>
</html>"#
    )
}
