//! Email notification delivery via SMTP.
//!
//! [`EmailSender`] wraps the `lettre` async SMTP transport to send plain-text
//! notification emails. Configuration is loaded from environment variables;
//! if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns `Ok(None)` and
//! no sender should be registered. Malformed values are startup errors.
//!
//! The recipient address travels in the notification's `data.email` field.

use std::time::Duration;

use async_trait::async_trait;
use bhv360_core::channels::Channel;
use bhv360_core::notification::{Notification, Priority};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::DeliveryError;
use crate::sender::ChannelSender;

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@bhv360.nl";

/// Timeout for each SMTP command.
const SMTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Key in the notification data holding the recipient address.
pub const RECIPIENT_DATA_KEY: &str = "email";

/// Configuration for the SMTP email sender.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default              |
    /// |-----------------|----------|----------------------|
    /// | `SMTP_HOST`     | yes      |                      |
    /// | `SMTP_PORT`     | no       | `587`                |
    /// | `SMTP_FROM`     | no       | `noreply@bhv360.nl`  |
    /// | `SMTP_USER`     | no       |                      |
    /// | `SMTP_PASSWORD` | no       |                      |
    pub fn from_env() -> Result<Option<Self>, DeliveryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, DeliveryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(smtp_host) = lookup("SMTP_HOST") else {
            return Ok(None);
        };
        if smtp_host.trim().is_empty() {
            return Err(DeliveryError::Config {
                var: "SMTP_HOST",
                reason: "must not be empty".into(),
            });
        }

        let smtp_port = match lookup("SMTP_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| DeliveryError::Config {
                var: "SMTP_PORT",
                reason: format!("'{raw}' is not a port number"),
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Some(Self {
            smtp_host: smtp_host.trim().to_string(),
            smtp_port,
            from_address: lookup("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: lookup("SMTP_USER"),
            smtp_password: lookup("SMTP_PASSWORD"),
        }))
    }
}

// ---------------------------------------------------------------------------
// EmailSender
// ---------------------------------------------------------------------------

/// Sends notification emails via SMTP.
#[derive(Debug)]
pub struct EmailSender {
    from: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailSender {
    /// Parse the sender address and build the SMTP transport. No connection
    /// is opened until the first send.
    pub fn new(config: EmailConfig) -> Result<Self, DeliveryError> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| DeliveryError::Config {
                var: "SMTP_FROM",
                reason: format!("'{}': {e}", config.from_address),
            })?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port)
                .timeout(Some(SMTP_TIMEOUT));

        if let (Some(user), Some(pass)) = (config.smtp_user, config.smtp_password) {
            transport_builder = transport_builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            from,
            mailer: transport_builder.build(),
        })
    }
}

/// Assemble the plain-text email for a notification.
pub fn build_email(from: &Mailbox, notification: &Notification) -> Result<Message, DeliveryError> {
    let to = notification
        .data
        .get(RECIPIENT_DATA_KEY)
        .and_then(serde_json::Value::as_str)
        .filter(|addr| !addr.trim().is_empty())
        .ok_or_else(|| DeliveryError::MissingRecipient {
            channel: Channel::Email,
            user_id: notification.user_id.clone(),
        })?;

    let subject = match notification.priority {
        Priority::Urgent => format!("[BHV360] URGENT: {}", notification.title),
        _ => format!("[BHV360] {}", notification.title),
    };

    Message::builder()
        .from(from.clone())
        .to(to.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(notification.body.clone())
        .map_err(|e| DeliveryError::Build(e.to_string()))
}

#[async_trait]
impl ChannelSender for EmailSender {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let email = build_email(&self.from, notification)?;
        self.mailer.send(email).await?;

        tracing::info!(
            notification_id = notification.id(),
            user_id = %notification.user_id,
            "Notification email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
