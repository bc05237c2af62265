//! Push delivery through an HTTP push gateway, with exponential-backoff retry.
//!
//! [`PushSender`] POSTs a JSON push message to the configured gateway, which
//! owns device subscriptions and fans the message out to the user's devices.
//! Failed attempts are retried up to three times (1 s, 2 s, 4 s).

use std::time::Duration;

use async_trait::async_trait;
use bhv360_core::channels::Channel;
use bhv360_core::notification::Notification;

use crate::error::DeliveryError;
use crate::sender::ChannelSender;

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt. Four attempts plus the
/// backoff must fit inside the dispatcher's default channel timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// PushConfig
// ---------------------------------------------------------------------------

/// Configuration for the push gateway.
#[derive(Debug, Clone)]
pub struct PushConfig {
    /// Gateway endpoint that accepts push messages.
    pub gateway_url: String,
    /// Optional bearer token sent with every request.
    pub gateway_token: Option<String>,
}

impl PushConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` if `PUSH_GATEWAY_URL` is not set, signalling that
    /// push delivery is not configured.
    ///
    /// | Variable             | Required |
    /// |----------------------|----------|
    /// | `PUSH_GATEWAY_URL`   | yes      |
    /// | `PUSH_GATEWAY_TOKEN` | no       |
    pub fn from_env() -> Result<Option<Self>, DeliveryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, DeliveryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(gateway_url) = lookup("PUSH_GATEWAY_URL") else {
            return Ok(None);
        };
        if gateway_url.trim().is_empty() {
            return Err(DeliveryError::Config {
                var: "PUSH_GATEWAY_URL",
                reason: "must not be empty".into(),
            });
        }
        Ok(Some(Self {
            gateway_url: gateway_url.trim().to_string(),
            gateway_token: lookup("PUSH_GATEWAY_TOKEN").filter(|t| !t.is_empty()),
        }))
    }
}

// ---------------------------------------------------------------------------
// PushSender
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct PushSender {
    client: reqwest::Client,
    gateway: reqwest::Url,
    gateway_token: Option<String>,
    retry_delays: Vec<Duration>,
}

impl PushSender {
    /// Validate the gateway URL and build the HTTP client.
    pub fn new(config: PushConfig) -> Result<Self, DeliveryError> {
        let gateway =
            reqwest::Url::parse(&config.gateway_url).map_err(|e| DeliveryError::Config {
                var: "PUSH_GATEWAY_URL",
                reason: format!("'{}' is not a valid URL: {e}", config.gateway_url),
            })?;
        if !matches!(gateway.scheme(), "http" | "https") {
            return Err(DeliveryError::Config {
                var: "PUSH_GATEWAY_URL",
                reason: format!("unsupported scheme '{}'", gateway.scheme()),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            gateway,
            gateway_token: config.gateway_token,
            retry_delays: RETRY_DELAYS_SECS
                .iter()
                .map(|s| Duration::from_secs(*s))
                .collect(),
        })
    }

    /// Replace the backoff schedule. An empty schedule means a single attempt.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, message: &serde_json::Value) -> Result<(), DeliveryError> {
        let mut request = self.client.post(self.gateway.clone()).json(message);
        if let Some(token) = &self.gateway_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Build the JSON body posted to the push gateway.
pub fn push_message(notification: &Notification) -> serde_json::Value {
    serde_json::json!({
        "notificationId": notification.id(),
        "userId": notification.user_id,
        "title": notification.title,
        "body": notification.body,
        "category": notification.category,
        "priority": notification.priority,
        "data": notification.data,
        "createdAt": notification.created_at.to_rfc3339(),
    })
}

#[async_trait]
impl ChannelSender for PushSender {
    fn channel(&self) -> Channel {
        Channel::Push
    }

    fn worst_case(&self) -> Option<Duration> {
        let backoff: Duration = self.retry_delays.iter().sum();
        let attempts = u32::try_from(self.retry_delays.len() + 1).unwrap_or(u32::MAX);
        Some(backoff + REQUEST_TIMEOUT.saturating_mul(attempts))
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let message = push_message(notification);

        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            match self.try_send(&message).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        notification_id = notification.id(),
                        error = %e,
                        "Push delivery attempt failed, retrying"
                    );
                    tokio::time::sleep(*delay).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(&message).await {
            Ok(()) => {
                tracing::info!(
                    notification_id = notification.id(),
                    user_id = %notification.user_id,
                    "Push notification sent"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    notification_id = notification.id(),
                    error = %e,
                    "Push delivery failed after all retries"
                );
                Err(e)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
