//! Notification payloads and dispatch outcomes.
//!
//! A [`NotificationDraft`] is what a client submits. It is validated and turned
//! into a [`Notification`], which carries a process-unique id fixed at
//! construction. Delivery produces one [`ChannelResult`] per attempted channel,
//! aggregated into a [`DispatchResult`].

use serde::{Deserialize, Serialize};

use crate::channels::Channel;
use crate::error::CoreError;
use crate::types::Timestamp;

/// Category used when the client does not supply one.
pub const DEFAULT_CATEGORY: &str = "system";

/// Prefix of every generated notification id.
pub const NOTIFICATION_ID_PREFIX: &str = "notif_";

/// Free-form key/value data attached to a notification.
pub type NotificationData = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Client-submitted notification before validation.
///
/// Required text fields default to empty so that a missing key and a blank
/// value are reported the same way by [`NotificationDraft::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NotificationDraft {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub data: Option<NotificationData>,
    pub channels: Option<Vec<Channel>>,
}

impl NotificationDraft {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_channels(mut self, channels: Vec<Channel>) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Check that `userId`, `title` and `body` are present and not blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        let missing: Vec<&str> = [
            ("userId", &self.user_id),
            ("title", &self.title),
            ("body", &self.body),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// A validated notification ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: String,
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub category: String,
    pub priority: Priority,
    pub data: NotificationData,
    /// Explicit channel list; `None` means "the user's default channels".
    pub channels: Option<Vec<Channel>>,
    /// Set when the draft is accepted; sent to the push gateway.
    pub created_at: Timestamp,
}

impl Notification {
    /// Validate a draft and assign it a freshly generated id.
    pub fn new(draft: NotificationDraft) -> Result<Self, CoreError> {
        Self::build(generate_notification_id(), draft)
    }

    /// Validate a draft and keep a caller-supplied id.
    pub fn with_id(id: impl Into<String>, draft: NotificationDraft) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::Validation(
                "Notification id must not be empty".into(),
            ));
        }
        Self::build(id, draft)
    }

    fn build(id: String, draft: NotificationDraft) -> Result<Self, CoreError> {
        draft.validate()?;

        let category = draft
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(Self {
            id,
            user_id: draft.user_id,
            title: draft.title,
            body: draft.body,
            category,
            priority: draft.priority.unwrap_or_default(),
            data: draft.data.unwrap_or_default(),
            channels: draft.channels,
            created_at: chrono::Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Generate a notification id that stays unique for calls in the same
/// millisecond.
///
/// UUIDv7 puts the millisecond timestamp in the high bits followed by a
/// monotonic counter and random bits.
pub fn generate_notification_id() -> String {
    format!(
        "{NOTIFICATION_ID_PREFIX}{}",
        uuid::Uuid::now_v7().simple()
    )
}

/// Outcome of delivering one notification over one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelResult {
    pub channel: Channel,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChannelResult {
    pub fn delivered(channel: Channel) -> Self {
        Self {
            channel,
            success: true,
            error: None,
        }
    }

    pub fn failed(channel: Channel, error: impl Into<String>) -> Self {
        Self {
            channel,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregate outcome of delivering one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub success: bool,
    pub results: Vec<ChannelResult>,
}

impl DispatchResult {
    /// Aggregate per-channel results; success requires at least one attempted
    /// channel and no failures.
    pub fn from_results(results: Vec<ChannelResult>) -> Self {
        let success = !results.is_empty() && results.iter().all(|r| r.success);
        Self { success, results }
    }
}
