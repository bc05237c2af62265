//! Notification delivery channels.
//!
//! The wire names below are what clients put in the `channels` array and what
//! comes back in per-channel results.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Push notification delivered through the push gateway.
pub const CHANNEL_PUSH: &str = "push";

/// Email notification delivered via SMTP.
pub const CHANNEL_EMAIL: &str = "email";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Push,
    Email,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Push => CHANNEL_PUSH,
            Channel::Email => CHANNEL_EMAIL,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CHANNEL_PUSH => Ok(Channel::Push),
            CHANNEL_EMAIL => Ok(Channel::Email),
            other => Err(CoreError::Validation(format!(
                "Unknown notification channel '{other}'"
            ))),
        }
    }
}

/// Parse a comma-separated channel list such as `push,email`.
///
/// Blank entries are skipped; an unknown name fails the whole list.
pub fn parse_channel_list(list: &str) -> Result<Vec<Channel>, CoreError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Channel::from_str)
        .collect()
}

/// Drop repeated channels, keeping the first occurrence of each.
pub fn dedup_channels(channels: &[Channel]) -> Vec<Channel> {
    let mut seen = Vec::with_capacity(channels.len());
    for channel in channels {
        if !seen.contains(channel) {
            seen.push(*channel);
        }
    }
    seen
}
