//! The per-channel delivery seam.

use std::time::Duration;

use async_trait::async_trait;
use bhv360_core::channels::Channel;
use bhv360_core::notification::Notification;

use crate::error::DeliveryError;

/// Delivers notifications over one channel.
///
/// Implementations own their own retries; the dispatcher calls `send` exactly
/// once per notification and channel and cuts it off at its channel timeout.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// The channel this sender serves.
    fn channel(&self) -> Channel;

    /// Longest a single `send` can take, retries included, if bounded.
    fn worst_case(&self) -> Option<Duration> {
        None
    }

    /// Deliver a notification to its recipient on this channel.
    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError>;
}
