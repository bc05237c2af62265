//! Notification fan-out to delivery channels.
//!
//! [`NotificationDispatcher`] resolves the channels for a notification,
//! invokes each channel's sender concurrently and records one result per
//! channel in resolution order. A failing, hanging or panicking channel never
//! prevents the others from being recorded, and in bulk mode a failing
//! notification never affects its siblings. The dispatcher does not retry.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use bhv360_core::channels::{dedup_channels, Channel};
use bhv360_core::notification::{ChannelResult, DispatchResult, Notification};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use futures::FutureExt;

use crate::error::DeliveryError;
use crate::resolver::ChannelResolver;
use crate::sender::ChannelSender;

/// Deadline for a single channel attempt, including the sender's own retries.
pub const DEFAULT_CHANNEL_TIMEOUT: Duration = Duration::from_secs(20);

/// Notifications of one bulk request that are in flight at the same time.
pub const DEFAULT_BULK_CONCURRENCY: usize = 16;

/// Routes notifications to the registered channel senders.
///
/// Built once at startup and shared behind an `Arc`; holds no mutable state.
pub struct NotificationDispatcher {
    senders: HashMap<Channel, Arc<dyn ChannelSender>>,
    resolver: Arc<dyn ChannelResolver>,
    channel_timeout: Duration,
    bulk_concurrency: usize,
}

impl NotificationDispatcher {
    /// Create a dispatcher with no senders, using `resolver` for
    /// notifications that do not name their channels.
    pub fn new(resolver: Arc<dyn ChannelResolver>) -> Self {
        Self {
            senders: HashMap::new(),
            resolver,
            channel_timeout: DEFAULT_CHANNEL_TIMEOUT,
            bulk_concurrency: DEFAULT_BULK_CONCURRENCY,
        }
    }

    /// Register a sender for its channel, replacing any previous one.
    pub fn with_sender(mut self, sender: Arc<dyn ChannelSender>) -> Self {
        self.senders.insert(sender.channel(), sender);
        self
    }

    /// Set the per-channel deadline. An attempt that overruns it is recorded
    /// as a failed channel.
    pub fn with_channel_timeout(mut self, timeout: Duration) -> Self {
        self.channel_timeout = timeout;
        self
    }

    /// Cap the number of notifications a bulk send delivers at once (min 1).
    pub fn with_bulk_concurrency(mut self, limit: usize) -> Self {
        self.bulk_concurrency = limit.max(1);
        self
    }

    /// Whether a sender is registered for `channel`.
    pub fn has_sender(&self, channel: Channel) -> bool {
        self.senders.contains_key(&channel)
    }

    /// Fail if a registered sender can outlast the per-channel deadline, in
    /// which case its own retries would be cut short.
    pub fn check_budget(&self) -> Result<(), DeliveryError> {
        for sender in self.senders.values() {
            if let Some(worst_case) = sender.worst_case() {
                if worst_case > self.channel_timeout {
                    return Err(DeliveryError::OverBudget {
                        channel: sender.channel(),
                        worst_case_secs: worst_case.as_secs(),
                        timeout_secs: self.channel_timeout.as_secs(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The channels this notification will be attempted on, in order.
    pub async fn resolve_channels(&self, notification: &Notification) -> Vec<Channel> {
        match notification.channels.as_deref() {
            Some(explicit) if !explicit.is_empty() => dedup_channels(explicit),
            _ => dedup_channels(
                &self
                    .resolver
                    .default_channels(&notification.user_id)
                    .await,
            ),
        }
    }

    /// Deliver one notification on all of its channels.
    pub async fn send_notification(&self, notification: &Notification) -> DispatchResult {
        let channels = self.resolve_channels(notification).await;
        if channels.is_empty() {
            tracing::warn!(
                notification_id = notification.id(),
                user_id = %notification.user_id,
                "No channels resolved for notification"
            );
        }

        let results = join_all(
            channels
                .into_iter()
                .map(|channel| self.deliver(channel, notification)),
        )
        .await;

        let outcome = DispatchResult::from_results(results);
        tracing::debug!(
            notification_id = notification.id(),
            success = outcome.success,
            channels = outcome.results.len(),
            "Notification dispatched"
        );
        outcome
    }

    /// Deliver every notification independently; results keep input order.
    ///
    /// At most `bulk_concurrency` notifications are in flight at once.
    pub async fn send_bulk_notifications(
        &self,
        notifications: &[Notification],
    ) -> Vec<DispatchResult> {
        let pending: Vec<_> = notifications
            .iter()
            .map(|n| self.send_notification(n))
            .collect();
        stream::iter(pending)
            .buffered(self.bulk_concurrency)
            .collect()
            .await
    }

    /// Attempt a single channel and turn the outcome into a result entry.
    async fn deliver(&self, channel: Channel, notification: &Notification) -> ChannelResult {
        let outcome = match self.senders.get(&channel) {
            Some(sender) => {
                let attempt = AssertUnwindSafe(sender.send(notification)).catch_unwind();
                match tokio::time::timeout(self.channel_timeout, attempt).await {
                    Ok(Ok(result)) => result,
                    Ok(Err(_panic)) => Err(DeliveryError::Panicked(channel)),
                    Err(_elapsed) => Err(DeliveryError::TimedOut {
                        channel,
                        after_secs: self.channel_timeout.as_secs(),
                    }),
                }
            }
            None => Err(DeliveryError::NoSender(channel)),
        };

        match outcome {
            Ok(()) => ChannelResult::delivered(channel),
            Err(e) => {
                tracing::warn!(
                    notification_id = notification.id(),
                    channel = %channel,
                    error = %e,
                    "Channel delivery failed"
                );
                ChannelResult::failed(channel, e.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
