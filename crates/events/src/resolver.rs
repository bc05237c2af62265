//! Default channel resolution for notifications without an explicit channel
//! list.

use async_trait::async_trait;
use bhv360_core::channels::{dedup_channels, Channel};

/// Supplies the channels a user receives notifications on by default.
#[async_trait]
pub trait ChannelResolver: Send + Sync {
    async fn default_channels(&self, user_id: &str) -> Vec<Channel>;
}

/// Resolver that gives every user the same configured channel list.
#[derive(Debug, Clone)]
pub struct StaticChannelResolver {
    channels: Vec<Channel>,
}

impl StaticChannelResolver {
    pub fn new(channels: &[Channel]) -> Self {
        Self {
            channels: dedup_channels(channels),
        }
    }
}

impl Default for StaticChannelResolver {
    fn default() -> Self {
        Self::new(&[Channel::Push])
    }
}

#[async_trait]
impl ChannelResolver for StaticChannelResolver {
    async fn default_channels(&self, _user_id: &str) -> Vec<Channel> {
        self.channels.clone()
    }
}
