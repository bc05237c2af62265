//! BHV360 notification delivery.
//!
//! - [`ChannelSender`] — one implementation per delivery channel.
//! - [`delivery`] — the push gateway and SMTP senders.
//! - [`ChannelResolver`] — supplies a user's default channels.
//! - [`NotificationDispatcher`] — fans a notification out to its channels and
//!   collects per-channel results.

pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod resolver;
pub mod sender;

pub use delivery::email::{EmailConfig, EmailSender};
pub use delivery::push::{PushConfig, PushSender};
pub use dispatcher::NotificationDispatcher;
pub use error::DeliveryError;
pub use resolver::{ChannelResolver, StaticChannelResolver};
pub use sender::ChannelSender;
