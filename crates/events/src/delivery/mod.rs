//! External delivery channels for notifications.
//!
//! This module provides the push gateway and SMTP senders registered with
//! the [`NotificationDispatcher`](crate::NotificationDispatcher).

pub mod email;
pub mod push;
