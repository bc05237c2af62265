//! BHV360 domain types.
//!
//! Pure logic with no I/O: the role catalogue and its dashboard mapping,
//! notification channels, and the notification payload with its validation
//! rules. Shared by the delivery crate and the HTTP server.

pub mod channels;
pub mod dashboard;
pub mod error;
pub mod notification;
pub mod roles;
pub mod types;
