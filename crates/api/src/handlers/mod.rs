//! Request handlers.
//!
//! Handlers parse and validate the request, call into `bhv360_core` or the
//! notification dispatcher, and map errors via [`AppError`](crate::error::AppError).

pub mod dashboard;
pub mod notification;
