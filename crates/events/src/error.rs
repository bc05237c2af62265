use bhv360_core::channels::Channel;

/// Error type for a single channel delivery attempt.
///
/// The dispatcher records the `Display` text of this error in the
/// per-channel result returned to the client.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The push gateway request failed (network, DNS, timeout, etc.).
    #[error("Push gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The push gateway returned a non-2xx status code.
    #[error("Push gateway returned HTTP {0}")]
    HttpStatus(u16),

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The notification carries no address for this channel.
    #[error("No {channel} recipient for user {user_id}")]
    MissingRecipient { channel: Channel, user_id: String },

    /// No sender is registered for the requested channel.
    #[error("No sender configured for channel {0}")]
    NoSender(Channel),

    /// The attempt did not finish within the per-channel deadline.
    #[error("{channel} delivery timed out after {after_secs}s")]
    TimedOut { channel: Channel, after_secs: u64 },

    /// The sender panicked while delivering.
    #[error("{0} sender panicked")]
    Panicked(Channel),

    /// A sender's retry schedule can outlast the per-channel deadline.
    #[error(
        "{channel} sender may take up to {worst_case_secs}s, \
         longer than the {timeout_secs}s channel timeout"
    )]
    OverBudget {
        channel: Channel,
        worst_case_secs: u64,
        timeout_secs: u64,
    },

    /// Sender configuration is present but unusable.
    #[error("Invalid {var}: {reason}")]
    Config { var: &'static str, reason: String },

    /// Any other failure reported by a sender.
    #[error("{0}")]
    Failed(String),
}
