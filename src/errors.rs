//! Unified error type for Coin Stack.
//!
//! Validation problems with a round are reported as a list of messages so callers can show
//! every violation at once. Persistence errors exist here for the store layer but are logged
//! and swallowed by [`crate::core::session::GameSession`].

use thiserror::Error;

/// All errors produced by the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Error reported by the snapshot database
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A round request was rejected; every violation is listed
    #[error("Invalid round: {}", .messages.join("; "))]
    Validation {
        /// One message per violated rule
        messages: Vec<String>,
    },

    /// No player with this id in the roster
    #[error("Player not found: {id}")]
    PlayerNotFound {
        /// The id that was looked up
        id: String,
    },

    /// A rename was rejected
    #[error("Invalid player name: {reason}")]
    InvalidPlayerName {
        /// Why the name was rejected
        reason: String,
    },

    /// Writing into a `String` buffer failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Required environment variable missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_message() {
        let error = Error::Validation {
            messages: vec![
                "Amount must be greater than 0".to_string(),
                "Select at least 1 person to receive money".to_string(),
            ],
        };

        assert_eq!(
            error.to_string(),
            "Invalid round: Amount must be greater than 0; Select at least 1 person to receive money"
        );
    }
}
