//! Error types for the rating ledger
//!
//! Library code reports structured failures through [`EloError`] so callers
//! can tell a duplicate name from an empty roster. The binary and the config
//! loader wrap these in `anyhow` for context.

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, EloError>;

/// Custom error types for rating and storage scenarios
#[derive(Debug, thiserror::Error)]
pub enum EloError {
    #[error("Player name already exists: {name}")]
    DuplicateName { name: String },

    #[error("Team has no players: {team}")]
    EmptyTeam { team: String },

    #[error("Unknown player(s): {}", names.join(", "))]
    UnknownPlayer { names: Vec<String> },

    #[error("Invalid player name: {reason}")]
    InvalidName { reason: String },

    #[error("Invalid rating: {rating}")]
    InvalidRating { rating: f64 },

    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
