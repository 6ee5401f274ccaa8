//! Football Elo - rating ledger for casual team football
//!
//! This crate keeps a persistent roster of players with Elo ratings, records
//! team matches between yellow and white, updates ratings with a
//! margin-of-victory weighted team Elo formula, and randomly splits the
//! players present into two teams.

pub mod config;
pub mod error;
pub mod matchmaking;
pub mod rating;
pub mod service;
pub mod shell;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{EloError, Result};
pub use types::*;

// Re-export key components
pub use matchmaking::{RandomTeamSplitter, TeamSplitter};
pub use rating::{RatingCalculator, RatingStorage, SqliteRatingStorage, TeamEloCalculator};
pub use service::EloLedger;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
