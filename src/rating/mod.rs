//! Team Elo rating system
//!
//! This module provides the rating calculator interface, the margin-scaled
//! team Elo implementation and SQLite-backed storage for players, matches
//! and rosters.

pub mod calculator;
pub mod elo;
pub mod storage;

// Re-export commonly used types
pub use calculator::{MockRatingCalculator, RatingCalculationResult, RatingCalculator};
pub use elo::{average_rating, EloConfig, TeamEloCalculator};
pub use storage::{RatingStorage, SqliteRatingStorage};
