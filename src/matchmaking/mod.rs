//! Team assignment for a pickup match
//!
//! Splits the players who turned up into two teams of equal or near-equal
//! size. Assignment is random, not skill-balanced.

pub mod splitter;

pub use splitter::{RandomTeamSplitter, TeamSplitter};
