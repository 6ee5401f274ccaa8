//! Rating calculator trait and test doubles
//!
//! This module defines the interface for turning a finished match into
//! per-player rating changes. Calculators are pure: they see already
//! resolved players and never touch storage.

use crate::error::{EloError, Result};
use crate::types::{Player, PlayerName, RatingChange, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Result of a rating calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCalculationResult {
    /// Probability the yellow team was predicted to win
    pub yellow_expected: f64,
    /// Probability the white team was predicted to win
    pub white_expected: f64,
    /// Margin multiplier applied to the K-factor
    pub multiplier: f64,
    /// Rating changes in roster order, yellow first
    pub changes: Vec<RatingChange>,
}

impl RatingCalculationResult {
    /// Signed delta per player
    pub fn deltas(&self) -> HashMap<PlayerName, f64> {
        self.changes
            .iter()
            .map(|change| (change.player_name.clone(), change.delta))
            .collect()
    }

    /// Rating each player should be stored with after the match
    pub fn new_ratings(&self) -> HashMap<PlayerName, f64> {
        self.changes
            .iter()
            .map(|change| (change.player_name.clone(), change.new_rating))
            .collect()
    }

    pub fn change_for(&self, name: &str) -> Option<&RatingChange> {
        self.changes.iter().find(|change| change.player_name == name)
    }
}

/// Trait for calculating rating changes after matches
pub trait RatingCalculator {
    /// Calculate rating changes for both rosters based on the final score
    ///
    /// # Arguments
    /// * `yellow` - Resolved players of the yellow team
    /// * `white` - Resolved players of the white team
    /// * `yellow_score` / `white_score` - Final goals of each team
    fn calculate_rating_changes(
        &self,
        yellow: &[Player],
        white: &[Player],
        yellow_score: u32,
        white_score: u32,
    ) -> Result<RatingCalculationResult>;
}

/// Fail with `EmptyTeam` if either roster is empty
fn ensure_teams_present(yellow: &[Player], white: &[Player]) -> Result<()> {
    for (team, players) in [(Team::Yellow, yellow), (Team::White, white)] {
        if players.is_empty() {
            return Err(EloError::EmptyTeam {
                team: team.to_string(),
            });
        }
    }
    Ok(())
}

type RecordedCall = (Vec<Player>, Vec<Player>, u32, u32);

/// Mock rating calculator for testing
///
/// Leaves every rating unchanged unless told to fail, and records each call.
#[derive(Debug, Default)]
pub struct MockRatingCalculator {
    calculation_calls: Mutex<Vec<RecordedCall>>,
    failure: Mutex<Option<String>>,
}

impl MockRatingCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following calculation fail with `InvalidMatch { reason }`
    pub fn fail_with(&self, reason: &str) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(reason.to_string());
        }
    }

    /// Get all calculation calls made (for testing)
    pub fn get_calculation_calls(&self) -> Vec<RecordedCall> {
        self.calculation_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl RatingCalculator for MockRatingCalculator {
    fn calculate_rating_changes(
        &self,
        yellow: &[Player],
        white: &[Player],
        yellow_score: u32,
        white_score: u32,
    ) -> Result<RatingCalculationResult> {
        if let Ok(mut calls) = self.calculation_calls.lock() {
            calls.push((yellow.to_vec(), white.to_vec(), yellow_score, white_score));
        }

        if let Ok(failure) = self.failure.lock() {
            if let Some(reason) = failure.as_ref() {
                return Err(EloError::InvalidMatch {
                    reason: reason.clone(),
                });
            }
        }

        ensure_teams_present(yellow, white)?;

        let changes = yellow
            .iter()
            .map(|p| (Team::Yellow, p))
            .chain(white.iter().map(|p| (Team::White, p)))
            .map(|(team, player)| RatingChange {
                player_name: player.name.clone(),
                team,
                old_rating: player.rating,
                new_rating: player.rating,
                delta: 0.0,
            })
            .collect();

        Ok(RatingCalculationResult {
            yellow_expected: 0.5,
            white_expected: 0.5,
            multiplier: 0.0,
            changes,
        })
    }
}
