//! Margin-scaled team Elo
//!
//! Each team is rated by the mean of its players. The team expectation uses
//! the logistic Elo curve on the two means, while each player's delta uses
//! that player's own rating against the opposing mean, so teammates with
//! different ratings move by different amounts. Goal difference amplifies the
//! swing logarithmically and a large pre-match gap between the teams damps it.

use crate::error::{EloError, Result};
use crate::rating::calculator::{RatingCalculationResult, RatingCalculator};
use crate::types::{MatchOutcome, Player, RatingChange, Team};
use crate::utils::rating_difference;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Parameters of the team Elo model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EloConfig {
    /// Maximum rating volatility per match
    pub k_factor: f64,
    /// Rating gap at which the favourite is expected to win ten times as often
    pub logistic_scale: f64,
    /// Weight of the pre-match rating gap in the multiplier damping
    pub gap_dampening: f64,
    /// Constant term of the multiplier damping
    pub dampening_base: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            logistic_scale: 400.0,
            gap_dampening: 0.001,
            dampening_base: 2.2,
        }
    }
}

impl EloConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.k_factor > 0.0) {
            return Err(EloError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            });
        }

        if !(self.logistic_scale > 0.0) {
            return Err(EloError::ConfigurationError {
                message: "Logistic scale must be positive".to_string(),
            });
        }

        if !(self.gap_dampening >= 0.0) {
            return Err(EloError::ConfigurationError {
                message: "Gap dampening must be non-negative".to_string(),
            });
        }

        if !(self.dampening_base > 0.0) {
            return Err(EloError::ConfigurationError {
                message: "Dampening base must be positive".to_string(),
            });
        }

        Ok(())
    }
}

/// Arithmetic mean rating of a roster, `None` when it is empty
pub fn average_rating(players: &[Player]) -> Option<f64> {
    if players.is_empty() {
        return None;
    }
    Some(players.iter().map(|p| p.rating).sum::<f64>() / players.len() as f64)
}

/// Team Elo rating calculator implementation
#[derive(Debug, Clone, Default)]
pub struct TeamEloCalculator {
    config: EloConfig,
}

impl TeamEloCalculator {
    /// Create a new calculator, rejecting invalid parameters
    pub fn new(config: EloConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn elo_config(&self) -> &EloConfig {
        &self.config
    }

    /// Logistic probability that `rating` beats `opponent_rating`
    pub fn expected_score(&self, rating: f64, opponent_rating: f64) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent_rating - rating) / self.config.logistic_scale))
    }

    /// Expected outcomes of both teams; the second is the complement of the first
    pub fn team_expectations(&self, yellow_average: f64, white_average: f64) -> (f64, f64) {
        let yellow = self.expected_score(yellow_average, white_average);
        (yellow, 1.0 - yellow)
    }

    /// Scaling applied to the K-factor for a given goal margin and team gap
    ///
    /// A draw (margin 0) yields exactly zero since `ln(1) == 0`.
    pub fn margin_multiplier(&self, margin: u32, yellow_average: f64, white_average: f64) -> f64 {
        let gap = rating_difference(yellow_average, white_average);
        let damping = self.config.dampening_base
            / (gap * self.config.gap_dampening + self.config.dampening_base);

        (f64::from(margin) + 1.0).ln() * damping
    }

    fn player_change(
        &self,
        player: &Player,
        team: Team,
        opponent_average: f64,
        actual: f64,
        multiplier: f64,
    ) -> RatingChange {
        let expected = self.expected_score(player.rating, opponent_average);
        let delta = self.config.k_factor * multiplier * (actual - expected);

        RatingChange {
            player_name: player.name.clone(),
            team,
            old_rating: player.rating,
            new_rating: player.rating + delta,
            delta,
        }
    }
}

fn ensure_disjoint_rosters(yellow: &[Player], white: &[Player]) -> Result<()> {
    let yellow_names: HashSet<&str> = yellow.iter().map(|p| p.name.as_str()).collect();

    let mut reported: HashSet<&str> = HashSet::new();
    let both: Vec<&str> = white
        .iter()
        .map(|p| p.name.as_str())
        .filter(|name| yellow_names.contains(name) && reported.insert(*name))
        .collect();

    if both.is_empty() {
        return Ok(());
    }

    Err(EloError::InvalidMatch {
        reason: format!("player(s) on both teams: {}", both.join(", ")),
    })
}

impl RatingCalculator for TeamEloCalculator {
    fn calculate_rating_changes(
        &self,
        yellow: &[Player],
        white: &[Player],
        yellow_score: u32,
        white_score: u32,
    ) -> Result<RatingCalculationResult> {
        let yellow_average = average_rating(yellow).ok_or_else(|| EloError::EmptyTeam {
            team: Team::Yellow.to_string(),
        })?;
        let white_average = average_rating(white).ok_or_else(|| EloError::EmptyTeam {
            team: Team::White.to_string(),
        })?;
        ensure_disjoint_rosters(yellow, white)?;

        let (yellow_expected, white_expected) =
            self.team_expectations(yellow_average, white_average);

        let outcome = MatchOutcome::from_scores(yellow_score, white_score);
        let margin = yellow_score.abs_diff(white_score);
        let multiplier = self.margin_multiplier(margin, yellow_average, white_average);

        let mut changes = Vec::with_capacity(yellow.len() + white.len());
        for player in yellow {
            changes.push(self.player_change(
                player,
                Team::Yellow,
                white_average,
                outcome.actual_score(Team::Yellow),
                multiplier,
            ));
        }
        for player in white {
            changes.push(self.player_change(
                player,
                Team::White,
                yellow_average,
                outcome.actual_score(Team::White),
                multiplier,
            ));
        }

        Ok(RatingCalculationResult {
            yellow_expected,
            white_expected,
            multiplier,
            changes,
        })
    }
}
