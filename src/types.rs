//! Common types used throughout the rating ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Players are referenced by their unique, human-chosen name
pub type PlayerName = String;

/// Auto-assigned identifier of a recorded match
pub type MatchId = i64;

/// Auto-assigned identifier of a player row
pub type PlayerRowId = i64;

/// The two sides of every match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Yellow,
    White,
}

impl Team {
    /// Label stored in the roster table
    pub fn label(&self) -> &'static str {
        match self {
            Team::Yellow => "yellow",
            Team::White => "white",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yellow" => Ok(Team::Yellow),
            "white" => Ok(Team::White),
            other => Err(format!("unknown team label '{}'", other)),
        }
    }
}

/// A rated player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerRowId,
    pub name: PlayerName,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

/// Result of a finished match from the perspective of the scoreline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    YellowWin,
    WhiteWin,
    Draw,
}

impl MatchOutcome {
    pub fn from_scores(yellow_score: u32, white_score: u32) -> Self {
        match yellow_score.cmp(&white_score) {
            std::cmp::Ordering::Greater => MatchOutcome::YellowWin,
            std::cmp::Ordering::Less => MatchOutcome::WhiteWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// Actual score (1, 0.5 or 0) credited to `team`
    pub fn actual_score(&self, team: Team) -> f64 {
        match (self, team) {
            (MatchOutcome::Draw, _) => 0.5,
            (MatchOutcome::YellowWin, Team::Yellow) | (MatchOutcome::WhiteWin, Team::White) => 1.0,
            _ => 0.0,
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::YellowWin => write!(f, "yellow win"),
            MatchOutcome::WhiteWin => write!(f, "white win"),
            MatchOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// A recorded match. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub yellow_score: u32,
    pub white_score: u32,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_scores(self.yellow_score, self.white_score)
    }
}

/// Membership of one player in one recorded match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub match_id: MatchId,
    pub player_name: PlayerName,
    pub team: Team,
}

/// A finished match as submitted by the caller, before it is rated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub yellow: Vec<PlayerName>,
    pub white: Vec<PlayerName>,
    pub yellow_score: u32,
    pub white_score: u32,
}

impl MatchReport {
    pub fn new(
        yellow: Vec<PlayerName>,
        white: Vec<PlayerName>,
        yellow_score: u32,
        white_score: u32,
    ) -> Self {
        Self {
            yellow,
            white,
            yellow_score,
            white_score,
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_scores(self.yellow_score, self.white_score)
    }

    /// Absolute goal difference
    pub fn margin(&self) -> u32 {
        self.yellow_score.abs_diff(self.white_score)
    }

    pub fn roster(&self, team: Team) -> &[PlayerName] {
        match team {
            Team::Yellow => &self.yellow,
            Team::White => &self.white,
        }
    }
}

/// Rating change information for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_name: PlayerName,
    pub team: Team,
    pub old_rating: f64,
    pub new_rating: f64,
    pub delta: f64,
}

/// A stored match joined with its roster, split by team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchHistoryEntry {
    #[serde(rename = "match")]
    pub game: Match,
    pub yellow: Vec<PlayerName>,
    pub white: Vec<PlayerName>,
}

impl MatchHistoryEntry {
    pub fn from_roster(game: Match, roster: Vec<RosterEntry>) -> Self {
        let (yellow, white): (Vec<_>, Vec<_>) = roster
            .into_iter()
            .partition(|entry| entry.team == Team::Yellow);

        Self {
            game,
            yellow: yellow.into_iter().map(|e| e.player_name).collect(),
            white: white.into_iter().map(|e| e.player_name).collect(),
        }
    }
}

/// Two groups produced by the team splitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub yellow: Vec<PlayerName>,
    pub white: Vec<PlayerName>,
}
