//! Explicit command enumeration and its dispatch onto the ledger

use crate::error::Result;
use crate::rating::{RatingCalculator, RatingStorage};
use crate::service::{EloLedger, LedgerStats, RecordedMatch};
use crate::types::{MatchHistoryEntry, MatchReport, Player, PlayerName, TeamSplit};
use crate::utils::parse_name_list;
use clap::Subcommand;
use serde::Serialize;

/// Ledger operations available from the command line
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Add a new player
    AddPlayer {
        name: String,
        /// Initial rating (defaults to the configured default rating)
        #[arg(short, long)]
        rating: Option<f64>,
    },

    /// Remove a player (their match history is kept)
    RemovePlayer { name: String },

    /// Overwrite a player's rating
    SetRating {
        name: String,
        #[arg(allow_negative_numbers = true)]
        rating: f64,
    },

    /// List all players by name
    Players,

    /// Record a finished match and update ratings
    RecordMatch {
        /// Yellow team, comma separated
        #[arg(long, value_name = "NAMES")]
        yellow: String,
        /// White team, comma separated
        #[arg(long, value_name = "NAMES")]
        white: String,
        #[arg(long)]
        yellow_score: u32,
        #[arg(long)]
        white_score: u32,
    },

    /// Randomly split the active players into two teams
    AutoMatch {
        /// Active player names (separate arguments or comma separated)
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Show recorded matches, most recent first
    History,

    /// Rename a player, migrating their match history
    Rename { old_name: String, new_name: String },

    /// Show player and match counts
    Stats,
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandOutput {
    PlayerAdded { player: Player },
    PlayerRemoved { name: PlayerName, removed: bool },
    RatingSet {
        name: PlayerName,
        rating: f64,
        updated: bool,
    },
    Players { players: Vec<Player> },
    MatchRecorded { recorded: RecordedMatch },
    Teams { split: TeamSplit },
    History { matches: Vec<MatchHistoryEntry> },
    Renamed {
        old_name: PlayerName,
        new_name: PlayerName,
        renamed: bool,
    },
    Stats { stats: LedgerStats },
}

/// Run one command against the ledger
pub fn execute<S: RatingStorage, C: RatingCalculator>(
    ledger: &mut EloLedger<S, C>,
    command: Command,
) -> Result<CommandOutput> {
    let output = match command {
        Command::AddPlayer { name, rating } => CommandOutput::PlayerAdded {
            player: ledger.add_player(&name, rating)?,
        },
        Command::RemovePlayer { name } => {
            let removed = ledger.remove_player(&name)?;
            CommandOutput::PlayerRemoved { name, removed }
        }
        Command::SetRating { name, rating } => {
            let updated = ledger.set_rating(&name, rating)?;
            CommandOutput::RatingSet {
                name,
                rating,
                updated,
            }
        }
        Command::Players => CommandOutput::Players {
            players: ledger.players()?,
        },
        Command::RecordMatch {
            yellow,
            white,
            yellow_score,
            white_score,
        } => {
            let report = MatchReport::new(
                parse_name_list(&yellow),
                parse_name_list(&white),
                yellow_score,
                white_score,
            );
            CommandOutput::MatchRecorded {
                recorded: ledger.record_match(report)?,
            }
        }
        Command::AutoMatch { names } => {
            let names: Vec<PlayerName> = names
                .iter()
                .flat_map(|arg| parse_name_list(arg))
                .collect();
            CommandOutput::Teams {
                split: ledger.auto_match(names),
            }
        }
        Command::History => CommandOutput::History {
            matches: ledger.history()?,
        },
        Command::Rename { old_name, new_name } => {
            let renamed = ledger.rename_player(&old_name, &new_name)?;
            CommandOutput::Renamed {
                old_name,
                new_name,
                renamed,
            }
        }
        Command::Stats => CommandOutput::Stats {
            stats: ledger.stats()?,
        },
    };

    Ok(output)
}
