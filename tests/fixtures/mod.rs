//! Test fixtures for ledger integration testing

#![allow(dead_code)]

use football_elo::matchmaking::RandomTeamSplitter;
use football_elo::rating::{SqliteRatingStorage, TeamEloCalculator};
use football_elo::types::{MatchReport, PlayerName};
use football_elo::EloLedger;

/// In-memory ledger with the default Elo parameters and a seeded splitter
pub fn create_test_ledger() -> EloLedger {
    EloLedger::new(
        SqliteRatingStorage::open_in_memory().unwrap(),
        TeamEloCalculator::default(),
        1000.0,
    )
    .with_splitter(Box::new(RandomTeamSplitter::with_seed(7)))
}

/// Ledger pre-populated with players at the given ratings
pub fn create_seeded_ledger(players: &[(&str, f64)]) -> EloLedger {
    let ledger = create_test_ledger();
    for (name, rating) in players {
        ledger.add_player(name, Some(*rating)).unwrap();
    }
    ledger
}

pub fn names(list: &[&str]) -> Vec<PlayerName> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn report(yellow: &[&str], white: &[&str], yellow_score: u32, white_score: u32) -> MatchReport {
    MatchReport::new(names(yellow), names(white), yellow_score, white_score)
}
