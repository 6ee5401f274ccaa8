//! Rating ledger
//!
//! The ledger is the single entry point the shell talks to. It holds an
//! explicit storage handle and rating calculator; there is no global
//! connection. Recording a match resolves every roster name up front and
//! fails fast on unknown players before anything is written.

use crate::config::AppConfig;
use crate::error::{EloError, Result};
use crate::matchmaking::{RandomTeamSplitter, TeamSplitter};
use crate::rating::{
    RatingCalculationResult, RatingCalculator, RatingStorage, SqliteRatingStorage,
    TeamEloCalculator,
};
use crate::types::{
    MatchHistoryEntry, MatchId, MatchReport, Player, PlayerName, Team, TeamSplit,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Outcome of recording a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedMatch {
    pub match_id: MatchId,
    pub report: MatchReport,
    pub result: RatingCalculationResult,
}

/// Summary counters for the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub players: usize,
    pub matches: usize,
}

/// Coordinates storage, rating calculation and team splitting
pub struct EloLedger<S = SqliteRatingStorage, C = TeamEloCalculator> {
    storage: S,
    calculator: C,
    splitter: Box<dyn TeamSplitter>,
    default_rating: f64,
}

impl EloLedger<SqliteRatingStorage, TeamEloCalculator> {
    /// Open the configured database and build the team Elo calculator
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        info!(
            "Opening rating database at {}",
            config.storage.database_path.display()
        );

        let storage = SqliteRatingStorage::open(&config.storage.database_path)?;
        let calculator = TeamEloCalculator::new(config.rating.elo_config())?;
        debug!("Team Elo parameters: {:?}", calculator.elo_config());

        Ok(Self::new(storage, calculator, config.rating.default_rating))
    }
}

impl<S: RatingStorage, C: RatingCalculator> EloLedger<S, C> {
    pub fn new(storage: S, calculator: C, default_rating: f64) -> Self {
        Self {
            storage,
            calculator,
            splitter: Box::new(RandomTeamSplitter::new()),
            default_rating,
        }
    }

    /// Replace the team splitter (e.g. with a seeded one)
    pub fn with_splitter(mut self, splitter: Box<dyn TeamSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    /// Add a player, using the default rating when none is given
    pub fn add_player(&self, name: &str, rating: Option<f64>) -> Result<Player> {
        let name = validate_name(name)?;
        let rating = validate_rating(rating.unwrap_or(self.default_rating))?;

        let player = self.storage.create_player(name, rating)?;
        info!("Added player '{}' with rating {:.2}", player.name, player.rating);
        Ok(player)
    }

    /// Remove a player. Missing players are not an error.
    pub fn remove_player(&self, name: &str) -> Result<bool> {
        let removed = self.storage.remove_player(name.trim())?;
        if removed {
            info!("Removed player '{}'", name.trim());
        } else {
            debug!("No player named '{}' to remove", name.trim());
        }
        Ok(removed)
    }

    /// Overwrite a player's rating. Missing players are not an error.
    pub fn set_rating(&self, name: &str, rating: f64) -> Result<bool> {
        let rating = validate_rating(rating)?;
        let updated = self.storage.set_rating(name.trim(), rating)?;
        if updated {
            info!("Set rating of '{}' to {:.2}", name.trim(), rating);
        } else {
            debug!("No player named '{}' to update", name.trim());
        }
        Ok(updated)
    }

    pub fn player(&self, name: &str) -> Result<Option<Player>> {
        self.storage.get_player(name.trim())
    }

    /// All players ordered by name
    pub fn players(&self) -> Result<Vec<Player>> {
        self.storage.list_players()
    }

    /// Rate a finished match and store the new ratings with the match record
    pub fn record_match(&mut self, report: MatchReport) -> Result<RecordedMatch> {
        let report = normalize_report(report)?;

        let (yellow, white) = self.resolve_rosters(&report)?;

        let result = self.calculator.calculate_rating_changes(
            &yellow,
            &white,
            report.yellow_score,
            report.white_score,
        )?;

        let match_id = self.storage.record_match(&report, &result.new_ratings())?;

        info!(
            "Recorded match {}: yellow {} - {} white (multiplier {:.3})",
            match_id, report.yellow_score, report.white_score, result.multiplier
        );
        for change in &result.changes {
            debug!(
                "  {} ({}): {:.2} -> {:.2}",
                change.player_name, change.team, change.old_rating, change.new_rating
            );
        }

        Ok(RecordedMatch {
            match_id,
            report,
            result,
        })
    }

    /// Split the active players into two random teams
    pub fn auto_match(&self, names: Vec<PlayerName>) -> TeamSplit {
        let names: Vec<PlayerName> = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        let split = self.splitter.split(names);
        debug!(
            "Split {} players into {} yellow and {} white",
            split.yellow.len() + split.white.len(),
            split.yellow.len(),
            split.white.len()
        );
        split
    }

    /// Match history, most recent first, with rosters split by team
    pub fn history(&self) -> Result<Vec<MatchHistoryEntry>> {
        self.storage
            .list_matches()?
            .into_iter()
            .map(|game| {
                let roster = self.storage.roster_for(game.id)?;
                Ok(MatchHistoryEntry::from_roster(game, roster))
            })
            .collect()
    }

    /// Rename a player and carry their match history over
    pub fn rename_player(&mut self, old_name: &str, new_name: &str) -> Result<bool> {
        let old_name = old_name.trim();
        let new_name = validate_name(new_name)?;

        let renamed = self.storage.rename_player(old_name, new_name)?;
        if renamed {
            info!("Renamed player '{}' to '{}'", old_name, new_name);
        } else {
            warn!(
                "No player named '{}'; migrated any matching roster history to '{}'",
                old_name, new_name
            );
        }
        Ok(renamed)
    }

    pub fn stats(&self) -> Result<LedgerStats> {
        Ok(LedgerStats {
            players: self.storage.player_count()?,
            matches: self.storage.match_count()?,
        })
    }

    /// Look up both rosters at once, keeping roster order
    fn resolve_rosters(&self, report: &MatchReport) -> Result<(Vec<Player>, Vec<Player>)> {
        let all: Vec<PlayerName> = report
            .yellow
            .iter()
            .chain(&report.white)
            .cloned()
            .collect();

        let mut found: HashMap<PlayerName, Player> = self
            .storage
            .find_players_by_names(&all)?
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        let missing: Vec<PlayerName> = all
            .into_iter()
            .filter(|name| !found.contains_key(name))
            .collect();

        if !missing.is_empty() {
            return Err(EloError::UnknownPlayer { names: missing });
        }

        let mut take = |names: &[PlayerName]| -> Vec<Player> {
            names.iter().filter_map(|name| found.remove(name)).collect()
        };
        let yellow = take(&report.yellow);
        let white = take(&report.white);

        Ok((yellow, white))
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EloError::InvalidName {
            reason: "name cannot be empty".to_string(),
        });
    }
    if name.contains(',') {
        return Err(EloError::InvalidName {
            reason: format!("'{}' contains a comma", name),
        });
    }
    Ok(name)
}

fn validate_rating(rating: f64) -> Result<f64> {
    if rating.is_finite() {
        Ok(rating)
    } else {
        Err(EloError::InvalidRating { rating })
    }
}

/// Trim names and reject blanks or a player listed twice
fn normalize_report(report: MatchReport) -> Result<MatchReport> {
    let trim = |names: Vec<PlayerName>| -> Vec<PlayerName> {
        names.into_iter().map(|n| n.trim().to_string()).collect()
    };
    let report = MatchReport {
        yellow: trim(report.yellow),
        white: trim(report.white),
        ..report
    };

    {
        let mut seen = HashSet::new();
        for team in [Team::Yellow, Team::White] {
            for name in report.roster(team) {
                if name.is_empty() {
                    return Err(EloError::InvalidMatch {
                        reason: format!("{} roster contains a blank name", team),
                    });
                }
                if !seen.insert(name.as_str()) {
                    return Err(EloError::InvalidMatch {
                        reason: format!("'{}' is listed more than once", name),
                    });
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::MockRatingCalculator;

    fn create_test_ledger() -> EloLedger {
        EloLedger::new(
            SqliteRatingStorage::open_in_memory().unwrap(),
            TeamEloCalculator::default(),
            1000.0,
        )
    }

    fn names(list: &[&str]) -> Vec<PlayerName> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_add_player_uses_default_rating() {
        let ledger = create_test_ledger();
        let alex = ledger.add_player("  Alex ", None).unwrap();
        assert_eq!(alex.name, "Alex");
        assert_eq!(alex.rating, 1000.0);

        let sam = ledger.add_player("Sam", Some(1250.5)).unwrap();
        assert_eq!(sam.rating, 1250.5);
    }

    #[test]
    fn test_add_player_validation() {
        let ledger = create_test_ledger();
        assert!(matches!(
            ledger.add_player("   ", None),
            Err(EloError::InvalidName { .. })
        ));
        assert!(matches!(
            ledger.add_player("Alex,Sam", None),
            Err(EloError::InvalidName { .. })
        ));
        assert!(matches!(
            ledger.add_player("Alex", Some(f64::INFINITY)),
            Err(EloError::InvalidRating { .. })
        ));
        assert!(ledger.players().unwrap().is_empty());
    }

    #[test]
    fn test_record_match_updates_ratings() {
        let mut ledger = create_test_ledger();
        ledger.add_player("Alex", None).unwrap();
        ledger.add_player("Sam", None).unwrap();

        let recorded = ledger
            .record_match(MatchReport::new(names(&["Alex"]), names(&["Sam"]), 3, 0))
            .unwrap();

        let gain = 32.0 * 4f64.ln() * 0.5;
        let alex = ledger.player("Alex").unwrap().unwrap();
        let sam = ledger.player("Sam").unwrap().unwrap();
        assert!((alex.rating - (1000.0 + gain)).abs() < 1e-9);
        assert!((sam.rating - (1000.0 - gain)).abs() < 1e-9);

        let history = ledger.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].game.id, recorded.match_id);
        assert_eq!(history[0].yellow, names(&["Alex"]));
        assert_eq!(history[0].white, names(&["Sam"]));
    }

    #[test]
    fn test_unknown_players_fail_before_any_write() {
        let mut ledger = create_test_ledger();
        ledger.add_player("Alex", None).unwrap();
        ledger.add_player("Sam", None).unwrap();

        let err = ledger
            .record_match(MatchReport::new(
                names(&["Alex", "Ghost"]),
                names(&["Sam", "Phantom"]),
                2,
                1,
            ))
            .unwrap_err();

        match err {
            EloError::UnknownPlayer { names: missing } => {
                assert_eq!(missing, names(&["Ghost", "Phantom"]));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(ledger.stats().unwrap().matches, 0);
        assert_eq!(ledger.player("Alex").unwrap().unwrap().rating, 1000.0);
    }

    #[test]
    fn test_empty_team_rejected() {
        let mut ledger = create_test_ledger();
        ledger.add_player("Alex", None).unwrap();

        let err = ledger
            .record_match(MatchReport::new(names(&["Alex"]), Vec::new(), 1, 0))
            .unwrap_err();
        assert!(matches!(err, EloError::EmptyTeam { .. }));
        assert_eq!(ledger.stats().unwrap().matches, 0);
    }

    #[test]
    fn test_player_listed_twice_rejected() {
        let mut ledger = create_test_ledger();
        ledger.add_player("Alex", None).unwrap();
        ledger.add_player("Sam", None).unwrap();

        let err = ledger
            .record_match(MatchReport::new(
                names(&["Alex"]),
                names(&["Sam", " Alex"]),
                1,
                0,
            ))
            .unwrap_err();
        assert!(matches!(err, EloError::InvalidMatch { .. }));
    }

    #[test]
    fn test_calculator_failure_writes_nothing() {
        let calculator = MockRatingCalculator::new();
        calculator.fail_with("calculator offline");
        let mut ledger = EloLedger::new(
            SqliteRatingStorage::open_in_memory().unwrap(),
            calculator,
            1000.0,
        );
        ledger.add_player("Alex", None).unwrap();
        ledger.add_player("Sam", None).unwrap();

        assert!(ledger
            .record_match(MatchReport::new(names(&["Alex"]), names(&["Sam"]), 1, 0))
            .is_err());
        assert_eq!(ledger.stats().unwrap().matches, 0);
        assert_eq!(ledger.calculator().get_calculation_calls().len(), 1);
    }

    #[test]
    fn test_resolved_players_follow_roster_order() {
        let calculator = MockRatingCalculator::new();
        let mut ledger = EloLedger::new(
            SqliteRatingStorage::open_in_memory().unwrap(),
            calculator,
            1000.0,
        );
        for name in ["Alex", "Kim", "Sam"] {
            ledger.add_player(name, None).unwrap();
        }

        ledger
            .record_match(MatchReport::new(
                names(&["Kim", "Alex"]),
                names(&["Sam"]),
                0,
                0,
            ))
            .unwrap();

        let calls = ledger.calculator().get_calculation_calls();
        let yellow: Vec<&str> = calls[0].0.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(yellow, vec!["Kim", "Alex"]);
    }

    #[test]
    fn test_auto_match_trims_and_splits() {
        let ledger =
            create_test_ledger().with_splitter(Box::new(RandomTeamSplitter::with_seed(3)));
        let split = ledger.auto_match(names(&[" Alex", "Sam ", "", "Kim", "Jo", "Lee"]));
        assert_eq!(split.yellow.len(), 2);
        assert_eq!(split.white.len(), 3);
        assert!(split
            .yellow
            .iter()
            .chain(split.white.iter())
            .all(|n| n.trim() == n));
    }

    #[test]
    fn test_rename_keeps_rating_and_history() {
        let mut ledger = create_test_ledger();
        ledger.add_player("Alex", Some(1100.0)).unwrap();
        ledger.add_player("Sam", None).unwrap();
        ledger
            .record_match(MatchReport::new(names(&["Alex"]), names(&["Sam"]), 1, 1))
            .unwrap();

        assert!(ledger.rename_player("Alex", "Alexandra").unwrap());
        assert_eq!(ledger.player("Alexandra").unwrap().unwrap().rating, 1100.0);
        assert_eq!(ledger.history().unwrap()[0].yellow, names(&["Alexandra"]));

        assert!(matches!(
            ledger.rename_player("Alexandra", ""),
            Err(EloError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_missing_player_operations_are_noops() {
        let mut ledger = create_test_ledger();
        assert!(!ledger.remove_player("Ghost").unwrap());
        assert!(!ledger.set_rating("Ghost", 900.0).unwrap());
        assert!(!ledger.rename_player("Ghost", "Spirit").unwrap());
        assert_eq!(
            ledger.stats().unwrap(),
            LedgerStats {
                players: 0,
                matches: 0
            }
        );
    }
}
