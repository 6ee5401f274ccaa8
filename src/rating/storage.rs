//! Rating storage interface and SQLite implementation
//!
//! This module defines the interface for persisting players, matches and
//! match rosters, with a SQLite-backed implementation that works on a file or
//! fully in memory.
//!
//! Roster entries reference players by name. Removing a player leaves their
//! historical roster rows in place; renaming migrates them in the same
//! transaction as the player row.

use crate::error::{EloError, Result};
use crate::types::{Match, MatchId, MatchReport, Player, PlayerName, RosterEntry, Team};
use crate::utils::current_timestamp;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use std::collections::HashMap;
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS players (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        name       TEXT    NOT NULL UNIQUE,
        rating     REAL    NOT NULL,
        created_at TEXT    NOT NULL
    );

    CREATE TABLE IF NOT EXISTS matches (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        yellow_score INTEGER NOT NULL,
        white_score  INTEGER NOT NULL,
        created_at   TEXT    NOT NULL
    );

    CREATE TABLE IF NOT EXISTS roster (
        match_id    INTEGER NOT NULL REFERENCES matches (id),
        player_name TEXT    NOT NULL,
        team        TEXT    NOT NULL CHECK (team IN ('yellow', 'white'))
    );

    CREATE INDEX IF NOT EXISTS roster_match_id ON roster (match_id);
    CREATE INDEX IF NOT EXISTS roster_player_name ON roster (player_name);
";

/// Trait for rating storage operations
pub trait RatingStorage {
    /// Add a new player; fails with `DuplicateName` if the name is taken
    fn create_player(&self, name: &str, rating: f64) -> Result<Player>;

    /// Remove a player by name. Returns false when no such player existed.
    fn remove_player(&self, name: &str) -> Result<bool>;

    /// Overwrite a player's rating. Returns false when no such player existed.
    fn set_rating(&self, name: &str, rating: f64) -> Result<bool>;

    /// Get a single player by name
    fn get_player(&self, name: &str) -> Result<Option<Player>>;

    /// All players ordered by name
    fn list_players(&self) -> Result<Vec<Player>>;

    /// Players matching any of `names`, in storage order
    ///
    /// Unknown names are skipped and duplicates collapse to one result.
    fn find_players_by_names(&self, names: &[PlayerName]) -> Result<Vec<Player>>;

    /// Store new ratings, the match row and its roster atomically
    fn record_match(
        &mut self,
        report: &MatchReport,
        updated_ratings: &HashMap<PlayerName, f64>,
    ) -> Result<MatchId>;

    /// All matches, most recent first
    fn list_matches(&self) -> Result<Vec<Match>>;

    /// Roster entries of one match
    fn roster_for(&self, match_id: MatchId) -> Result<Vec<RosterEntry>>;

    /// Rename a player and migrate their roster history atomically
    ///
    /// Fails with `DuplicateName` if `new_name` already belongs to another
    /// player. Returns false when `old_name` had no player row.
    fn rename_player(&mut self, old_name: &str, new_name: &str) -> Result<bool>;

    /// Get total number of players
    fn player_count(&self) -> Result<usize>;

    /// Get total number of recorded matches
    fn match_count(&self) -> Result<usize>;
}

impl ToSql for Team {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

impl FromSql for Team {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        rating: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn match_from_row(row: &Row<'_>) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        yellow_score: row.get(1)?,
        white_score: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn map_name_conflict(err: rusqlite::Error, name: &str) -> EloError {
    if is_unique_violation(&err) {
        EloError::DuplicateName {
            name: name.to_string(),
        }
    } else {
        EloError::Storage(err)
    }
}

/// SQLite-backed rating storage
#[derive(Debug)]
pub struct SqliteRatingStorage {
    conn: Connection,
}

impl SqliteRatingStorage {
    /// Open (or create) a database file and make sure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private database that lives only as long as this handle
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn name_exists(conn: &Connection, name: &str) -> Result<bool> {
        let exists = conn
            .query_row(
                "SELECT 1 FROM players WHERE name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        Ok(exists)
    }
}

impl RatingStorage for SqliteRatingStorage {
    fn create_player(&self, name: &str, rating: f64) -> Result<Player> {
        let created_at = current_timestamp();

        self.conn
            .execute(
                "INSERT INTO players (name, rating, created_at) VALUES (?1, ?2, ?3)",
                params![name, rating, created_at],
            )
            .map_err(|e| map_name_conflict(e, name))?;

        Ok(Player {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            rating,
            created_at,
        })
    }

    fn remove_player(&self, name: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM players WHERE name = ?1", params![name])?;
        Ok(removed > 0)
    }

    fn set_rating(&self, name: &str, rating: f64) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE players SET rating = ?1 WHERE name = ?2",
            params![rating, name],
        )?;
        Ok(updated > 0)
    }

    fn get_player(&self, name: &str) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                "SELECT id, name, rating, created_at FROM players WHERE name = ?1",
                params![name],
                player_from_row,
            )
            .optional()?;
        Ok(player)
    }

    fn list_players(&self) -> Result<Vec<Player>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, rating, created_at FROM players ORDER BY name ASC")?;
        let players = stmt
            .query_map([], player_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(players)
    }

    fn find_players_by_names(&self, names: &[PlayerName]) -> Result<Vec<Player>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!(
            "SELECT id, name, rating, created_at FROM players WHERE name IN ({}) ORDER BY id ASC",
            placeholders
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let players = stmt
            .query_map(params_from_iter(names.iter()), player_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(players)
    }

    fn record_match(
        &mut self,
        report: &MatchReport,
        updated_ratings: &HashMap<PlayerName, f64>,
    ) -> Result<MatchId> {
        // Rolls back on drop unless committed below
        let tx = self.conn.transaction()?;

        {
            let mut update =
                tx.prepare("UPDATE players SET rating = ?1 WHERE name = ?2")?;
            for (name, rating) in updated_ratings {
                update.execute(params![rating, name])?;
            }
        }

        tx.execute(
            "INSERT INTO matches (yellow_score, white_score, created_at) VALUES (?1, ?2, ?3)",
            params![report.yellow_score, report.white_score, current_timestamp()],
        )?;
        let match_id = tx.last_insert_rowid();

        {
            let mut insert = tx.prepare(
                "INSERT INTO roster (match_id, player_name, team) VALUES (?1, ?2, ?3)",
            )?;
            for team in [Team::Yellow, Team::White] {
                for name in report.roster(team) {
                    insert.execute(params![match_id, name, team])?;
                }
            }
        }

        tx.commit()?;
        Ok(match_id)
    }

    fn list_matches(&self) -> Result<Vec<Match>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, yellow_score, white_score, created_at FROM matches
             ORDER BY created_at DESC, id DESC",
        )?;
        let matches = stmt
            .query_map([], match_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(matches)
    }

    fn roster_for(&self, match_id: MatchId) -> Result<Vec<RosterEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT match_id, player_name, team FROM roster WHERE match_id = ?1 ORDER BY rowid",
        )?;
        let entries = stmt
            .query_map(params![match_id], |row| {
                Ok(RosterEntry {
                    match_id: row.get(0)?,
                    player_name: row.get(1)?,
                    team: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    fn rename_player(&mut self, old_name: &str, new_name: &str) -> Result<bool> {
        let tx = self.conn.transaction()?;

        if old_name != new_name && Self::name_exists(&tx, new_name)? {
            return Err(EloError::DuplicateName {
                name: new_name.to_string(),
            });
        }

        let renamed = tx
            .execute(
                "UPDATE players SET name = ?1 WHERE name = ?2",
                params![new_name, old_name],
            )
            .map_err(|e| map_name_conflict(e, new_name))?;

        tx.execute(
            "UPDATE roster SET player_name = ?1 WHERE player_name = ?2",
            params![new_name, old_name],
        )?;

        tx.commit()?;
        Ok(renamed > 0)
    }

    fn player_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn match_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
