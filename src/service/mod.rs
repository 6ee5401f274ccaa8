//! Service layer for the football-elo ledger
//!
//! This module owns the flow from a submitted match to stored ratings:
//! resolving names, running the calculator and writing the result in one
//! transaction.

pub mod ledger;

pub use ledger::{EloLedger, LedgerStats, RecordedMatch};
