//! Command shell for the ledger
//!
//! Each subcommand of the binary maps to exactly one ledger operation.
//! Execution produces a [`CommandOutput`] which is rendered as text or JSON
//! by the [`output`] module.

pub mod command;
pub mod output;

pub use command::{execute, Command, CommandOutput};
pub use output::{render_json, render_text};
