//! Text and JSON rendering of command results

use crate::shell::command::CommandOutput;
use crate::utils::{display_rating, format_delta};
use std::fmt::{self, Write};

/// Render a command result as pretty JSON
pub fn render_json(output: &CommandOutput) -> serde_json::Result<String> {
    serde_json::to_string_pretty(output)
}

/// Render a command result for a terminal
pub fn render_text(output: &CommandOutput) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_output(&mut out, output);
    out
}

fn write_output(out: &mut String, output: &CommandOutput) -> fmt::Result {
    match output {
        CommandOutput::PlayerAdded { player } => writeln!(
            out,
            "Player added: {} ({})",
            player.name,
            display_rating(player.rating)
        )?,
        CommandOutput::PlayerRemoved { name, removed } => {
            if *removed {
                writeln!(out, "Player removed: {}", name)?;
            } else {
                writeln!(out, "No player named {}", name)?;
            }
        }
        CommandOutput::RatingSet {
            name,
            rating,
            updated,
        } => {
            if *updated {
                writeln!(out, "Rating of {} set to {}", name, display_rating(*rating))?;
            } else {
                writeln!(out, "No player named {}", name)?;
            }
        }
        CommandOutput::Players { players } => {
            writeln!(out, "========== Player List ==========")?;
            for player in players {
                writeln!(
                    out,
                    "{} - {} (Created: {})",
                    player.name,
                    display_rating(player.rating),
                    player.created_at.format("%Y-%m-%d %H:%M:%S")
                )?;
            }
        }
        CommandOutput::MatchRecorded { recorded } => {
            let report = &recorded.report;
            writeln!(
                out,
                "Match {} recorded: yellow {} - {} white ({})",
                recorded.match_id,
                report.yellow_score,
                report.white_score,
                report.outcome()
            )?;
            for change in &recorded.result.changes {
                writeln!(out, "{}: {}", change.player_name, format_delta(change.delta))?;
            }
        }
        CommandOutput::Teams { split } => {
            writeln!(out, "========== Auto-match Result ==========")?;
            writeln!(out, "Yellow: {}", split.yellow.join(", "))?;
            writeln!(out, "White: {}", split.white.join(", "))?;
        }
        CommandOutput::History { matches } => {
            writeln!(out, "========== Match History ==========")?;
            for entry in matches {
                writeln!(
                    out,
                    "\nMatch {} - {} ({})",
                    entry.game.id,
                    entry.game.created_at.format("%Y-%m-%d %H:%M:%S"),
                    entry.game.outcome()
                )?;
                writeln!(
                    out,
                    "  [{}] Yellow:\t{}",
                    entry.game.yellow_score,
                    entry.yellow.join(", ")
                )?;
                writeln!(
                    out,
                    "  [{}] White:\t{}",
                    entry.game.white_score,
                    entry.white.join(", ")
                )?;
            }
        }
        CommandOutput::Renamed {
            old_name,
            new_name,
            renamed,
        } => {
            if *renamed {
                writeln!(out, "Player renamed: {} -> {}", old_name, new_name)?;
            } else {
                writeln!(out, "No player named {}", old_name)?;
            }
        }
        CommandOutput::Stats { stats } => writeln!(
            out,
            "Players: {}\nMatches: {}",
            stats.players, stats.matches
        )?,
    }

    Ok(())
}
