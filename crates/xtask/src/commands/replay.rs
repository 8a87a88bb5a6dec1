//! Replay a recorded match through the agent.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use arena_agent::Agent;
use arena_content::SnapshotLoader;
use arena_core::{Command, GameError};
use clap::Parser;
use console::style;

use crate::utils::load_content;

/// Run the agent over a JSON-lines recording
///
/// Prints one JSON object per snapshot to stdout with the emitted command and
/// the agent's decision state. Rejected snapshots produce an idle command and
/// a warning; configuration problems abort the replay.
#[derive(Parser)]
pub struct Replay {
    /// Recording with one snapshot per line
    #[arg(short, long, value_name = "FILE")]
    snapshots: PathBuf,

    /// Agent configuration (TOML), defaults to the data directory
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Lane table (RON), defaults to the data directory
    #[arg(long, value_name = "FILE")]
    lanes: Option<PathBuf>,

    /// Print only the final summary
    #[arg(short, long)]
    quiet: bool,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let (config, lanes) = load_content(self.config.as_ref(), self.lanes.as_ref())?;
        let snapshots = SnapshotLoader::load(&self.snapshots)?;
        let mut agent = Agent::new(config, lanes).context("failed to build agent")?;

        tracing::info!(
            recording = %self.snapshots.display(),
            ticks = snapshots.len(),
            "replay started"
        );

        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        let mut rejected = 0usize;

        for snapshot in &snapshots {
            let command = match agent.tick(snapshot) {
                Ok(command) => command,
                Err(err) if !err.severity().is_fatal() => {
                    rejected += 1;
                    Command::idle()
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("tick {} failed", snapshot.tick));
                }
            };

            if self.quiet {
                continue;
            }
            let line = serde_json::json!({
                "tick": snapshot.tick,
                "state": agent.state().to_string(),
                "target": agent.target().map(|id| id.0),
                "waypoint": agent.waypoint_index(),
                "flee_cooldown": agent.flee_cooldown(),
                "command": command,
            });
            writeln!(out, "{line}")?;
        }
        out.flush()?;

        eprintln!(
            "{} {} ticks replayed, {} rejected",
            style("✓").green().bold(),
            snapshots.len(),
            rejected
        );
        Ok(())
    }
}
