//! Validate configuration and lane files.

use std::path::PathBuf;

use anyhow::Result;
use arena_core::Lane;
use clap::Parser;
use console::style;

use crate::utils::{data_dir, load_content};

/// Load the agent configuration and lane table and report what they contain
#[derive(Parser)]
pub struct CheckConfig {
    /// Agent configuration (TOML), defaults to the data directory
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Lane table (RON), defaults to the data directory
    #[arg(long, value_name = "FILE")]
    lanes: Option<PathBuf>,
}

impl CheckConfig {
    pub fn execute(self) -> Result<()> {
        tracing::debug!(data_dir = %data_dir().display(), "checking content");
        let (config, lanes) = load_content(self.config.as_ref(), self.lanes.as_ref())?;

        println!("{}", style("Arena").bold());
        println!(
            "  {} x {} with {} cells",
            config.arena.width, config.arena.height, config.arena.node_width
        );

        println!("{}", style("Lanes").bold());
        for lane in [Lane::Top, Lane::Middle, Lane::Bottom] {
            let waypoints = lanes.waypoints(lane);
            let heroes: Vec<String> = lanes
                .assignments
                .iter()
                .filter(|assignment| assignment.lane == lane)
                .map(|assignment| assignment.id.0.to_string())
                .collect();
            println!(
                "  {:<8} {} waypoints, heroes [{}]",
                lane.as_ref(),
                waypoints.len(),
                heroes.join(", ")
            );
        }

        println!(
            "{} configuration and lanes are valid",
            style("✓").green().bold()
        );
        Ok(())
    }
}
