use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod manifest;
mod scenario;
mod trajectory;

use manifest::{current_git_rev, write_manifest, Manifest};
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Run buoyancy scenarios on the sandbox world")]
struct Cmd {
    /// Log per-step controller summaries
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Simulate a scenario and write its trajectory (CSV, or Parquet for .parquet)
    Simulate {
        /// Scenario JSON; the standard pool with one floating box when omitted
        #[arg(long)]
        scenario: Option<PathBuf>,
        #[arg(long, default_value_t = 600)]
        steps: u32,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the last recorded state of every body in a trajectory
    Inspect {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the default scenario as JSON
    Scenario,
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Simulate {
            scenario,
            steps,
            out,
        } => simulate(scenario, steps, out),
        Action::Inspect { input } => inspect(input),
        Action::Scenario => print_scenario(),
        Action::Report => report(),
    }
}

fn simulate(scenario: Option<PathBuf>, steps: u32, out: PathBuf) -> Result<()> {
    tracing::info!(scenario = ?scenario, steps, out = %out.display(), "simulate");
    let scenario = match &scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let (traj, summary) = trajectory::simulate(&scenario, steps)?;
    let mut df = traj.to_frame()?;
    trajectory::write_frame(&mut df, &out)?;
    tracing::info!(rows = df.height(), cols = df.width(), "trajectory written");

    let path = write_manifest(
        &out,
        Manifest {
            scenario: serde_json::to_value(&scenario)?,
            summary: serde_json::to_value(summary)?,
        },
    )?;
    tracing::info!(manifest = %path.display(), "manifest written");
    Ok(())
}

fn inspect(input: PathBuf) -> Result<()> {
    tracing::info!(input = %input.display(), "inspect");
    let df = trajectory::final_states(&input)?;
    println!("{df}");
    Ok(())
}

fn print_scenario() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&Scenario::default())?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": current_git_rev(),
        "version": buoyancy::VERSION,
        "defaults": {
            "controller": buoyancy::ControllerCfg::default(),
            "geom": buoyancy::GeomCfg::default()
        }
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
