use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use quest_engine::Game;

mod content;
mod script;

/// Headless host that drives the narrative runtime through a walkthrough
/// script and captures the resulting event log.
#[derive(Parser, Debug)]
#[command(
    about = "Drives the scene/dialogue/overlay runtime through a scripted walkthrough",
    version
)]
struct Args {
    /// Walkthrough script to execute (defaults to the built-in facility demo)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Path to write the engine event log as JSON
    #[arg(long)]
    event_log_json: Option<PathBuf>,

    /// Path to write the final runtime snapshot as JSON
    #[arg(long)]
    state_json: Option<PathBuf>,

    /// Echo every engine event to stderr as it is recorded
    #[arg(long)]
    verbose: bool,
}

/// Built-in demo: the facility infiltration with the ally overlay running
/// alongside. Delays mirror the authored scene timings.
const DEMO_WALKTHROUGH: &str = "\
# Facility infiltration demo
overlay show                     # refused: mission prep not complete yet
flag mission_prep_complete true
overlay show
load facility_interior
click basement_stairs            # blocked: stairwell not found yet
wait 1000                        # entry dialogue arrives
advance-all
click eva_mesh
advance-all
wait 1500                        # Eva's directions sink in
click basement_stairs
advance-all
wait 3000                        # descend to the server room
click override_panel
advance-all
wait 2000
click terminal
advance-all
click terminal
advance-all
wait 8000                        # ally status feed ticks over
overlay hide
wait 1000
";

#[derive(Serialize)]
struct EventLog<'a> {
    events: &'a [String],
}

fn main() -> Result<()> {
    let args = Args::parse();

    let source = match args.script.as_ref() {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading walkthrough script {}", path.display()))?,
        None => DEMO_WALKTHROUGH.to_string(),
    };
    let commands = script::parse(&source).context("parsing walkthrough script")?;

    let mut game = Game::new();
    game.set_verbose(args.verbose);
    content::register_all(&mut game);
    script::run(&mut game, &commands);

    println!(
        "Walkthrough complete: {} commands, {} events, clock at {} ms, scene {}",
        commands.len(),
        game.events().len(),
        game.now(),
        game.current_scene().unwrap_or("<none>")
    );

    if let Some(path) = args.event_log_json.as_ref() {
        let log = EventLog {
            events: game.events(),
        };
        let json = serde_json::to_string_pretty(&log).context("serializing event log to JSON")?;
        fs::write(path, &json)
            .with_context(|| format!("writing event log to {}", path.display()))?;
        println!("Saved event log to {}", path.display());
    }

    if let Some(path) = args.state_json.as_ref() {
        let json = serde_json::to_string_pretty(&game.snapshot())
            .context("serializing runtime snapshot to JSON")?;
        fs::write(path, &json)
            .with_context(|| format!("writing runtime snapshot to {}", path.display()))?;
        println!("Saved runtime snapshot to {}", path.display());
    }

    Ok(())
}
