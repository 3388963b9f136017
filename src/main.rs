//! Zombsole - Entry Point
//!
//! Builds a game from command line arguments, runs the tick loop with the
//! terminal renderer, and prints the outcome.

use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zombsole::core::{GameConfig, Result};
use zombsole::game::Game;
use zombsole::map::MapData;
use zombsole::renderer::TerminalRenderer;

/// The map used when none is given on the command line
const DEFAULT_MAP: &str = include_str!("../maps/bridge");

/// Terminal zombie arena: players and agents versus the horde
#[derive(Parser, Debug)]
#[command(name = "zombsole")]
#[command(about = "Terminal zombie arena: players and agents versus the horde")]
struct Args {
    /// Win/loss ruleset: extermination, survival, evacuation or safehouse
    #[arg(long, default_value = "extermination")]
    rules: String,

    /// Path to a map file; the bundled bridge map is used when omitted
    #[arg(long)]
    map: Option<PathBuf>,

    /// Number of built-in AI players
    #[arg(long, default_value_t = 1)]
    players: u32,

    /// Agent identifiers; agents idle unless driven externally
    #[arg(long = "agent", value_name = "ID")]
    agents: Vec<String>,

    /// Agent weapon names, cycled over the agents
    #[arg(long = "agent-weapon", value_name = "NAME")]
    agent_weapons: Vec<String>,

    /// Zombies spawned before the first tick
    #[arg(long, default_value_t = 5)]
    initial_zombies: u32,

    /// Respawn zombies after each tick to keep at least this many alive
    #[arg(long, default_value_t = 0)]
    minimum_zombies: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Tick cap; when reached, the rules decide the outcome as it stands
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Frames per second when rendering
    #[arg(long, default_value_t = 10)]
    fps: u64,

    /// Plain ASCII icons instead of the unicode set
    #[arg(long)]
    basic_icons: bool,

    /// Run without drawing frames
    #[arg(long)]
    headless: bool,

    /// Output format for the final result: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zombsole=info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let map = match &args.map {
        Some(path) => MapData::from_file(path)?,
        None => MapData::from_str(DEFAULT_MAP)?,
    };

    let agent_weapons = if args.agent_weapons.is_empty() {
        vec!["rifle".to_string()]
    } else {
        args.agent_weapons
    };
    let config = GameConfig {
        rules_name: args.rules,
        players: args.players,
        agent_ids: args.agents,
        agent_weapons,
        initial_zombies: args.initial_zombies,
        minimum_zombies: args.minimum_zombies,
        seed,
        max_ticks: args.max_ticks,
        use_basic_icons: args.basic_icons,
    };

    let mut game = Game::new(config, map)?;
    let renderer = TerminalRenderer::new(args.basic_icons);
    let frame_time = Duration::from_millis(1000 / args.fps.max(1));
    let mut stdout = io::stdout();

    let outcome = loop {
        if let Some(outcome) = game.outcome() {
            break outcome;
        }
        game.tick()?;
        if !args.headless {
            renderer.render(&game, &mut stdout)?;
            thread::sleep(frame_time);
        }
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        _ => {
            let verdict = if outcome.won { "WIN" } else { "GAME OVER" };
            println!(
                "{} after {} ticks: {} (seed {})",
                verdict, outcome.ticks, outcome.description, seed
            );
        }
    }
    Ok(())
}
