//! Altered Engine - Main Binary
//!
//! Drives the match engine through its boundary operations: a scripted demo
//! match, and inspection of saved snapshots.

use altered_engine::{
    api::{GameService, ServiceConfig},
    core::{ActionIntent, CardId, ParticipantPayload},
    game::{StartStatus, VerbosityLevel, MANA_REQUIRED},
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Verbosity level for match output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "altered")]
#[command(about = "Altered Engine - phase-structured card game server core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted two-player match through the boundary API
    Demo {
        /// Set random seed for deterministic runs
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Directory for match snapshots
        #[arg(long, default_value = "games")]
        games_dir: PathBuf,

        /// Verbosity level for match output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Cards per starting deck
        #[arg(long, default_value_t = 40)]
        deck_size: usize,
    },

    /// List saved match snapshots
    List {
        /// Directory for match snapshots
        #[arg(long, default_value = "games")]
        games_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            seed,
            games_dir,
            verbosity,
            deck_size,
        } => run_demo(seed, games_dir, verbosity.into(), deck_size),
        Commands::List { games_dir } => list_snapshots(games_dir),
    }
}

fn deck(prefix: &str, size: usize) -> Vec<CardId> {
    (0..size)
        .map(|i| CardId::new(format!("{prefix}{i}")))
        .collect()
}

fn run_demo(
    seed: u64,
    games_dir: PathBuf,
    verbosity: VerbosityLevel,
    deck_size: usize,
) -> anyhow::Result<()> {
    let config = ServiceConfig {
        games_dir,
        verbosity,
        ..ServiceConfig::default()
    };
    let service = GameService::new(config).with_seed(seed);

    let alice = service
        .create_game(ParticipantPayload::new("Alice", deck("a", deck_size)))
        .context("creating the demo match")?;
    let match_id = alice.game_id.clone();
    println!("created match {match_id}");

    let status = service.start_game(&match_id)?;
    println!("start with one participant: {}", status.message());

    let bob = service.join_game(&match_id, ParticipantPayload::new("Bob", deck("b", deck_size)))?;
    let status = service.start_game(&match_id)?;
    println!("start with two participants: {}", status.message());
    anyhow::ensure!(status == StartStatus::Initialized, "match failed to start");

    // both participants bank their mana from the dealt hands
    for view in [&alice, &bob] {
        let current = service.get_available_actions(&match_id, view.id)?;
        let batch: Vec<ActionIntent> = current
            .hand
            .iter()
            .take(MANA_REQUIRED)
            .map(|card| ActionIntent::MoveCard {
                card: card.clone(),
                from: "hand".to_string(),
                to: "mana_pile".to_string(),
            })
            .collect();
        let after = service.submit_actions(&match_id, view.id, batch)?;
        println!(
            "p{}: banked {} mana, {} cards left in hand",
            after.id,
            after.mana_pile.len(),
            after.hand.len()
        );
    }

    // polling is what moves a ready match forward
    let view = service.get_available_actions(&match_id, alice.id)?;
    println!(
        "p{}: {} actions available, hand size {}",
        view.id,
        view.available_actions.len(),
        view.hand.len()
    );

    println!("snapshot saved under {}", service.store().dir().display());
    Ok(())
}

fn list_snapshots(games_dir: PathBuf) -> anyhow::Result<()> {
    let store = altered_engine::game::SnapshotStore::new(&games_dir);
    let ids = store.list().context("reading the games directory")?;
    if ids.is_empty() {
        println!("no snapshots under {}", games_dir.display());
        return Ok(());
    }
    for id in ids {
        let state = store.load(&id)?;
        println!(
            "{id}: phase {}, day {}, {} participants",
            state.phase,
            state.day,
            state.players.len()
        );
    }
    Ok(())
}
