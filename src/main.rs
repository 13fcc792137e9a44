//! Arcade Sim entry point
//!
//! Headless demo driver: runs one game on its fixed tick with the autopilot
//! at the controls and logs what happens.
//!
//! ```text
//! arcade-sim <pong|shooter> [--seed N] [--ticks N] [--config PATH] [--realtime]
//! ```

use std::path::PathBuf;

use arcade_sim::autopilot::{Autopilot, KeyEvent};
use arcade_sim::sim::{GameEvent, GameKind, GamePhase};
use arcade_sim::{Game, Settings};
use clap::{Parser, ValueEnum};

/// Command-line options
#[derive(Parser, Debug)]
#[command(name = "arcade-sim")]
#[command(about = "Run Pong or the turret shooter headless with the autopilot playing")]
struct Options {
    /// Which game to run
    #[arg(value_enum)]
    game: CliGame,
    /// Fixed RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks if the game is still running
    #[arg(long, default_value_t = 3000)]
    ticks: u64,
    /// Settings JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Sleep the game's tick interval between ticks
    #[arg(long)]
    realtime: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliGame {
    Pong,
    #[value(alias = "shooting")]
    Shooter,
}

impl From<CliGame> for GameKind {
    fn from(value: CliGame) -> Self {
        match value {
            CliGame::Pong => GameKind::Pong,
            CliGame::Shooter => GameKind::Shooter,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();
    let kind = GameKind::from(options.game);

    let mut settings = options
        .config
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if options.seed.is_some() {
        settings.seed = options.seed;
    }

    log::info!("Arcade Sim (native) starting {}...", kind.title());
    run(kind, &options, &settings);
}

fn run(kind: GameKind, options: &Options, settings: &Settings) {
    let mut game = Game::new(kind, settings);
    let mut pilot = Autopilot::new(settings.variant(kind).keys.clone());
    let interval = game.tick_interval();

    game.on_start_command();
    for _ in 0..options.ticks {
        for event in pilot.plan(&game.snapshot()) {
            match event {
                KeyEvent::Down(key) => game.on_key_down(key),
                KeyEvent::Up(key) => game.on_key_up(key),
            }
        }
        game.on_tick();

        for event in game.drain_events() {
            match event {
                GameEvent::Scored { .. } | GameEvent::TargetDestroyed { .. } => {
                    if let Some(score) = game.score() {
                        log::info!("[tick {}] {:?} -> {}", game.snapshot().time_ticks, event, score);
                    }
                }
                _ => log::trace!("{:?}", event),
            }
        }

        if game.phase() == GamePhase::GameOver {
            let snapshot = game.snapshot();
            log::info!(
                "{} ({}, {} ticks)",
                snapshot.message.unwrap_or_default(),
                snapshot.score.map(|s| s.to_string()).unwrap_or_default(),
                snapshot.time_ticks
            );
            break;
        }

        if options.realtime {
            std::thread::sleep(interval);
        }
    }

    if game.phase() == GamePhase::Playing {
        log::info!("Stopped after {} ticks, score {:?}", options.ticks, game.score());
    }
}
