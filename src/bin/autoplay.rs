//! Headless driver: plays random directions until the board locks up.
//!
//! Usage: `hexmerge-autoplay [config.json]`. Set `RUST_LOG=hexmerge=debug` to
//! trace every committed move.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{Context, Result};
use hexmerge::{Direction, Engine, GameConfig, Notification, format_board, format_hud};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MAX_SWIPES: u32 = 100_000;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexmerge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            GameConfig::from_json_str(&raw).with_context(|| format!("parsing config {path}"))?
        }
        None => GameConfig::default(),
    };

    let mut engine = Engine::new(&config).context("building engine")?;
    let mut picker = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };

    let merges = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&merges);
    engine.subscribe(move |_, n| {
        if let Notification::Swiped(report) = n {
            counter.fetch_add(report.merges, Ordering::Relaxed);
        }
    });

    let mut swipes = 0u32;
    let mut committed = 0u32;
    while swipes < MAX_SWIPES && engine.has_legal_move() {
        let Some(&direction) = Direction::ALL.choose(&mut picker) else {
            break;
        };
        if engine.swipe(direction).changed() {
            committed += 1;
        }
        swipes += 1;
    }

    tracing::info!(swipes, committed, merges = merges.load(Ordering::Relaxed), "game over");
    println!("{}", format_hud(engine.state()));
    for line in format_board(engine.grid(), engine.state()) {
        println!("{line}");
    }
    Ok(())
}
