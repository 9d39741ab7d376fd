//! Binary entrypoint for the hero slideshow.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use hero_slideshow::config::Configuration;
use hero_slideshow::events::{InventorySource, SceneFrame};
use hero_slideshow::rotation::{Rotation, Rotator};
use hero_slideshow::scene::SlideSurface;
use hero_slideshow::tasks;
use hero_slideshow::tasks::viewer::LogRenderer;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Parser)]
#[command(
    name = "hero-slideshow",
    version,
    about = "hero background slideshow engine"
)]
struct Args {
    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Override the per-slide interval (e.g. "5s", "1500ms")
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    slide_interval: Option<Duration>,

    /// Deterministic shuffle seed (applies to dry-run and live modes)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Print the first N planned slideshow frames without arming the timer
    #[arg(long, value_name = "FRAMES")]
    dry_run: Option<usize>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hero_slideshow={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut cfg = Configuration::from_yaml_file(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    if let Some(interval) = args.slide_interval {
        cfg.slide_interval = interval;
    }
    if let Some(seed) = args.seed {
        cfg.startup_shuffle_seed = Some(seed);
    }
    let cfg = cfg.validated().context("invalid configuration values")?;

    if let Some(frames) = args.dry_run {
        return run_dry_run(&cfg, frames).await;
    }

    // Channels (small/bounded)
    let (inventory_tx, inventory_rx) = mpsc::channel::<InventorySource>(1); // Inventory -> Rotator (one-shot)
    let (frames_tx, frames_rx) = mpsc::channel::<SceneFrame>(4); // Rotator -> Viewer

    let cancel = CancellationToken::new();

    // Ctrl-C cancels the pipeline.
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let mut tasks = JoinSet::new();

    tasks.spawn({
        let cfg = cfg.clone();
        let cancel = cancel.clone();
        async move {
            tasks::inventory::run(cfg, inventory_tx, cancel)
                .await
                .context("inventory task failed")
        }
    });

    tasks.spawn({
        let cfg = cfg.clone();
        let cancel = cancel.clone();
        async move {
            tasks::rotator::run(cfg, inventory_rx, frames_tx, cancel)
                .await
                .context("rotator task failed")
        }
    });

    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            tasks::viewer::run(frames_rx, LogRenderer, cancel)
                .await
                .context("viewer task failed")
        }
    });

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
    }

    Ok(())
}

/// Fetches the inventory once and prints the planned frames instead of
/// running the timer.
async fn run_dry_run(cfg: &Configuration, frames: usize) -> Result<()> {
    let source = tasks::inventory::load(cfg).await;
    let origin = match &source {
        InventorySource::Fetched(_) => "fetched",
        InventorySource::Fallback(_) => "fallback",
    };

    let mut rng = match cfg.startup_shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "# dry run\n# images: {} ({origin})\n# frames: {}\n# seed: {}\n",
        source.images().len(),
        frames,
        cfg.startup_shuffle_seed
            .map_or_else(|| "(random)".to_string(), |s| s.to_string())
    );

    let mut rotator = Rotator::new(Rotation::new(source.into_images(), &mut rng));
    let mut surface = SlideSurface::for_transition(&cfg.transition, cfg.darkness_alpha());
    rotator.start();

    for idx in 0..frames {
        let Some(image) = rotator.step(&mut rng) else {
            break;
        };
        let frame = surface.show(image.resolve(&cfg.image_base_url), &mut rng);
        println!("{:>4}: {frame}", idx + 1);
    }

    Ok(())
}
