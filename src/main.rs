use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use focal_slider::config::{Cli, SliderConfig, DEFAULT_CONTAINER};
use focal_slider::slide::SlideSpec;
use focal_slider::texture_loader::load_sorted_image_paths;
use focal_slider::window::{self, WindowSettings};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // --- Load Slides ---
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Container: {}", config.container);
    info!("Slides: {}", config.slides.len());
    info!(
        "Autoplay: {} ({} ms)",
        if config.auto_play { "on" } else { "off" },
        config.slide_duration
    );

    let settings = WindowSettings {
        width: cli.width,
        height: cli.height,
        fps: cli.fps,
    };
    if let Err(e) = window::run(&config, settings) {
        error!("{:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Read SOURCE (config file or image directory) and apply CLI overrides.
fn build_config(cli: &Cli) -> Result<SliderConfig> {
    let mut config = if cli.source.is_dir() {
        let slides = load_sorted_image_paths(&cli.source)?
            .into_iter()
            .map(|path| SlideSpec::new(path.to_string_lossy(), cli.focus))
            .collect();
        let container = cli
            .source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_CONTAINER.to_string());
        SliderConfig::new(container, slides)
    } else {
        SliderConfig::load(&cli.source)
            .with_context(|| format!("Failed to load {}", cli.source.display()))?
    };

    cli.apply(&mut config);
    config.validate()?;

    if cli.shuffle {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        config.slides.shuffle(&mut rng);
    }

    Ok(config)
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "focal_slider=debug"
    } else {
        "focal_slider=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
