use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use globe_core::Theme;
use globe_data::{CompactCatalog, RawCatalog};
use globe_engine::{
    BufferBackend, Controller, ControllerOptions, FrameOutcome, ManualHost, Scenario,
    ScenarioConfig, Viewport,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "globe")]
#[command(about = "Celestial globe catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a raw Heavens-Above catalog into the compacted format (stdout)
    ///
    ///   globe compact > stars.json
    Compact {
        #[arg(short, long, default_value = "data/heavens-above.json")]
        input: PathBuf,
    },

    /// Check a compacted catalog's line indices
    Validate {
        catalog: PathBuf,
    },

    /// Build the globe scene headlessly and print it as JSON
    Scene {
        catalog: PathBuf,
        #[command(flatten)]
        globe: GlobeArgs,
    },

    /// Run the animation loop for a number of frames on a headless host
    Preview {
        catalog: PathBuf,
        #[command(flatten)]
        globe: GlobeArgs,
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..))]
        frames: u64,
        /// Stop the loop after this many frames (defaults to running all of them)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        stop_after: Option<u64>,
    },
}

#[derive(clap::Args)]
struct GlobeArgs {
    /// Controller options JSON (fieldOfView, pixelRatio, enableAutoRotate, ...)
    #[arg(long)]
    options: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ThemeArg::Light)]
    theme: ThemeArg,
    #[arg(long, default_value = "0")]
    seed: u64,
    #[arg(long, default_value = "1.0")]
    radius: f64,
    #[arg(long, default_value = "1280")]
    width: f32,
    #[arg(long, default_value = "720")]
    height: f32,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

type HeadlessScenario = Scenario<BufferBackend, ManualHost>;

fn build_scenario(catalog: &Path, args: &GlobeArgs) -> Result<HeadlessScenario> {
    let catalog = CompactCatalog::load(catalog)
        .with_context(|| format!("Failed to load compacted catalog: {}", catalog.display()))?;

    let options = match &args.options {
        Some(path) => ControllerOptions::load(path)
            .with_context(|| format!("Failed to load controller options: {}", path.display()))?,
        None => ControllerOptions::default(),
    };

    let controller = Controller::new(
        BufferBackend::default(),
        ManualHost::new(Viewport::new(args.width, args.height)),
        options,
    );
    let config = ScenarioConfig {
        radius: args.radius,
        seed: args.seed,
        theme: args.theme.into(),
        ..Default::default()
    };
    Ok(Scenario::new(controller, catalog, config))
}

#[derive(Serialize)]
struct PreviewReport {
    frames_rendered: u64,
    frames_requested: u64,
    camera_position: [f32; 3],
    backend_size: (u32, u32),
}

fn main() -> Result<()> {
    // stdout carries data, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compact { input } => {
            let raw = RawCatalog::load(&input)
                .with_context(|| format!("Failed to read raw catalog: {}", input.display()))?;
            let json = globe_data::compact(&raw)?.to_pretty_json()?;

            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }

        Commands::Validate { catalog } => {
            let compacted = CompactCatalog::load(&catalog)
                .with_context(|| format!("Invalid catalog: {}", catalog.display()))?;
            let longest = compacted.lines.iter().map(Vec::len).max().unwrap_or(0);
            println!("Catalog {} is valid", catalog.display());
            println!("  Stars:        {}", compacted.stars.len());
            println!("  Lines:        {}", compacted.lines.len());
            println!("  Longest line: {} stars", longest);
        }

        Commands::Scene { catalog, globe } => {
            let mut scenario = build_scenario(&catalog, &globe)?;
            scenario.start()?;
            scenario.controller_mut().stop_animation_loop()?;

            let json = serde_json::to_string_pretty(scenario.controller().scene())?;
            println!("{json}");
        }

        Commands::Preview { catalog, globe, frames, stop_after } => {
            let mut scenario = build_scenario(&catalog, &globe)?;
            scenario.start()?;
            tracing::info!("{:?}", scenario.summary());

            let stop_after = stop_after.unwrap_or(frames);
            let mut ran = 1;
            while ran < frames && scenario.controller_mut().host_mut().take_frame() {
                if ran == stop_after {
                    scenario.controller_mut().stop_animation_loop()?;
                }
                if scenario.controller_mut().animation_frame() == FrameOutcome::Stopped {
                    tracing::info!("Loop stopped after {} frames", scenario.controller().frames());
                    break;
                }
                ran += 1;
            }

            let controller = scenario.controller();
            let report = PreviewReport {
                frames_rendered: controller.frames(),
                frames_requested: controller.host().requested_frames(),
                camera_position: controller.camera().position.to_array(),
                backend_size: controller.backend().size,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
