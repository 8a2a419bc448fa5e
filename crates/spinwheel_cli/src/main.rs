//! Spinwheel CLI
//!
//! Replay touch traces through the wheel scroller and inspect its motion curves.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spinwheel_animation::{MotionCurve, MotionMode};
use spinwheel_scroll::{Orientation, ScrollerConfig, Vertical};

mod trace;

use trace::Trace;

#[derive(Parser)]
#[command(name = "spinwheel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Picker wheel scroll engine playground", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a touch trace and print every listener callback
    Simulate {
        /// Trace file (TOML)
        trace: PathBuf,

        /// Scroller config file (TOML); a [scroller] table in the trace wins
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frame interval in milliseconds
        #[arg(short, long, default_value = "16")]
        frame_ms: u64,
    },

    /// Sample a scroll or fling curve frame by frame
    Curve {
        /// Fling with this finger velocity (px/s)
        #[arg(long, conflicts_with = "distance", allow_hyphen_values = true)]
        velocity: Option<f32>,

        /// Scroll this many pixels
        #[arg(long, allow_hyphen_values = true)]
        distance: Option<i32>,

        /// Scroll duration in milliseconds (0 uses the configured default)
        #[arg(short, long, default_value = "0")]
        duration: u32,

        /// Scroller config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frame interval in milliseconds
        #[arg(short, long, default_value = "16")]
        frame_ms: u64,
    },

    /// Show the default tuning as TOML
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            trace,
            config,
            frame_ms,
        } => cmd_simulate(&trace, config.as_deref(), frame_ms),

        Commands::Curve {
            velocity,
            distance,
            duration,
            config,
            frame_ms,
        } => cmd_curve(velocity, distance, duration, config.as_deref(), frame_ms),

        Commands::Info => cmd_info(),
    }
}

fn load_config(path: Option<&Path>) -> Result<ScrollerConfig> {
    match path {
        Some(path) => {
            info!("Using scroller config {}", path.display());
            Ok(ScrollerConfig::load(path)?)
        }
        None => Ok(ScrollerConfig::default()),
    }
}

fn cmd_simulate(path: &Path, config: Option<&Path>, frame_ms: u64) -> Result<()> {
    let config = load_config(config)?;
    let trace = Trace::load(path)?;

    info!(
        "Replaying {} ({} events, {:?} wheel of {} items)",
        path.display(),
        trace.events.len(),
        trace.orientation,
        trace.wheel.item_count.max(trace.wheel.labels.len())
    );

    let report = trace::replay(&trace, config, frame_ms)?;
    for entry in &report.entries {
        println!("{entry}");
    }

    let selection = &report.selection;
    println!();
    match selection.current_label() {
        Some(label) => println!("Selected item {} ({})", selection.current_item(), label),
        None => println!("Selected item {}", selection.current_item()),
    }
    info!("{} frames", report.frames);

    Ok(())
}

fn cmd_curve(
    velocity: Option<f32>,
    distance: Option<i32>,
    duration: u32,
    config: Option<&Path>,
    frame_ms: u64,
) -> Result<()> {
    if frame_ms == 0 {
        anyhow::bail!("Frame interval must be at least 1ms");
    }
    let config = load_config(config)?;
    let mut curve = MotionCurve::new(config.interpolator, config.fling());

    match (velocity, distance) {
        (Some(velocity), _) => {
            let velocity = (velocity * config.velocity_factor) as i32;
            Vertical.start_fling(&mut curve, 0, 0, velocity, 0);
        }
        (None, Some(distance)) => {
            let duration = if duration != 0 {
                duration
            } else {
                config.scrolling_duration_ms
            };
            Vertical.start_scroll(&mut curve, distance, duration, 0);
        }
        (None, None) => anyhow::bail!("Pass --velocity or --distance"),
    }

    info!(
        "{:?} from {} to {} over {}ms",
        curve.mode(),
        curve.start_y(),
        curve.final_y(),
        curve.duration()
    );
    if curve.mode() == MotionMode::Fling {
        let fling = curve.fling_config();
        info!(
            "Launched at {:.0} px/s (friction {}, density {})",
            curve.initial_velocity(),
            fling.friction,
            fling.density
        );
    }

    println!("{:>6}  {:>8}  {:>10}", "ms", "position", "px/s");
    let mut now = 0;
    loop {
        now += frame_ms;
        curve.compute_offset(now);
        let speed = match curve.mode() {
            MotionMode::Fling => format!("{:.0}", curve.current_velocity()),
            MotionMode::Scroll => "-".to_string(),
        };
        println!("{:>6}  {:>8}  {:>10}", now, curve.curr_y(), speed);
        if curve.is_finished() {
            break;
        }
    }

    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("Spinwheel");
    println!("=========");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Default scroller config:");
    println!();
    print!("{}", ScrollerConfig::default().to_toml()?);

    Ok(())
}
