//! Hand pose bridge: detector keypoints in, controller protocol lines out.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use hand_pose_bridge::{
    app::BridgeApp,
    calibration::CalibrationAdjustment,
    config::{Config, EXAMPLE_CONFIG},
};
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Log every hand's gesture and actuation values
    #[arg(long, global = true)]
    log_gestures: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert detector frames (JSON lines) into protocol records
    Run {
        /// Frame file to read (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// File to write records to (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Edit the calibration stored in the configuration file
    Calibrate {
        /// Adjustments to apply, in order
        #[arg(short, long, value_enum)]
        adjust: Vec<Adjust>,

        /// Reset calibration to defaults before applying adjustments
        #[arg(long)]
        reset: bool,
    },

    /// Print an example configuration file
    ExampleConfig,
}

/// Command-line names for calibration steps
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Adjust {
    Left,
    Right,
    Up,
    Down,
    Back,
    Forward,
    ScaleUp,
    ScaleDown,
}

impl From<Adjust> for CalibrationAdjustment {
    fn from(adjust: Adjust) -> Self {
        match adjust {
            Adjust::Left => CalibrationAdjustment::Left,
            Adjust::Right => CalibrationAdjustment::Right,
            Adjust::Up => CalibrationAdjustment::Up,
            Adjust::Down => CalibrationAdjustment::Down,
            Adjust::Back => CalibrationAdjustment::Back,
            Adjust::Forward => CalibrationAdjustment::Forward,
            Adjust::ScaleUp => CalibrationAdjustment::ScaleUp,
            Adjust::ScaleDown => CalibrationAdjustment::ScaleDown,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    match args.command {
        Command::Run { input, output } => {
            let mut config = load_config(args.config.as_deref());
            config.validate()?;
            config.output.log_gestures |= args.log_gestures;
            run(&config, input.as_deref(), output.as_deref())
        }
        Command::Calibrate { adjust, reset } => {
            let path = args.config.unwrap_or_else(|| PathBuf::from("config.yaml"));
            calibrate(&path, &adjust, reset)
        }
        Command::ExampleConfig => {
            print!("{EXAMPLE_CONFIG}");
            Ok(())
        }
    }
}

/// Load configuration, falling back to defaults if it cannot be read
fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };

    info!("Loading configuration from: {}", path.display());
    match Config::from_file(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config file: {}. Using defaults.", e);
            Config::default()
        }
    }
}

fn run(config: &Config, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let app = BridgeApp::new(config);

    let stats = match (input, output) {
        (Some(i), Some(o)) => app.run(BufReader::new(File::open(i)?), BufWriter::new(File::create(o)?))?,
        (Some(i), None) => app.run(BufReader::new(File::open(i)?), io::stdout().lock())?,
        (None, Some(o)) => app.run(io::stdin().lock(), BufWriter::new(File::create(o)?))?,
        (None, None) => app.run(io::stdin().lock(), io::stdout().lock())?,
    };

    info!(
        "Done: {} frames, {} records, {} skipped lines",
        stats.frames, stats.records, stats.skipped_lines
    );
    Ok(())
}

fn calibrate(path: &Path, adjustments: &[Adjust], reset: bool) -> Result<()> {
    let mut config = if path.exists() {
        Config::from_file(path)?
    } else {
        info!("{} not found, starting from defaults", path.display());
        Config::default()
    };

    if reset {
        config.calibration.adjust(CalibrationAdjustment::Reset);
        info!("Calibration reset to defaults");
    }
    for &adjust in adjustments {
        config.calibration.adjust(adjust.into());
    }

    let [x, y, z] = config.calibration.position_offset;
    println!("Offset X: {x:.3} (Left/Right)");
    println!("Offset Y: {y:.3} (Up/Down)");
    println!("Offset Z: {z:.3} (Forward/Back)");
    println!("Scale: {:.3}", config.calibration.scale);

    config.to_file(path)?;
    info!("Calibration saved to {}", path.display());
    Ok(())
}
