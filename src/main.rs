//! Command-line front end: classify a segmentation image against a legend,
//! print the detected classes, and write the census and overlay.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};

use segcensus::data::{display_dimensions, load_segmentation, read_legend, save_overlay, write_census};
use segcensus::palette::pascal_voc_legend;
use segcensus::{
    CensusConfig, CensusError, ClassCensus, CompositorOptions, DuplicatePolicy, ExecutionMode,
    LogLevel, RasterDimensions, analyze,
};

/// Count segmentation classes and composite a translucent overlay.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct CensusArgs {
    /// Legend JSON of `"label": [r, g, b]` entries.
    #[arg(short, long, required_unless_present = "pascal_voc")]
    legend: Option<PathBuf>,

    /// Use the built-in PASCAL VOC legend instead of a legend file.
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "legend")]
    pascal_voc: bool,

    /// Segmentation image produced by the classifier.
    #[arg(short, long)]
    segmentation: PathBuf,

    /// Overlay resolution as WIDTHxHEIGHT (defaults to the segmentation size).
    #[arg(short, long, value_parser = parse_dimensions, conflicts_with = "display")]
    target: Option<RasterDimensions>,

    /// Image the overlay will be shown on; its size becomes the target.
    #[arg(long)]
    display: Option<PathBuf>,

    /// Where to write the overlay PNG.
    #[arg(short, long)]
    overlay: Option<PathBuf>,

    /// Where to write the census JSON (stdout when omitted or `-`).
    #[arg(short, long)]
    census: Option<PathBuf>,

    /// Settings JSON; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the overlay alpha (0-255).
    #[arg(long)]
    alpha: Option<u8>,

    /// Run both passes on all cores.
    #[arg(long, action = ArgAction::SetTrue)]
    parallel: bool,

    /// Let the first label claim a color shared by several labels.
    #[arg(long = "first-seen-wins", action = ArgAction::SetTrue)]
    first_seen_wins: bool,

    /// Override the log level.
    #[arg(long, value_enum, value_name = "LEVEL")]
    log_level: Option<CliLogLevel>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn parse_dimensions(value: &str) -> Result<RasterDimensions, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width = w.trim().parse::<u32>().map_err(|e| format!("bad width '{}': {}", w, e))?;
    let height = h.trim().parse::<u32>().map_err(|e| format!("bad height '{}': {}", h, e))?;
    Ok(RasterDimensions::new(width, height))
}

fn init_logging(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter_level(level.to_level_filter());
    }
    builder.init();
}

/// Config values overridden by any flag given on the command line.
fn merged_options(args: &CensusArgs, config: &CensusConfig) -> CompositorOptions {
    let mut options = config.compositor_options();
    if let Some(alpha) = args.alpha {
        options.overlay_alpha = alpha;
    }
    if args.parallel {
        options.execution = ExecutionMode::Parallel {
            min_pixels: config.parallel_min_pixels,
        };
    }
    if args.first_seen_wins {
        options.duplicate_policy = DuplicatePolicy::FirstSeenWins;
    }
    options
}

fn detection_lines(census: &ClassCensus, tracked: &[String]) -> Vec<String> {
    let detected = census.detected_among(tracked);
    if detected.is_empty() {
        return vec!["No tracked classes detected".to_string()];
    }
    detected
        .into_iter()
        .map(|label| format!("{}: detected ({} px)", label, census.get(label).unwrap_or_default()))
        .collect()
}

/// 2 for bad input, 1 for everything else.
fn exit_status(err: &CensusError) -> u8 {
    if err.is_input_error() { 2 } else { 1 }
}

fn run(args: &CensusArgs, config: &CensusConfig) -> segcensus::Result<()> {
    let legend = match &args.legend {
        Some(path) => read_legend(path)?,
        None => pascal_voc_legend(),
    };
    let raster = load_segmentation(&args.segmentation)?;

    let target = match (&args.target, &args.display) {
        (Some(target), _) => *target,
        (None, Some(display)) => display_dimensions(display)?,
        (None, None) => raster.resolve_dimensions()?,
    };
    let options = merged_options(args, config);

    log::info!(
        "Classifying {:?} against {} legend labels, overlay at {}",
        args.segmentation,
        legend.len(),
        target
    );
    let report = analyze(&legend, &raster, target, &options)?;

    for line in detection_lines(&report.census, &config.tracked_classes) {
        println!("{}", line);
    }

    match args.census.as_deref() {
        Some(path) if path != Path::new("-") => write_census(&report.census, path)?,
        _ => println!("{}", report.census.to_json()?),
    }

    if let Some(path) = &args.overlay {
        save_overlay(&report.overlay, path)?;
        log::info!("Wrote overlay to {:?}", path);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = CensusArgs::parse();

    let mut config = match &args.config {
        Some(path) => match CensusConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::from(2);
            }
        },
        None => CensusConfig::default(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level.into();
    }

    init_logging(config.log_level);

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Run failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}
