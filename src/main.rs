use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cutfile_svg::{ConvertOptions, Orientation, convert_batch, find_xml_files};

#[derive(Parser)]
#[command(name = "cutfile-svg")]
#[command(about = "Convert XML cut files to SVG at physical size")]
#[command(after_help = "Example: cutfile-svg ./input_folder -o ./output_folder")]
struct Cli {
    /// Folder containing the .xml cut files
    input_folder: PathBuf,

    /// Destination folder for SVG files (defaults to the input folder)
    #[arg(short, long)]
    output_folder: Option<PathBuf>,

    /// Rotate the drawing 90 degrees clockwise and center it on the canvas
    #[arg(long)]
    rotate: bool,

    /// Decimal places for emitted coordinates
    #[arg(long, default_value_t = 4)]
    precision: usize,

    /// Number of files to convert in parallel
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Log every pipeline stage
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether every file converted
fn run(cli: Cli) -> Result<bool> {
    if !cli.input_folder.is_dir() {
        bail!(
            "input folder '{}' does not exist",
            cli.input_folder.display()
        );
    }

    let output_folder = cli
        .output_folder
        .unwrap_or_else(|| cli.input_folder.clone());
    fs::create_dir_all(&output_folder).with_context(|| {
        format!(
            "could not create output folder '{}'",
            output_folder.display()
        )
    })?;

    let inputs = find_xml_files(&cli.input_folder)
        .with_context(|| format!("could not list '{}'", cli.input_folder.display()))?;
    if inputs.is_empty() {
        warn!("no XML files found in '{}'", cli.input_folder.display());
        return Ok(true);
    }

    let orientation = if cli.rotate {
        Orientation::Rotate90
    } else {
        Orientation::Upright
    };
    let opts = ConvertOptions::new()
        .with_precision(cli.precision)
        .with_orientation(orientation);

    info!("converting {} file(s)", inputs.len());
    let report = convert_batch(&inputs, &output_folder, &opts, cli.jobs)
        .context("could not start worker pool")?;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(conversion) => {
                for w in &conversion.warnings {
                    warn!("{}: {}", outcome.input.display(), w);
                }
                info!(
                    "converted '{}' to '{}'",
                    outcome.input.display(),
                    outcome.output.display()
                );
            }
            Err(e) => error!("{}", e),
        }
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        warnings = report.warnings(),
        "done"
    );
    Ok(report.is_success())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
