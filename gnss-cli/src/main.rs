//! gnss-bands: classify GNSS carrier frequencies from the command line.
//!
//! Supports:
//! - Classifying frequencies given as arguments or read from a file
//! - Printing the carrier reference table and single band details
//! - Showing or initializing `~/.gnss-bands/config.yaml`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use gnss_core::bands::REFERENCE_TABLE;
use gnss_core::config::{self, Config, OutputFormat};
use gnss_core::{band_info, carrier_frequencies, CapabilitySummary, Classifier, Constellation};

mod input;
mod report;

use input::FrequencyList;

#[derive(Parser)]
#[command(
    name = "gnss-bands",
    version,
    about = "GNSS carrier frequency classifier"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify frequencies given on the command line (MHz, or Hz above 1e6)
    Classify {
        #[arg(required = true, allow_negative_numbers = true)]
        frequencies: Vec<String>,

        #[command(flatten)]
        opts: ClassifyOpts,
    },

    /// Classify frequencies read from a file, one per line ("-" for stdin)
    File {
        file: PathBuf,

        #[command(flatten)]
        opts: ClassifyOpts,
    },

    /// Print the carrier frequency reference table
    Table {
        /// Only show this constellation
        #[arg(short, long)]
        constellation: Option<Constellation>,
    },

    /// Show reference details for one band
    Info {
        constellation: Constellation,
        band: String,
    },

    /// Show the effective configuration
    Config {
        /// Write the default config to ~/.gnss-bands/config.yaml
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct ClassifyOpts {
    /// Constellation to prefer when several share a carrier
    #[arg(short, long)]
    context: Option<Constellation>,

    /// Match window half-width in MHz
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Classify { frequencies, opts } => cmd_classify(&frequencies, &opts),
        Commands::File { file, opts } => cmd_file(&file, &opts),
        Commands::Table { constellation } => cmd_table(constellation),
        Commands::Info {
            constellation,
            band,
        } => cmd_info(constellation, &band),
        Commands::Config { init } => cmd_config(init),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file and apply command-line overrides.
fn resolve(opts: &ClassifyOpts) -> gnss_core::Result<(Classifier, OutputFormat)> {
    let (classifier, format) = apply_overrides(config::load_config()?, opts)?;
    debug!(
        tolerance_mhz = classifier.tolerance_mhz(),
        context = ?classifier.context(),
        %format,
        "classifier ready"
    );
    Ok((classifier, format))
}

/// Flags win over config values; unset flags keep the config value.
fn apply_overrides(
    mut cfg: Config,
    opts: &ClassifyOpts,
) -> gnss_core::Result<(Classifier, OutputFormat)> {
    if let Some(t) = opts.tolerance {
        cfg.classifier.tolerance_mhz = t;
    }
    if opts.context.is_some() {
        cfg.classifier.context = opts.context;
    }
    if opts.json {
        cfg.output.format = OutputFormat::Json;
    }
    Ok((cfg.classifier()?, cfg.output.format))
}

fn cmd_classify(values: &[String], opts: &ClassifyOpts) -> gnss_core::Result<()> {
    let list = input::parse_values(values);
    for bad in &list.rejected {
        warn!(arg = bad.position, text = %bad.text, "not a frequency, skipping");
    }
    run_batch(&list, opts)
}

fn cmd_file(file: &Path, opts: &ClassifyOpts) -> gnss_core::Result<()> {
    let list = input::read_frequencies(file)?;
    for bad in &list.rejected {
        warn!(line = bad.position, text = %bad.text, "not a frequency, skipping");
    }
    debug!(
        file = %file.display(),
        count = list.frequencies_mhz.len(),
        "read frequencies"
    );
    run_batch(&list, opts)
}

fn run_batch(list: &FrequencyList, opts: &ClassifyOpts) -> gnss_core::Result<()> {
    let (classifier, format) = resolve(opts)?;
    let freqs = &list.frequencies_mhz;
    let results = classifier.classify_all(freqs);
    let summary = CapabilitySummary::from_results(&results);

    match format {
        OutputFormat::Json => {
            let batch = report::batch_report(freqs, &results, &list.rejected, &summary);
            println!("{}", report::to_json(&batch)?);
        }
        OutputFormat::Table => {
            if !results.is_empty() {
                println!("{}", report::results_table(freqs, &results));
                println!();
            }
            if let Some(text) = report::rejected_text(&list.rejected) {
                println!("{text}");
                println!();
            }
            println!("{}", report::summary_text(&summary));
        }
    }
    Ok(())
}

fn cmd_table(constellation: Option<Constellation>) -> gnss_core::Result<()> {
    let table = match constellation {
        Some(c) => report::reference_table(carrier_frequencies(c)),
        None => report::reference_table(REFERENCE_TABLE),
    };
    println!("{table}");
    Ok(())
}

fn cmd_info(constellation: Constellation, band: &str) -> gnss_core::Result<()> {
    match band_info(constellation, band) {
        Some(r) => {
            println!("{}", report::reference_table([r]));
            Ok(())
        }
        None => {
            let known: Vec<&str> = carrier_frequencies(constellation).map(|r| r.band).collect();
            Err(gnss_core::GnssError::Config(format!(
                "{constellation} has no band {band} (known: {})",
                known.join(", ")
            )))
        }
    }
}

fn cmd_config(init: bool) -> gnss_core::Result<()> {
    if init {
        let path = config::save_config(&Config::default())?;
        println!("Wrote {}", path.display());
        return Ok(());
    }
    let cfg = config::load_config()?;
    println!("# {}", config::config_file().display());
    print!("{}", config::serialize_config(&cfg));
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
