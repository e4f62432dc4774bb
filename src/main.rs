use apod_gal::controller::{Activation, Alerter, Controller};
use apod_gal::dates::{DateInputs, DateRangeInitializer};
use apod_gal::fetch::ApodClient;
use apod_gal::gallery::Gallery;
use apod_gal::types::RecordSet;
use apod_gal::{config, generate, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Date range flags shared by the commands that hit the API.
#[derive(clap::Args, Clone)]
struct RangeArgs {
    /// First day (YYYY-MM-DD). Defaults to `range.default_days` ago
    #[arg(long)]
    start: Option<String>,

    /// Last day (YYYY-MM-DD). Defaults to today
    #[arg(long)]
    end: Option<String>,
}

#[derive(Parser)]
#[command(name = "apod-gal")]
#[command(about = "Astronomy Picture of the Day gallery generator")]
#[command(long_about = "\
Astronomy Picture of the Day gallery generator

Fetches NASA's APOD entries for a date range and renders them as a static
page: one card per day, each opening a detail overlay with the full image or
video and its explanation.

  apod-gal build                                  # last 9 days → dist/index.html
  apod-gal build --start 2024-01-01 --end 2024-01-31
  apod-gal fetch --start 2024-01-01               # save records.json only
  apod-gal generate                               # render the saved records

The API key comes from config.toml ([api] api_key) or APOD_API_KEY.
Run 'apod-gal gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Configuration file (missing file = defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (records.json)
    #[arg(long, default_value = ".apod-gal-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch records for a date range into records.json
    Fetch(RangeArgs),
    /// Render index.html from saved records
    Generate {
        /// Records snapshot to render (default: <temp-dir>/records.json)
        #[arg(long)]
        records: Option<PathBuf>,
    },
    /// Fetch and render in one go
    Build(RangeArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// Alerts on stderr.
struct StderrAlerter;

impl Alerter for StderrAlerter {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Fetch(range) => {
            let config = load_config(&cli.config)?;
            let inputs = resolve_inputs(&range, &config);
            let mut controller = Controller::new(ApodClient::new(&config.api)?, Gallery::new());

            // Failures are logged by the controller; the snapshot is only
            // written for a populated gallery.
            match controller.get_images(&inputs, &mut StderrAlerter) {
                Activation::Populated(_) => {}
                Activation::Rejected | Activation::Failed(_) => return Ok(ExitCode::FAILURE),
            }
            let set = record_set(controller.gallery(), &inputs);
            generate::save_record_set(&cli.temp_dir.join("records.json"), &set)?;
            output::print_fetch_output(&set);
        }
        Command::Generate { records } => {
            let config = load_config(&cli.config)?;
            let records_path = records.unwrap_or_else(|| cli.temp_dir.join("records.json"));
            let page =
                generate::generate(&records_path, &cli.output, &config, &mut StderrAlerter)?;
            output::print_generate_output(&page);
        }
        Command::Build(range) => {
            let config = load_config(&cli.config)?;
            let inputs = resolve_inputs(&range, &config);

            let mut gallery = Gallery::new();
            gallery.on_change(output::print_gallery_state);
            let mut controller = Controller::new(ApodClient::new(&config.api)?, gallery);

            let failed = match controller.get_images(&inputs, &mut StderrAlerter) {
                Activation::Rejected => return Ok(ExitCode::FAILURE),
                Activation::Populated(_) => {
                    let set = record_set(controller.gallery(), &inputs);
                    generate::save_record_set(&cli.temp_dir.join("records.json"), &set)?;
                    false
                }
                Activation::Failed(_) => true,
            };

            let page = generate::write_page(&mut controller, &inputs, &config, &cli.output)?;
            output::print_generate_output(&page);
            if failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Load the config file and apply the `APOD_API_KEY` override.
fn load_config(path: &std::path::Path) -> Result<config::Config, config::ConfigError> {
    let api_key = std::env::var(config::API_KEY_ENV).ok();
    Ok(config::load_config(path)?.with_api_key_override(api_key))
}

/// Snapshot of the records the gallery currently shows.
fn record_set(gallery: &Gallery, inputs: &DateInputs) -> RecordSet {
    RecordSet {
        start_date: inputs.start.clone(),
        end_date: inputs.end.clone(),
        records: gallery.cards().iter().map(|card| card.record.clone()).collect(),
    }
}

/// Fill the date inputs from flags, defaults, and archive bounds.
fn resolve_inputs(range: &RangeArgs, config: &config::Config) -> DateInputs {
    DateRangeInitializer::for_today(config.range.default_days)
        .initialize(range.start.as_deref(), range.end.as_deref())
}
