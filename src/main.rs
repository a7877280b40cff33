//! datasummary - JSON record-set summarizer
//!
//! A CLI tool that loads a JSON array of flat records and prints
//! aggregate statistics about it.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input or config, strict parse failure, etc.)

use anyhow::{Context, Result};
use datasummary::cli::{Args, InputSource, OutputFormat};
use datasummary::config::{Config, ConfigOrigin, DEFAULT_CONFIG_FILE};
use datasummary::models::{Dataset, Report, ReportMetadata};
use datasummary::{loader, report, Analyzer};
use std::io::{IsTerminal, Read};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Six-person dataset summarized by `--sample`.
const SAMPLE_DATA: &str = include_str!("../fixtures/people.json");

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // The config can raise verbosity, so it is read before logging starts
    let (mut config, origin) = match Config::resolve(args.config.as_deref(), Path::new(".")) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    debug!("datasummary v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    log_config_origin(&origin);

    match run(args, config) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Summary failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .datasummary.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so stdout carries only the report.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load, analyze and print. Returns the exit code.
fn run(args: Args, config: Config) -> Result<i32> {
    debug!("Effective config: {:?}", config);

    let source = args.input_source(std::io::stdin().is_terminal());
    let raw = read_input(&source)?;

    let dataset = load_dataset(&raw, &source.to_string(), config.general.strict)?;
    info!("Loaded {} records from {}", dataset.len(), source);

    let analyzer = Analyzer::with_fields(dataset, config.fields.clone());

    let output = if let Some(ref city) = args.city {
        let matched = analyzer.filter_by_city(city);
        info!("{} records located in {}", matched.len(), city);
        report::generate_records_json(&matched)?
    } else {
        let summary = analyzer.summary(&config.summary);
        match args.format {
            OutputFormat::Text => report::generate_text_report(&summary),
            OutputFormat::Json => report::generate_json_report(&Report {
                metadata: ReportMetadata::new(source.to_string()),
                summary,
            })?,
        }
    };

    match args.output {
        Some(ref path) => {
            report::write_report(&output, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(0)
}

/// Decode the input, honoring the strict setting.
fn load_dataset(raw: &str, source: &str, strict: bool) -> Result<Dataset> {
    if strict {
        loader::parse_records(raw).with_context(|| format!("Failed to parse records: {}", source))
    } else {
        Ok(loader::load(raw))
    }
}

/// Read the whole input from the selected source.
fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        InputSource::Stdin => {
            debug!("Reading records from stdin");
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
        InputSource::Sample => {
            info!("No input given; summarizing the bundled sample dataset");
            Ok(SAMPLE_DATA.to_string())
        }
    }
}

/// Report which configuration is in effect.
fn log_config_origin(origin: &ConfigOrigin) {
    match origin {
        ConfigOrigin::Explicit(path) => info!("Loaded config from: {}", path.display()),
        ConfigOrigin::Discovered(path) => info!("Loaded default config from {}", path.display()),
        ConfigOrigin::Builtin => debug!("No config file found, using defaults"),
        ConfigOrigin::Fallback(reason) => warn!("Failed to load config: {}", reason),
    }
}
