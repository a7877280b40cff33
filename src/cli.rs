//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::fmt;
use std::path::{Path, PathBuf};

/// datasummary - summarize a JSON record set
///
/// Reads a JSON array of flat objects and prints the record count,
/// average age, role distribution and the engineers located in New York.
///
/// Examples:
///   datasummary fixtures/people.json
///   datasummary --sample
///   cat people.json | datasummary
///   datasummary people.json --format json --output summary.json
///   datasummary people.json --city london
///   datasummary --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON file to summarize (`-` reads stdin)
    ///
    /// When omitted, piped stdin is read; on an interactive terminal the
    /// bundled sample dataset is summarized instead.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Summarize the bundled six-person sample dataset
    #[arg(long, conflicts_with = "input")]
    pub sample: bool,

    /// Output file path (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Print the records located in this city instead of the summary
    ///
    /// Matching ignores case. Output is a JSON array.
    #[arg(long, value_name = "NAME")]
    pub city: Option<String>,

    /// City called out in the summary
    #[arg(long, value_name = "NAME", env = "DATASUMMARY_CITY")]
    pub highlight_city: Option<String>,

    /// Role called out in the summary (matched exactly)
    #[arg(long, value_name = "ROLE", env = "DATASUMMARY_ROLE")]
    pub highlight_role: Option<String>,

    /// Fail on unparseable input instead of summarizing an empty dataset
    #[arg(long)]
    pub strict: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .datasummary.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .datasummary.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Where the records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
    Sample,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::Sample => write!(f, "<sample>"),
        }
    }
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain-text summary (default)
    #[default]
    Text,
    /// JSON document
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The input file, or `None` when reading stdin.
    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().filter(|p| *p != Path::new("-"))
    }

    /// Decide where to read records from.
    ///
    /// An omitted input falls back to the sample only when stdin is an
    /// interactive terminal; an explicit `-` always reads stdin.
    pub fn input_source(&self, stdin_is_terminal: bool) -> InputSource {
        if self.sample {
            return InputSource::Sample;
        }

        match self.input_path() {
            Some(path) => InputSource::File(path.to_path_buf()),
            None if self.input.is_none() && stdin_is_terminal => InputSource::Sample,
            None => InputSource::Stdin,
        }
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref city) = self.highlight_city {
            if city.trim().is_empty() {
                return Err("Highlight city must not be empty".to_string());
            }
        }

        if let Some(ref role) = self.highlight_role {
            if role.trim().is_empty() {
                return Err("Highlight role must not be empty".to_string());
            }
        }

        if let Some(path) = self.input_path() {
            if !path.exists() {
                return Err(format!("Input file does not exist: {}", path.display()));
            }
            if !path.is_file() {
                return Err(format!("Input path is not a file: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `general.verbose` setting from the config
    /// file; `--quiet` wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn make_args() -> Args {
        Args {
            input: None,
            sample: false,
            output: None,
            format: OutputFormat::Text,
            city: None,
            highlight_city: None,
            highlight_role: None,
            strict: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::try_parse_from([
            "datasummary",
            "people.json",
            "--format",
            "json",
            "--city",
            "London",
            "--strict",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("people.json")));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.city.as_deref(), Some("London"));
        assert!(args.strict);
    }

    #[test]
    fn test_stdin_input() {
        let mut args = make_args();
        assert!(args.input_path().is_none());
        assert_eq!(args.input_source(false), InputSource::Stdin);
        assert_eq!(args.input_source(false).to_string(), "<stdin>");

        args.input = Some(PathBuf::from("-"));
        assert!(args.input_path().is_none());
        assert_eq!(args.input_source(true), InputSource::Stdin);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_sample_input() {
        let mut args = make_args();
        assert_eq!(args.input_source(true), InputSource::Sample);

        args.sample = true;
        assert_eq!(args.input_source(false), InputSource::Sample);
        assert_eq!(args.input_source(false).to_string(), "<sample>");
    }

    #[test]
    fn test_sample_conflicts_with_input() {
        assert!(Args::try_parse_from(["datasummary", "--sample", "people.json"]).is_err());
        assert!(Args::try_parse_from(["datasummary", "--sample"]).unwrap().sample);
    }

    #[test]
    fn test_validation_missing_input() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("/nonexistent/people.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_existing_input() {
        let file = NamedTempFile::new().unwrap();
        let mut args = make_args();
        args.input = Some(file.path().to_path_buf());
        assert!(args.validate().is_ok());
        assert_eq!(
            args.input_source(true),
            InputSource::File(file.path().to_path_buf())
        );
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_empty_highlight() {
        let mut args = make_args();
        args.highlight_role = Some("  ".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
    }

    #[test]
    fn test_log_level_from_config() {
        let mut args = make_args();
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.quiet = true;
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
