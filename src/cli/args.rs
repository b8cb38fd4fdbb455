//! Command-line argument parsing for aqdash.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use thiserror::Error;

/// Flags that override environment and default configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--base-url URL`
    pub base_url: Option<String>,
    /// `--refresh SECS` (0 disables auto-refresh)
    pub refresh_secs: Option<u64>,
    /// `--timeout SECS` (0 disables the request timeout)
    pub timeout_secs: Option<u64>,
    /// `--distinguish-empty`
    pub distinguish_empty: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the interactive dashboard (default)
    Run(CliOverrides),
    /// Render one frame to stdout and exit
    Print(CliOverrides),
}

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),

    #[error("{flag} requires a value")]
    MissingValue { flag: String },

    #[error("{flag}: '{value}' is not a whole number of seconds")]
    InvalidSeconds { flag: String, value: String },
}

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Terminal dashboard for current air quality and the PM2.5 forecast.

Usage: aqdash [OPTIONS]

Options:
      --base-url <URL>     Backend base URL [env: AQDASH_BASE_URL] [default: http://127.0.0.1:8000]
      --refresh <SECS>     Reload both panels every SECS seconds (max 86400), 0 = off [env: AQDASH_REFRESH_SECS]
      --timeout <SECS>     Per-request timeout (max 86400), 0 = none [env: AQDASH_TIMEOUT_SECS]
      --distinguish-empty  Show \"No forecast data available\" for an empty forecast
      --print              Render a single frame to stdout and exit
  -V, --version            Print version
  -h, --help               Print help

Keys: r refresh, ←/→ or h/l select forecast point, q/Esc quit
";

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use aqdash::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["aqdash".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    let mut print = false;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--print" => print = true,
            "--distinguish-empty" => overrides.distinguish_empty = true,
            "--base-url" => overrides.base_url = Some(value(&flag, inline, &mut args)?),
            "--refresh" => {
                let raw = value(&flag, inline, &mut args)?;
                overrides.refresh_secs = Some(seconds(&flag, raw)?);
            }
            "--timeout" => {
                let raw = value(&flag, inline, &mut args)?;
                overrides.timeout_secs = Some(seconds(&flag, raw)?);
            }
            _ => return Err(ArgsError::UnknownArgument(arg)),
        }
    }

    Ok(if print {
        CliCommand::Print(overrides)
    } else {
        CliCommand::Run(overrides)
    })
}

fn value<I>(flag: &str, inline: Option<String>, rest: &mut I) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    inline
        .or_else(|| rest.next())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ArgsError::MissingValue {
            flag: flag.to_string(),
        })
}

fn seconds(flag: &str, raw: String) -> Result<u64, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidSeconds {
        flag: flag.to_string(),
        value: raw,
    })
}
