//! CLI module for aqdash.
//!
//! Argument parsing and the informational commands (`--version`, `--help`).
//! Parsing should happen early in main(), before the terminal is touched:
//!
//! ```ignore
//! use aqdash::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! if run_cli_command(&command) {
//!     return Ok(());
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, CliOverrides, USAGE};
pub use version::{version_line, VERSION};

/// Handle informational commands by printing to stdout.
///
/// Returns `true` when the command was fully handled and the process
/// should exit; `false` for `Run` and `Print`.
pub fn run_cli_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            true
        }
        CliCommand::Help => {
            print!("{}", USAGE);
            true
        }
        CliCommand::Run(_) | CliCommand::Print(_) => false,
    }
}
