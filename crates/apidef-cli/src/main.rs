//! apidef CLI - API documentation from declarative resource definitions
//!
//! This is the main entry point for the apidef CLI application, providing
//! commands for rendering namespace documentation and converting
//! definition files.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;
mod render;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Load configuration before logging so the file can set the log level
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // Initialize logging
    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    match run(cli, &config) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &error::Error) -> ! {
    eprintln!("{}", error::format_error(e, control::SHOULD_COLORIZE.should_colorize()));
    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(cli.use_color(), cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Spec(args) => handlers::handle_spec(args, config, &mut output),
        Commands::Convert(args) => handlers::handle_convert(args, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    // Create logging configuration from CLI args, config file and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.quiet();
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["apidef", "-vv", "spec", "mq"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["apidef", "--quiet", "convert", "queues.json"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(matches!(cli.command, Commands::Convert(_)));
    }
}
