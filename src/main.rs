use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

mod chop;
mod cli;
mod config;
mod error;
mod fasta;
mod output;

use cli::Cli;
use config::{Config, PROGRAM_NAME, PROGRAM_VERSION};
use error::EXIT_COMMAND_LINE_ERROR;
use fasta::DEFAULT_LINE_WIDTH;

fn main() -> ExitCode {
    // Parse CLI arguments; clap prints help, version and usage errors itself.
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() {
                EXIT_COMMAND_LINE_ERROR
            } else {
                0
            };
            // nothing sensible left to do if stderr is gone
            let _ = err.print();
            return ExitCode::from(code);
        }
    };
    let (layout, clobber) = args.get_output();

    let config = Config {
        program_name: PROGRAM_NAME,
        version: PROGRAM_VERSION,
        inputs: args.get_input(),
        output_root: PathBuf::from("."),
        layout,
        clobber,
        line_width: DEFAULT_LINE_WIDTH,
        verbosity: args.verbosity(),
    };
    setup_logging(config.verbosity);
    tracing::info!("{} {}", config.program_name, config.version);

    // Chop every input; the first error ends the run.
    match chop::process_files(&config) {
        Ok(summary) => {
            tracing::info!(
                "wrote {} sequences from {} sources ({} directories created)",
                summary.records,
                summary.sources,
                summary.directories_created
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} ERROR: {err}, exiting", config.program_name);
            ExitCode::from(err.exit_code())
        }
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
