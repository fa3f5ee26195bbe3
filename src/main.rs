//! Year Sorter - file photos and videos into year folders
//!
//! Entry point: sets up logging, checks the target directory and runs
//! the organizer over it.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use year_sorter::{Cli, DecoderSet, Organizer};

// CLI Output Module
mod cli_output {
    //! User-facing output on stdout. Colored only when stdout is a
    //! terminal, so redirected output stays plain text.

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::{IsTerminal, stdout};

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const ERROR: Color = Color::Red;
    }

    fn print_colored(msg: &str, color: Color) {
        let mut out = stdout();
        if out.is_terminal() {
            let _ = out.execute(Print(style(msg).with(color).bold()));
            let _ = out.execute(Print("\n"));
        } else {
            let _ = out.execute(Print(format!("{}\n", msg)));
        }
    }

    /// Print an error message
    pub fn print_error(msg: &str) {
        print_colored(&format!("Error: {}", msg), CliTheme::ERROR);
    }

    /// Print the moved-files summary
    pub fn print_summary(total: usize) {
        print_colored(&format!("Images organized: {}", total), CliTheme::SUCCESS);
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines get flushed
    let _guard = setup_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Year Sorter starting");

    if !cli.path.is_dir() {
        error!(path = %cli.path.display(), "Input path is not a directory");
        cli_output::print_error(&format!("{} is not a valid path", cli.path.display()));
        return Ok(ExitCode::FAILURE);
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            cli_output::print_error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(?config, "Configuration loaded");

    let organizer = Organizer::new(config, DecoderSet::standard());

    match organizer.organize(&cli.path) {
        Ok(total) => {
            cli_output::print_summary(total);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "Organizing failed");
            cli_output::print_error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Setup logging: stderr always, plus an optional log file
fn setup_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    let Some(ref log_path) = cli.log_file else {
        subscriber.init();
        return Ok(None);
    };

    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init();
    }

    Ok(Some(guard))
}
