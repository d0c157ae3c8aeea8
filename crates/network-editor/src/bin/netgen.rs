use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use network_editor::cli::{Cli, render, run_cli};
use network_editor::logging::{self, LoggingError};
use tracing::error;

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let mut state = run_cli(&cli).context("bulk generate failed")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render(&mut state, cli.format, &mut writer)
        .context("failed to render output")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        error!("netgen failed: {err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

// tracing is not available yet
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
