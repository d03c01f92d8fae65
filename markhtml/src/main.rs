// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use markhtml::cli::CliArgs;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    if args.inputs.is_empty() && args.output.is_none() {
        return match write_help(&mut io::stdout().lock()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        };
    }

    let html = match markhtml::run(&args) {
        Ok(html) => html,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let written = match &args.output {
        Some(path) => std::fs::write(path, html),
        None => io::stdout().lock().write_all(html.as_bytes()),
    };
    if let Err(err) = written {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn write_help(out: &mut impl Write) -> io::Result<()> {
    CliArgs::command().write_help(out)?;
    out.flush()
}
