// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::PathBuf;

use clap::Parser;

/// Render Markdown with embedded LaTeX into sanitized HTML.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct CliArgs {
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Wrap the output in a complete HTML page with KaTeX and highlight styles.
    #[arg(long)]
    pub standalone: bool,
}
