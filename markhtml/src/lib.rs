// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

pub mod cli;
pub mod config;

use std::fs;

use markhtml_core::{Renderer, page};

use crate::cli::CliArgs;

pub type Error = Box<dyn std::error::Error>;
pub type Result<T> = std::result::Result<T, Error>;

pub const NO_INPUT_MESSAGE: &str = "没有输入文件";

/// Render every input with its own render call and return the joined HTML.
pub fn run(args: &CliArgs) -> Result<String> {
    if args.inputs.is_empty() {
        return Err(NO_INPUT_MESSAGE.into());
    }

    let options = config::load_options(args.config.as_deref())?;
    let renderer = Renderer::new(options);

    let mut parts = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let text = fs::read_to_string(input)
            .map_err(|err| format!("{}: {err}", input.display()))?;
        let rendered = renderer.render_with_report(&text)?;
        if !rendered.math_failures.is_empty() {
            tracing::info!(
                file = %input.display(),
                failures = rendered.math_failures.len(),
                "math spans left as source"
            );
        }
        parts.push(rendered.html);
    }

    let mut html = parts.join("\n");
    if args.standalone {
        let css = markhtml_core::highlight::theme_css(&renderer.options().highlight_theme)?;
        html = page::standalone_page(&html, &css);
    }
    Ok(html)
}
