// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! LaTeX span detection and substitution.
//!
//! Spans are replaced before the Markdown stage runs, so the rendered markup
//! reaches the Markdown parser as inline HTML.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathMode {
    /// Block-level, centered equation.
    Display,
    Inline,
}

impl MathMode {
    fn is_display(self) -> bool {
        matches!(self, MathMode::Display)
    }
}

/// Typesetting capability used by [`substitute_math`].
pub trait MathRenderer {
    /// Render `expression` (without delimiters) to markup.
    fn render(&self, expression: &str, mode: MathMode) -> Result<String>;
}

/// [`MathRenderer`] backed by KaTeX.
#[derive(Clone, Copy, Debug, Default)]
pub struct KatexRenderer;

impl MathRenderer for KatexRenderer {
    fn render(&self, expression: &str, mode: MathMode) -> Result<String> {
        let opts = katex::Opts::builder()
            .display_mode(mode.is_display())
            .throw_on_error(true)
            .build()
            .map_err(|err| Error::Math(format!("failed to build KaTeX options: {err}")))?;
        katex::render_with_opts(expression, opts).map_err(|err| Error::Math(err.to_string()))
    }
}

/// A span that was left as source text because it could not be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathFailure {
    /// The full span as it appeared in the input, delimiters included.
    pub source: String,
    pub mode: MathMode,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    pub failures: Vec<MathFailure>,
}

struct SpanPattern {
    regex: Regex,
    mode: MathMode,
}

// Order matters: `$$` must be consumed before `$`, brackets before dollars.
static SPAN_PATTERNS: LazyLock<[SpanPattern; 4]> = LazyLock::new(|| {
    [
        SpanPattern {
            regex: Regex::new(r"(?s)\$\$(.+?)\$\$").expect("display dollar pattern"),
            mode: MathMode::Display,
        },
        SpanPattern {
            regex: Regex::new(r"(?s)\\\[(.+?)\\\]").expect("display bracket pattern"),
            mode: MathMode::Display,
        },
        SpanPattern {
            regex: Regex::new(r"\\\((.+?)\\\)").expect("inline paren pattern"),
            mode: MathMode::Inline,
        },
        SpanPattern {
            regex: Regex::new(r"\$(.+?)\$").expect("inline dollar pattern"),
            mode: MathMode::Inline,
        },
    ]
});

// Failed spans are parked behind private-use markers so later passes cannot
// match inside them.
const HOLD_OPEN: char = '\u{E000}';
const HOLD_CLOSE: char = '\u{E001}';

static HOLD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{HOLD_OPEN}([0-9]+){HOLD_CLOSE}")).expect("held span pattern")
});

/// Replace every recognized LaTeX span in `text` with rendered markup.
///
/// Spans that fail to render stay in the output verbatim and are reported in
/// [`Substitution::failures`], once each.
pub fn substitute_math(text: &str, renderer: &dyn MathRenderer) -> Substitution {
    let mut failures: Vec<MathFailure> = Vec::new();
    let mut current = text.to_string();

    for pattern in SPAN_PATTERNS.iter() {
        let replaced = pattern.regex.replace_all(&current, |caps: &Captures<'_>| {
            let source = &caps[0];
            let expression = &caps[1];
            match renderer.render(expression, pattern.mode) {
                Ok(markup) => shield_from_markdown(&markup),
                Err(err) => {
                    tracing::warn!(source, error = %err, "failed to render math span");
                    let held = format!("{HOLD_OPEN}{}{HOLD_CLOSE}", failures.len());
                    failures.push(MathFailure {
                        source: source.to_string(),
                        mode: pattern.mode,
                        message: err.to_string(),
                    });
                    held
                }
            }
        });
        current = replaced.into_owned();
    }

    if !failures.is_empty() {
        current = restore_held(&current, &failures);
    }

    Substitution {
        text: current,
        failures,
    }
}

fn restore_held(text: &str, failures: &[MathFailure]) -> String {
    HOLD_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| failures.get(index))
                .map_or_else(|| caps[0].to_string(), |failure| failure.source.clone())
        })
        .into_owned()
}

/// Make rendered markup inert for the Markdown stage and later math passes.
///
/// Only text outside of tags is touched; attribute values pass through as-is.
fn shield_from_markdown(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + 16);
    let mut in_tag = false;

    for ch in markup.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(ch);
            }
            '>' => {
                in_tag = false;
                out.push(ch);
            }
            '\n' | '\r' => out.push(' '),
            '\\' | '_' | '*' | '`' | '$' | '[' | ']' | '~' | '|' if !in_tag => {
                out.push_str(&format!("&#{};", ch as u32));
            }
            _ => out.push(ch),
        }
    }

    out
}
