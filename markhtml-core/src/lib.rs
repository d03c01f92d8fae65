// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! Render text that mixes plaintext, Markdown and LaTeX into sanitized,
//! styled HTML.
//!
//! The pipeline runs in four steps: math substitution, Markdown conversion,
//! sanitization and inline style injection.
//!
//! ```no_run
//! let html = markhtml_core::render_str("Euler: $e^{i\\pi} + 1 = 0$").unwrap();
//! assert!(html.contains("katex"));
//! ```

pub mod config;
mod error;
pub mod highlight;
pub mod markdown;
pub mod math;
pub mod page;
pub mod sanitize;
pub mod style;

use tracing::instrument;

pub use config::Options;
pub use error::{Error, Result};
pub use highlight::{Highlighter, SyntectHighlighter};
pub use markdown::{FootnoteNamespace, MarkdownEngine};
pub use math::{KatexRenderer, MathFailure, MathMode, MathRenderer};
pub use sanitize::{AmmoniaSanitizer, Sanitizer};
pub use style::StyleRules;

pub fn render_str(text: &str) -> Result<String> {
    render_str_with_options(text, &Options::default())
}

pub fn render_str_with_options(text: &str, options: &Options) -> Result<String> {
    Renderer::new(options.clone()).render(text)
}

/// Output of [`Renderer::render_with_report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    /// Math spans left as source text, in the order they were found.
    pub math_failures: Vec<MathFailure>,
}

/// The render pipeline with its capabilities.
///
/// A renderer holds no per-call state; each call builds its own Markdown
/// engine and footnote namespace.
pub struct Renderer {
    options: Options,
    style_rules: StyleRules,
    math: Box<dyn MathRenderer>,
    highlighter: Box<dyn Highlighter>,
    sanitizer: Box<dyn Sanitizer>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Renderer {
    pub fn new(options: Options) -> Self {
        let style_rules = StyleRules::from_options(&options);
        Self {
            options,
            style_rules,
            math: Box::new(KatexRenderer),
            highlighter: Box::new(SyntectHighlighter),
            sanitizer: Box::new(AmmoniaSanitizer::new()),
        }
    }

    pub fn with_math_renderer(mut self, math: impl MathRenderer + 'static) -> Self {
        self.math = Box::new(math);
        self
    }

    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn render(&self, text: &str) -> Result<String> {
        self.render_with_report(text).map(|rendered| rendered.html)
    }

    #[instrument(skip_all, fields(input_len = text.len()))]
    pub fn render_with_report(&self, text: &str) -> Result<Rendered> {
        let substitution = math::substitute_math(text, self.math.as_ref());
        tracing::debug!(
            len = substitution.text.len(),
            failures = substitution.failures.len(),
            "math substituted"
        );

        let namespace = FootnoteNamespace::generate(&self.options.footnote_prefix);
        let engine = MarkdownEngine::new(self.highlighter.as_ref(), namespace);
        let html = engine.parse(&substitution.text)?;
        tracing::debug!(len = html.len(), namespace = %engine.namespace(), "markdown converted");

        let html = self.sanitizer.sanitize(&html);
        tracing::debug!(len = html.len(), "sanitized");

        let html = if self.options.inject_inline_styles {
            style::inject_inline_styles(&html, &self.style_rules)?
        } else {
            html
        };

        Ok(Rendered {
            html,
            math_failures: substitution.failures,
        })
    }
}
