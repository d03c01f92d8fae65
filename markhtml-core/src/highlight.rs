// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! Code fence highlighting.

use std::sync::LazyLock;

use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::{Error, Result};

/// Language used when a fence declares nothing the highlighter knows.
pub const PLAINTEXT: &str = "plaintext";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hljs-" };

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

pub trait Highlighter {
    fn supports(&self, language: &str) -> bool;

    /// Return highlighted markup for `code`. The result is already HTML-escaped.
    fn highlight(&self, code: &str, language: &str) -> Result<String>;
}

/// [`Highlighter`] backed by syntect's bundled grammars.
///
/// Tokens are emitted as `<span>` elements with `hljs-`-prefixed scope classes;
/// [`theme_css`] produces the matching stylesheet.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntectHighlighter;

impl Highlighter for SyntectHighlighter {
    fn supports(&self, language: &str) -> bool {
        SYNTAX_SET.find_syntax_by_token(language).is_some()
    }

    fn highlight(&self, code: &str, language: &str) -> Result<String> {
        let syntax = SYNTAX_SET
            .find_syntax_by_token(language)
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|err| Error::Highlight(format!("{language}: {err}")))?;
        }
        Ok(generator.finalize())
    }
}

/// Stylesheet for the classes emitted by [`SyntectHighlighter`].
pub fn theme_css(theme: &str) -> Result<String> {
    let theme = THEME_SET
        .themes
        .get(theme)
        .ok_or_else(|| Error::Highlight(format!("unknown theme `{theme}`")))?;
    css_for_theme_with_class_style(theme, CLASS_STYLE)
        .map_err(|err| Error::Highlight(err.to_string()))
}
