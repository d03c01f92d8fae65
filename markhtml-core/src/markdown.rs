// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! Markdown to HTML conversion with highlighted code fences and namespaced
//! footnotes.

use std::collections::HashMap;
use std::fmt;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::Result;
use crate::highlight::{Highlighter, PLAINTEXT};

/// Prefix for footnote labels, unique per render call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FootnoteNamespace(String);

impl FootnoteNamespace {
    /// Generate a fresh namespace of the form `{prefix}-{uuid}`.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", uuid::Uuid::new_v4()))
    }

    /// Use a fixed namespace. Callers are responsible for uniqueness.
    pub fn fixed(namespace: impl Into<String>) -> Self {
        Self(namespace.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Anchor id of a footnote definition.
    pub fn definition_id(&self, label: &str) -> String {
        format!("{}-{label}", self.0)
    }

    /// Anchor id of the first reference to a footnote, the target of the
    /// definition's return link.
    pub fn reference_id(&self, label: &str) -> String {
        format!("{}-ref-{label}", self.0)
    }
}

impl fmt::Display for FootnoteNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single-use Markdown converter.
pub struct MarkdownEngine<'h> {
    highlighter: &'h dyn Highlighter,
    namespace: FootnoteNamespace,
}

struct OpenFence {
    language: Option<String>,
    code: String,
}

/// Footnote numbering and reference counts for one document.
#[derive(Default)]
struct Footnotes {
    numbers: HashMap<String, usize>,
    references: HashMap<String, usize>,
}

impl Footnotes {
    /// Numbers follow the first appearance of a label, reference or definition.
    fn number(&mut self, label: &str) -> usize {
        let next = self.numbers.len() + 1;
        *self.numbers.entry(label.to_string()).or_insert(next)
    }

    fn count_reference(&mut self, label: &str) -> usize {
        let count = self.references.entry(label.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

impl<'h> MarkdownEngine<'h> {
    pub fn new(highlighter: &'h dyn Highlighter, namespace: FootnoteNamespace) -> Self {
        Self {
            highlighter,
            namespace,
        }
    }

    pub fn namespace(&self) -> &FootnoteNamespace {
        &self.namespace
    }

    pub fn parse(&self, markdown: &str) -> Result<String> {
        let parser = Parser::new_ext(markdown, parser_options());

        let mut events = Vec::new();
        let mut fence: Option<OpenFence> = None;
        let mut footnotes = Footnotes::default();
        let mut open_definition: Option<String> = None;
        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    fence = Some(OpenFence {
                        language: fence_language(&kind),
                        code: String::new(),
                    });
                }
                Event::Text(text) if fence.is_some() => {
                    if let Some(open) = fence.as_mut() {
                        open.code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(open) = fence.take() {
                        let block = self.render_code_block(open)?;
                        events.push(Event::Html(CowStr::from(block)));
                    }
                }
                Event::FootnoteReference(label) => {
                    let markup = self.footnote_reference(&label, &mut footnotes);
                    events.push(Event::InlineHtml(CowStr::from(markup)));
                }
                Event::Start(Tag::FootnoteDefinition(label)) => {
                    let number = footnotes.number(&label);
                    let id = escape_attribute(&self.namespace.definition_id(&label));
                    events.push(Event::Html(CowStr::from(format!(
                        "<div class=\"footnote-definition\" id=\"{id}\">\
                         <sup class=\"footnote-definition-label\">{number}</sup>\n"
                    ))));
                    open_definition = Some(label.to_string());
                }
                Event::End(TagEnd::FootnoteDefinition) => {
                    if let Some(label) = open_definition.take() {
                        let target = escape_attribute(&self.namespace.reference_id(&label));
                        events.push(Event::Html(CowStr::from(format!(
                            "<a href=\"#{target}\" class=\"footnote-backref\">↩</a></div>\n"
                        ))));
                    }
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        Ok(html_output)
    }

    fn footnote_reference(&self, label: &str, footnotes: &mut Footnotes) -> String {
        let number = footnotes.number(label);
        let nth = footnotes.count_reference(label);
        let mut id = self.namespace.reference_id(label);
        if nth > 1 {
            id.push_str(&format!("-{nth}"));
        }
        format!(
            "<sup class=\"footnote-reference\" id=\"{}\"><a href=\"#{}\">{number}</a></sup>",
            escape_attribute(&id),
            escape_attribute(&self.namespace.definition_id(label)),
        )
    }

    fn render_code_block(&self, fence: OpenFence) -> Result<String> {
        let declared = fence.language.as_deref();
        let language = declared
            .filter(|language| self.highlighter.supports(language))
            .unwrap_or(PLAINTEXT);
        let highlighted = self.highlighter.highlight(&fence.code, language)?;

        let class = match declared {
            Some(declared) => format!("hljs language-{}", escape_attribute(declared)),
            None => "hljs".to_string(),
        };
        Ok(format!(
            "<pre><code class=\"{class}\">{highlighted}</code></pre>\n"
        ))
    }
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

fn fence_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
