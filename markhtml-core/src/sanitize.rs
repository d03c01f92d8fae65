// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! HTML sanitization. This is the only safety boundary before the output is
//! inserted into a page, so everything reaching it is treated as untrusted.

pub trait Sanitizer {
    fn sanitize(&self, html: &str) -> String;
}

/// MathML elements emitted by KaTeX.
const MATHML_TAGS: &[&str] = &[
    "math",
    "semantics",
    "annotation",
    "mrow",
    "mi",
    "mn",
    "mo",
    "ms",
    "mtext",
    "mspace",
    "msup",
    "msub",
    "msubsup",
    "mfrac",
    "msqrt",
    "mroot",
    "mover",
    "munder",
    "munderover",
    "mtable",
    "mtr",
    "mtd",
    "mstyle",
    "mpadded",
    "mphantom",
    "menclose",
];

/// SVG elements KaTeX uses for stretchy glyphs such as radicals and arrows.
const KATEX_SVG_TAGS: &[&str] = &["svg", "path", "line"];

/// [`Sanitizer`] backed by ammonia's allow-list, widened for math, highlighting
/// and footnote markup.
pub struct AmmoniaSanitizer {
    builder: ammonia::Builder<'static>,
}

impl AmmoniaSanitizer {
    pub fn new() -> Self {
        let mut builder = ammonia::Builder::default();
        builder
            .add_tags(MATHML_TAGS)
            .add_tags(KATEX_SVG_TAGS)
            .add_tags(&["input"])
            .add_generic_attributes(&["class", "style", "id", "aria-hidden"])
            .add_tag_attributes("math", &["xmlns", "display"])
            .add_tag_attributes("annotation", &["encoding"])
            .add_tag_attributes("mo", &["stretchy", "fence", "separator", "lspace", "rspace"])
            .add_tag_attributes("mspace", &["width"])
            .add_tag_attributes("mstyle", &["scriptlevel", "displaystyle", "mathcolor"])
            .add_tag_attributes("mtable", &["rowspacing", "columnalign", "columnspacing"])
            .add_tag_attributes(
                "svg",
                &["xmlns", "width", "height", "viewBox", "preserveAspectRatio"],
            )
            .add_tag_attributes("path", &["d"])
            .add_tag_attributes("line", &["x1", "y1", "x2", "y2", "stroke-width"])
            .add_tag_attributes("input", &["type", "checked", "disabled"]);
        Self { builder }
    }
}

impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for AmmoniaSanitizer {
    fn sanitize(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}
