// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

/// KaTeX stylesheet matching the markup produced by the `katex` crate.
pub const KATEX_CSS_URL: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.22/dist/katex.min.css";

/// Wrap rendered HTML into a self-contained page for viewing outside a host app.
pub fn standalone_page(body: &str, highlight_css: &str) -> String {
    let lines = [
        "<!DOCTYPE html>".to_string(),
        "<html>".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<link rel=\"stylesheet\" href=\"{KATEX_CSS_URL}\">"),
        format!("<style>\n{}\n</style>", highlight_css.trim_end()),
        "</head>".to_string(),
        "<body>".to_string(),
        body.trim_end().to_string(),
        "</body>".to_string(),
        "</html>".to_string(),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
