// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_BORDER_COLOR: &str = "var(--voithos-silver)";
pub const DEFAULT_FOOTNOTE_PREFIX: &str = "footnote";
pub const DEFAULT_HIGHLIGHT_THEME: &str = "base16-ocean.dark";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub inject_inline_styles: bool,
    pub border_color: String,
    pub footnote_prefix: String,
    pub highlight_theme: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            inject_inline_styles: true,
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            footnote_prefix: DEFAULT_FOOTNOTE_PREFIX.to_string(),
            highlight_theme: DEFAULT_HIGHLIGHT_THEME.to_string(),
        }
    }
}

pub fn load_options_from_yaml_file(path: &Path) -> crate::Result<Options> {
    let content = std::fs::read_to_string(path)?;
    let options = serde_yaml::from_str::<Options>(&content)?;
    Ok(options)
}
