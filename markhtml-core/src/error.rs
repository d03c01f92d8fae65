// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use thiserror::Error;

/// Errors raised while rendering or configuring.
#[derive(Error, Debug)]
pub enum Error {
    /// A math span could not be typeset. Recovered per span by the substitutor.
    #[error("math rendering failed: {0}")]
    Math(String),

    #[error("syntax highlighting failed: {0}")]
    Highlight(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
