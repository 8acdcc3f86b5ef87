use crate::validate::Issue;
use std::{io, result};

/// Result type of all ffgraph library calls.
pub type Result<T, E = Error> = result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Filter graph has no outputs")]
    NoOutputs,

    #[error(
        "Output {index} of filter '{filter}' is consumed {consumers} times, insert a split or enable auto_split"
    )]
    StreamReused {
        filter: String,
        index: usize,
        consumers: usize,
    },

    #[error("Filter '{filter}' has {count} output pads, at most {max} can be labelled")]
    TooManyOutputs {
        filter: String,
        count: usize,
        max: usize,
    },

    #[error("Stream of filter '{filter}' is not part of the collected graph")]
    UnresolvedStream { filter: String },

    #[error("Filter graph validation failed: {}", format_issues(.0))]
    Validation(Vec<Issue>),

    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("Unknown {option} token '{token}'")]
    UnknownToken { option: &'static str, token: String },

    // ---- Graph document ----
    #[error("Unknown stream reference '{0}'")]
    UnknownReference(String),

    #[error("Duplicate id '{0}' in graph document")]
    DuplicateId(String),

    #[error("Unsupported graph document extension: {0}")]
    UnsupportedDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "libav")]
    #[error("FFmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg_next::Error),
}

fn format_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
