//! Typed bindings, one option struct and one stream method per filter.
//!
//! Option documentation mirrors libavfilter's own; ranges and enumerations
//! are the engine's contract and are only checked by [`crate::validate`].

#[macro_use]
mod macros;

pub mod audio;
pub mod registry;
pub mod sources;
pub mod video;

use crate::params::Params;
use crate::stream::MediaKind;

pub use audio::*;
pub use sources::*;
pub use video::*;

/// Static schema of one option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    /// Rust field name.
    pub field: &'static str,
    /// Name the engine knows the option by.
    pub key: &'static str,
    /// Documented numeric range, inclusive.
    pub range: Option<(f64, f64)>,
    pub required: bool,
}

/// Static schema of one filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub name: &'static str,
    pub media: MediaKind,
    pub options: &'static [OptionSpec],
}

impl FilterSpec {
    pub fn option(&self, key: &str) -> Option<&'static OptionSpec> {
        self.options.iter().find(|option| option.key == key)
    }

    /// Wire key of a Rust field name.
    pub fn wire_key(&self, field: &str) -> Option<&'static str> {
        self.options
            .iter()
            .find(|option| option.field == field)
            .map(|option| option.key)
    }
}

/// Output pad count of split-like filters; FFmpeg defaults to two.
pub(crate) fn output_count(outputs: Option<i64>) -> usize {
    outputs
        .and_then(|outputs| usize::try_from(outputs).ok())
        .unwrap_or(2)
        .max(1)
}

/// Options of one filter, convertible into the node's parameter map.
pub trait FilterOptions {
    const SPEC: &'static FilterSpec;

    /// Every documented key, set or unset, followed by passthrough keys.
    fn into_params(self) -> Params;
}
