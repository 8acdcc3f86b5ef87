//! Typed construction of FFmpeg filtergraphs.
//!
//! Streams are immutable handles to a node output; applying a filter returns
//! a new stream and leaves the graph built so far untouched:
//!
//! ```
//! use ffgraph::{CompileOptions, Highpass, Lowpass, filter_graph, input};
//!
//! let out = input("in.wav")
//!     .audio()
//!     .highpass(Highpass::new().frequency(3000).poles(2))
//!     .lowpass(Lowpass::new().frequency(500).poles(2));
//!
//! let text = filter_graph(&[out.into()], &CompileOptions::default()).unwrap();
//! assert_eq!(
//!     text,
//!     "[0:a]highpass=frequency=3000:poles=2[s0];[s0]lowpass=frequency=500:poles=2[s1]"
//! );
//! ```

pub mod compile;
pub mod config;
pub mod document;
pub mod error;
pub mod filters;
pub mod graph;
#[cfg(feature = "libav")]
pub mod libav;
pub mod node;
pub mod output;
pub mod params;
pub mod stream;
pub mod validate;
pub mod value;

use std::path::Path;
use tracing::info;

//
// Re-export
//
pub use compile::{Command, CompileOptions, filter_graph, shell_join};
pub use config::{Config, OutputFormat};
pub use document::GraphDocument;
pub use error::{Error, Result};
pub use filters::*;
pub use graph::Graph;
pub use node::{FilterNode, NodeId, Pads, Source, input};
pub use output::{OutputNode, output};
pub use params::Params;
pub use stream::{AudioStream, MediaKind, Origin, Stream, VideoStream};
pub use validate::{Issue, validate};
pub use value::Value;

/// Loads the configured graph document and renders it in the configured format.
pub fn render(config: &Config) -> anyhow::Result<String> {
    let path = config
        .graph
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("A graph document is required"))?;
    info!(%path, "Loading graph document");

    let command = GraphDocument::from_path(Path::new(path))?.build(config.strict)?;
    let options = config.compile_options();

    let rendered = match config.format {
        OutputFormat::Filter => command.filter_complex(&options)?.unwrap_or_default(),
        format => {
            let args = command.compile(&options)?;
            info!(args = args.len(), "Command compiled");
            match format {
                OutputFormat::Json => serde_json::to_string_pretty(&args)?,
                OutputFormat::Args => args.join("\n"),
                _ => shell_join(&args),
            }
        }
    };
    Ok(rendered)
}
