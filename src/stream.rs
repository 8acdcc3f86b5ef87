use crate::node::{FilterNode, Source};
use crate::output::OutputNode;
use crate::params::Params;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Media type carried by a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    /// Every stream of an input, or a filter whose output type is not modelled.
    Any,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Any => "any",
        })
    }
}

/// What produced a stream.
#[derive(Debug, Clone)]
pub enum Origin {
    /// A stream selected from an input file; `position` picks the n-th stream of its kind.
    Source {
        source: Source,
        position: Option<usize>,
    },
    Filter(FilterNode),
}

/// Handle to one output of a filter node, or to a stream of an input.
///
/// A stream does not own its producer; it holds a shared back-reference so
/// the graph stays alive as long as the caller keeps its terminal streams.
#[derive(Debug, Clone)]
pub struct Stream {
    origin: Origin,
    index: usize,
    kind: MediaKind,
}

impl Stream {
    pub(crate) fn from_source(source: Source, kind: MediaKind, position: Option<usize>) -> Self {
        Self {
            origin: Origin::Source { source, position },
            index: 0,
            kind,
        }
    }

    pub(crate) fn from_filter(node: FilterNode, index: usize, kind: MediaKind) -> Self {
        Self {
            origin: Origin::Filter(node),
            index,
            kind,
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Output pad index on the producing filter. Always 0 for input streams.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// The filter node that produced this stream, `None` for graph sources.
    pub fn node(&self) -> Option<&FilterNode> {
        match &self.origin {
            Origin::Filter(node) => Some(node),
            Origin::Source { .. } => None,
        }
    }

    pub fn source(&self) -> Option<&Source> {
        match &self.origin {
            Origin::Source { source, .. } => Some(source),
            Origin::Filter(_) => None,
        }
    }

    /// Whether both handles designate the same output of the same node.
    pub fn same_as(&self, other: &Stream) -> bool {
        match (&self.origin, &other.origin) {
            (Origin::Filter(a), Origin::Filter(b)) => a.id() == b.id() && self.index == other.index,
            (
                Origin::Source {
                    source: a,
                    position: pa,
                },
                Origin::Source {
                    source: b,
                    position: pb,
                },
            ) => a.id() == b.id() && pa == pb && self.kind == other.kind,
            _ => false,
        }
    }

    /// Applies a filter the typed API does not model.
    ///
    /// The new node has a single output of this stream's kind.
    pub fn filter(&self, name: impl Into<String>, params: Params) -> Stream {
        FilterNode::new(vec![self.clone()], name, params).stream()
    }

    pub fn output(&self, filename: impl Into<String>) -> OutputNode {
        OutputNode::new([self.clone()], filename)
    }

    /// Views this stream as audio, e.g. after an untyped [`Stream::filter`].
    pub fn into_audio(self) -> AudioStream {
        AudioStream(self)
    }

    pub fn into_video(self) -> VideoStream {
        VideoStream(self)
    }
}

/// A stream on which audio filters are available.
#[derive(Debug, Clone)]
pub struct AudioStream(pub(crate) Stream);

/// A stream on which video filters are available.
#[derive(Debug, Clone)]
pub struct VideoStream(pub(crate) Stream);

macro_rules! typed_stream {
    ($typed:ident) => {
        impl Deref for $typed {
            type Target = Stream;

            fn deref(&self) -> &Stream {
                &self.0
            }
        }

        impl AsRef<Stream> for $typed {
            fn as_ref(&self) -> &Stream {
                &self.0
            }
        }

        impl From<$typed> for Stream {
            fn from(stream: $typed) -> Self {
                stream.0
            }
        }

        impl From<&$typed> for Stream {
            fn from(stream: &$typed) -> Self {
                stream.0.clone()
            }
        }
    };
}

typed_stream!(AudioStream);
typed_stream!(VideoStream);

impl From<&Stream> for Stream {
    fn from(stream: &Stream) -> Self {
        stream.clone()
    }
}
