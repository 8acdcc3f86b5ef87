use crate::filters::{FilterOptions, FilterSpec, registry};
use crate::params::Params;
use crate::stream::{AudioStream, MediaKind, Stream, VideoStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a source or filter node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Output pad layout of a node, kept as runs of one media kind.
///
/// A run stores its length instead of one entry per pad, so a huge pad count
/// costs nothing until streams are taken from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pads(Vec<(MediaKind, usize)>);

impl Pads {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` pads of the same kind.
    pub fn uniform(kind: MediaKind, count: usize) -> Self {
        Self::new().with(kind, count)
    }

    /// Appends `count` pads of `kind`.
    pub fn with(mut self, kind: MediaKind, count: usize) -> Self {
        if count > 0 {
            self.0.push((kind, count));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.0
            .iter()
            .fold(0usize, |total, (_, count)| total.saturating_add(*count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Kind of pad `index`.
    pub fn kind(&self, index: usize) -> Option<MediaKind> {
        let mut offset = index;
        for (kind, count) in &self.0 {
            if offset < *count {
                return Some(*kind);
            }
            offset -= count;
        }
        None
    }

    /// Pad kinds in order, produced lazily.
    pub fn iter(&self) -> impl Iterator<Item = MediaKind> + '_ {
        self.0
            .iter()
            .flat_map(|(kind, count)| std::iter::repeat_n(*kind, *count))
    }
}

impl From<Vec<MediaKind>> for Pads {
    fn from(kinds: Vec<MediaKind>) -> Self {
        kinds.into_iter().collect()
    }
}

impl FromIterator<MediaKind> for Pads {
    fn from_iter<I: IntoIterator<Item = MediaKind>>(iter: I) -> Self {
        let mut runs: Vec<(MediaKind, usize)> = Vec::new();
        for kind in iter {
            match runs.last_mut() {
                Some((last, count)) if *last == kind => *count += 1,
                _ => runs.push((kind, 1)),
            }
        }
        Self(runs)
    }
}

#[derive(Debug)]
struct FilterNodeData {
    id: NodeId,
    name: String,
    inputs: Vec<Stream>,
    params: Params,
    outputs: Pads,
    spec: Option<&'static FilterSpec>,
}

/// One filter invocation: name, ordered inputs and options.
///
/// Nodes are immutable once built. Clones share the same node.
#[derive(Debug, Clone)]
pub struct FilterNode(Arc<FilterNodeData>);

impl FilterNode {
    /// Builds a single-output node.
    ///
    /// The output takes the first input's kind; for sources it falls back to
    /// the registered filter's media type.
    pub fn new(inputs: Vec<Stream>, name: impl Into<String>, params: Params) -> Self {
        let name = name.into();
        let spec = registry::lookup(&name);
        let kind = inputs
            .first()
            .map(Stream::kind)
            .or(spec.map(|spec| spec.media))
            .unwrap_or(MediaKind::Any);
        Self::build(inputs, name, params, Pads::uniform(kind, 1), spec)
    }

    /// Builds a node with the given output pads.
    pub fn with_outputs(
        inputs: Vec<Stream>,
        name: impl Into<String>,
        params: Params,
        outputs: impl Into<Pads>,
    ) -> Self {
        let name = name.into();
        let spec = registry::lookup(&name);
        Self::build(inputs, name, params, outputs.into(), spec)
    }

    pub(crate) fn from_options<F: FilterOptions>(
        inputs: Vec<Stream>,
        options: F,
        outputs: impl Into<Pads>,
    ) -> Self {
        let spec = F::SPEC;
        Self::build(
            inputs,
            spec.name.to_string(),
            options.into_params(),
            outputs.into(),
            Some(spec),
        )
    }

    fn build(
        inputs: Vec<Stream>,
        name: String,
        params: Params,
        outputs: Pads,
        spec: Option<&'static FilterSpec>,
    ) -> Self {
        let id = NodeId::next();
        trace!(?id, %name, inputs = inputs.len(), outputs = outputs.len(), "Filter node created");
        Self(Arc::new(FilterNodeData {
            id,
            name,
            inputs,
            params,
            outputs,
            spec,
        }))
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn inputs(&self) -> &[Stream] {
        &self.0.inputs
    }

    pub fn params(&self) -> &Params {
        &self.0.params
    }

    /// Output pad layout.
    pub fn outputs(&self) -> &Pads {
        &self.0.outputs
    }

    /// Option schema of the filter, when the binding models it.
    pub fn spec(&self) -> Option<&'static FilterSpec> {
        self.0.spec
    }

    pub fn ptr_eq(&self, other: &FilterNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The primary output.
    pub fn stream(&self) -> Stream {
        let kind = self.0.outputs.kind(0).unwrap_or(MediaKind::Any);
        Stream::from_filter(self.clone(), 0, kind)
    }

    pub fn output(&self, index: usize) -> Option<Stream> {
        self.0
            .outputs
            .kind(index)
            .map(|kind| Stream::from_filter(self.clone(), index, kind))
    }

    pub fn audio(&self, index: usize) -> Option<AudioStream> {
        self.output(index).map(Stream::into_audio)
    }

    pub fn video(&self, index: usize) -> Option<VideoStream> {
        self.output(index).map(Stream::into_video)
    }

    /// Every output pad as a stream, in pad order. Streams are created as the
    /// iterator advances.
    pub fn streams(&self) -> impl Iterator<Item = Stream> + '_ {
        self.0
            .outputs
            .iter()
            .enumerate()
            .map(|(index, kind)| Stream::from_filter(self.clone(), index, kind))
    }
}

#[derive(Debug)]
struct SourceData {
    id: NodeId,
    filename: String,
    options: Params,
}

/// An input file of the graph together with its input options.
#[derive(Debug, Clone)]
pub struct Source(Arc<SourceData>);

/// Opens `filename` as a graph source.
pub fn input(filename: impl Into<String>) -> Source {
    Source::with_options(filename, Params::new())
}

impl Source {
    /// Input options are emitted before `-i`, e.g. `ss`, `t`, `f`.
    pub fn with_options(filename: impl Into<String>, options: Params) -> Self {
        let id = NodeId::next();
        let filename = filename.into();
        trace!(?id, %filename, "Source created");
        Self(Arc::new(SourceData {
            id,
            filename,
            options,
        }))
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    pub fn filename(&self) -> &str {
        &self.0.filename
    }

    pub fn options(&self) -> &Params {
        &self.0.options
    }

    /// All streams of the input.
    pub fn stream(&self) -> Stream {
        Stream::from_source(self.clone(), MediaKind::Any, None)
    }

    pub fn audio(&self) -> AudioStream {
        AudioStream(Stream::from_source(self.clone(), MediaKind::Audio, None))
    }

    pub fn video(&self) -> VideoStream {
        VideoStream(Stream::from_source(self.clone(), MediaKind::Video, None))
    }

    /// The `position`-th audio stream of the input.
    pub fn audio_at(&self, position: usize) -> AudioStream {
        AudioStream(Stream::from_source(
            self.clone(),
            MediaKind::Audio,
            Some(position),
        ))
    }

    pub fn video_at(&self, position: usize) -> VideoStream {
        VideoStream(Stream::from_source(
            self.clone(),
            MediaKind::Video,
            Some(position),
        ))
    }
}
