//! Source filters, which have no inputs, and `concat`, which takes segments.

use super::FilterOptions;
use crate::node::{FilterNode, Pads};
use crate::stream::{AudioStream, MediaKind, Stream, VideoStream};

filter_options! {
    /// Options of [`color`].
    pub struct Color("color", Video) {
        color as "c": String,
        size as "s": String,
        rate as "r": String,
        duration as "d": String,
        sar: String,
    }
}

filter_options! {
    /// Options of [`testsrc`].
    pub struct Testsrc("testsrc", Video) {
        size as "s": String,
        rate as "r": String,
        duration as "d": String,
        sar: String,
        decimals as "n": i64 [0, 17],
    }
}

filter_options! {
    /// Options of [`sine`].
    pub struct Sine("sine", Audio) {
        frequency as "f": f64 [0, 1.7976931348623157e308],
        beep_factor as "b": f64 [0, 1.7976931348623157e308],
        sample_rate as "r": i64 [1, 2147483647],
        duration as "d": String,
        samples_per_frame: String,
    }
}

filter_options! {
    /// Options of [`anullsrc`].
    pub struct Anullsrc("anullsrc", Audio) {
        channel_layout as "cl": String,
        sample_rate as "r": i64 [1, 2147483647],
        nb_samples as "n": i64 [1, 65535],
        duration as "d": String,
    }
}

filter_options! {
    /// Options of [`concat`]. `n`, `v` and `a` are derived from the segments when unset.
    pub struct Concat("concat", Any) {
        /// Number of segments.
        n: i64 [1, 2147483647],
        /// Number of video streams per segment.
        v: i64 [0, 2147483647],
        /// Number of audio streams per segment.
        a: i64 [0, 2147483647],
        unsafe_mode as "unsafe": bool,
    }
}

/// Provide an uniformly colored input.
pub fn color(options: Color) -> VideoStream {
    VideoStream(FilterNode::from_options(Vec::new(), options, vec![MediaKind::Video]).stream())
}

/// Generate test video pattern.
pub fn testsrc(options: Testsrc) -> VideoStream {
    VideoStream(FilterNode::from_options(Vec::new(), options, vec![MediaKind::Video]).stream())
}

/// Generate sine wave audio signal.
pub fn sine(options: Sine) -> AudioStream {
    AudioStream(FilterNode::from_options(Vec::new(), options, vec![MediaKind::Audio]).stream())
}

/// Null audio source, return empty audio frames.
pub fn anullsrc(options: Anullsrc) -> AudioStream {
    AudioStream(FilterNode::from_options(Vec::new(), options, vec![MediaKind::Audio]).stream())
}

/// Concatenate audio and video segments.
///
/// Every segment must carry the same streams. Within a segment the streams
/// are reordered video first, as the filter expects; outputs follow the same
/// order, so `video(0)` is the joined video and `audio(v)` the first audio.
pub fn concat(segments: &[Vec<Stream>], mut options: Concat) -> FilterNode {
    let layout: Vec<MediaKind> = segments
        .first()
        .map(|segment| ordered(segment).map(Stream::kind).collect())
        .unwrap_or_default();
    let videos = layout.iter().filter(|kind| **kind != MediaKind::Audio).count();
    let audios = layout.len() - videos;

    if options.n.is_none() {
        options.n = Some(segments.len() as i64);
    }
    if options.v.is_none() {
        options.v = Some(videos as i64);
    }
    if options.a.is_none() {
        options.a = Some(audios as i64);
    }

    let inputs = segments
        .iter()
        .flat_map(|segment| ordered(segment).cloned())
        .collect();
    let outputs = Pads::uniform(MediaKind::Video, videos).with(MediaKind::Audio, audios);
    FilterNode::from_options(inputs, options, outputs)
}

fn ordered(segment: &[Stream]) -> impl Iterator<Item = &Stream> {
    let videos = segment.iter().filter(|stream| stream.kind() != MediaKind::Audio);
    let audios = segment.iter().filter(|stream| stream.kind() == MediaKind::Audio);
    videos.chain(audios)
}
