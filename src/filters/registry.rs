//! Static lookup of the modelled filters by wire name.

use super::{FilterOptions, FilterSpec};
use super::{audio::*, sources::*, video::*};

static FILTERS: &[&FilterSpec] = &[
    // audio
    Highpass::SPEC,
    Lowpass::SPEC,
    Bandpass::SPEC,
    Equalizer::SPEC,
    Volume::SPEC,
    Aresample::SPEC,
    Atempo::SPEC,
    Afade::SPEC,
    Adelay::SPEC,
    Aecho::SPEC,
    Acompressor::SPEC,
    Sidechaincompress::SPEC,
    Amix::SPEC,
    Asplit::SPEC,
    Loudnorm::SPEC,
    Arls::SPEC,
    Apad::SPEC,
    Atrim::SPEC,
    Asetpts::SPEC,
    Dynaudnorm::SPEC,
    Aformat::SPEC,
    Pan::SPEC,
    Silenceremove::SPEC,
    Anull::SPEC,
    // video
    Scale::SPEC,
    Crop::SPEC,
    Pad::SPEC,
    Fps::SPEC,
    Setpts::SPEC,
    Trim::SPEC,
    Overlay::SPEC,
    Hflip::SPEC,
    Vflip::SPEC,
    Transpose::SPEC,
    Rotate::SPEC,
    Format::SPEC,
    Drawtext::SPEC,
    EqFilter::SPEC,
    Hqdn3d::SPEC,
    Atadenoise::SPEC,
    Split::SPEC,
    Hstack::SPEC,
    Vstack::SPEC,
    Xfade::SPEC,
    Fade::SPEC,
    Unsharp::SPEC,
    Boxblur::SPEC,
    Gblur::SPEC,
    Setsar::SPEC,
    Yadif::SPEC,
    Null::SPEC,
    Subtitles::SPEC,
    // sources and generic
    Color::SPEC,
    Testsrc::SPEC,
    Sine::SPEC,
    Anullsrc::SPEC,
    Concat::SPEC,
];

/// Filters taking one input pad per unit of their `inputs` option.
static COUNTED_INPUTS: &[&str] = &["amix", "hstack", "vstack"];

/// Filters producing one output pad per unit of their `outputs` option.
static COUNTED_OUTPUTS: &[&str] = &["split", "asplit"];

pub fn lookup(name: &str) -> Option<&'static FilterSpec> {
    FILTERS.iter().copied().find(|spec| spec.name == name)
}

/// Whether the `inputs` option of `name` must match its input pad count.
pub fn counts_inputs(name: &str) -> bool {
    COUNTED_INPUTS.contains(&name)
}

/// Whether the `outputs` option of `name` sets its output pad count.
pub fn counts_outputs(name: &str) -> bool {
    COUNTED_OUTPUTS.contains(&name)
}

/// Every modelled filter, audio first.
pub fn all() -> &'static [&'static FilterSpec] {
    FILTERS
}
