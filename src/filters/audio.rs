use super::{FilterOptions, output_count};
use crate::node::{FilterNode, Pads};
use crate::stream::{AudioStream, MediaKind, Stream};

option_enum! {
    /// Unit of the biquad `width` option.
    pub enum WidthType {
        Hz => "h",
        Q => "q",
        Octave => "o",
        Slope => "s",
        Khz => "k",
    }
}

option_enum! {
    /// Biquad transform type.
    pub enum Transform {
        Di => "di",
        Dii => "dii",
        Tdi => "tdi",
        Tdii => "tdii",
        Latt => "latt",
        Svf => "svf",
        Zdf => "zdf",
    }
}

option_enum! {
    /// Biquad processing precision.
    pub enum Precision {
        Auto => "auto",
        S16 => "s16",
        S32 => "s32",
        F32 => "f32",
        F64 => "f64",
    }
}

option_enum! {
    pub enum VolumePrecision {
        Fixed => "fixed",
        Float => "float",
        Double => "double",
    }
}

option_enum! {
    /// When the `volume` expression is evaluated.
    pub enum VolumeEval {
        Once => "once",
        Frame => "frame",
    }
}

option_enum! {
    pub enum ReplayGain {
        Drop => "drop",
        Ignore => "ignore",
        Track => "track",
        Album => "album",
    }
}

option_enum! {
    pub enum Resampler {
        Swr => "swr",
        Soxr => "soxr",
    }
}

option_enum! {
    /// Direction of a fade.
    pub enum FadeType {
        In => "in",
        Out => "out",
    }
}

option_enum! {
    /// Fade curve shape.
    pub enum Curve {
        Nofade => "nofade",
        Tri => "tri",
        Qsin => "qsin",
        Esin => "esin",
        Hsin => "hsin",
        Log => "log",
        Ipar => "ipar",
        Qua => "qua",
        Cub => "cub",
        Squ => "squ",
        Cbr => "cbr",
        Par => "par",
        Exp => "exp",
        Iqsin => "iqsin",
        Ihsin => "ihsin",
        Dese => "dese",
        Desi => "desi",
        Losi => "losi",
        Sinc => "sinc",
        Isinc => "isinc",
        Quat => "quat",
        Quatr => "quatr",
        Qsin2 => "qsin2",
        Hsin2 => "hsin2",
    }
}

option_enum! {
    pub enum CompressorMode {
        Downward => "downward",
        Upward => "upward",
    }
}

option_enum! {
    pub enum CompressorLink {
        Average => "average",
        Maximum => "maximum",
    }
}

option_enum! {
    pub enum CompressorDetection {
        Peak => "peak",
        Rms => "rms",
    }
}

option_enum! {
    /// How `amix` decides when to stop.
    pub enum MixDuration {
        Longest => "longest",
        Shortest => "shortest",
        First => "first",
    }
}

option_enum! {
    pub enum PrintFormat {
        None => "none",
        Json => "json",
        Summary => "summary",
    }
}

option_enum! {
    /// Which signal `arls` outputs.
    pub enum RlsOutMode {
        Input => "i",
        Desired => "d",
        Output => "o",
        Noise => "n",
        Error => "e",
    }
}

option_enum! {
    pub enum RlsPrecision {
        Auto => "auto",
        Float => "float",
        Double => "double",
    }
}

option_enum! {
    pub enum SilenceDetection {
        Avg => "avg",
        Rms => "rms",
        Peak => "peak",
        Median => "median",
        Ptp => "ptp",
        Dev => "dev",
    }
}

filter_options! {
    /// Options of [`AudioStream::highpass`].
    pub struct Highpass("highpass", Audio) {
        /// Frequency in Hz. Default is 3000.
        frequency: f64 [0, 999999],
        width_type: WidthType,
        /// Band-width in `width_type` units. Applies only to double-pole filter.
        width: f64 [0, 99999],
        /// Number of poles. Default is 2.
        poles: i64 [1, 2],
        mix: f64 [0, 1],
        /// Channels to filter, all by default.
        channels: String,
        normalize: bool,
        transform: Transform,
        precision: Precision,
        blocksize: i64 [0, 32768],
    }
}

filter_options! {
    /// Options of [`AudioStream::lowpass`].
    pub struct Lowpass("lowpass", Audio) {
        /// Frequency in Hz. Default is 500.
        frequency: f64 [0, 999999],
        width_type: WidthType,
        width: f64 [0, 99999],
        /// Number of poles. Default is 2.
        poles: i64 [1, 2],
        mix: f64 [0, 1],
        channels: String,
        normalize: bool,
        transform: Transform,
        precision: Precision,
        blocksize: i64 [0, 32768],
    }
}

filter_options! {
    /// Options of [`AudioStream::bandpass`].
    pub struct Bandpass("bandpass", Audio) {
        frequency: f64 [0, 999999],
        width_type: WidthType,
        width: f64 [0, 99999],
        /// Constant skirt gain instead of constant 0 dB peak gain.
        csg: bool,
        mix: f64 [0, 1],
        channels: String,
        normalize: bool,
        transform: Transform,
        precision: Precision,
        blocksize: i64 [0, 32768],
    }
}

filter_options! {
    /// Options of [`AudioStream::equalizer`].
    pub struct Equalizer("equalizer", Audio) {
        frequency: f64 [0, 999999],
        width_type: WidthType,
        width: f64 [0, 99999],
        /// Gain in dB.
        gain: f64 [-900, 900],
        mix: f64 [0, 1],
        channels: String,
        normalize: bool,
        transform: Transform,
        precision: Precision,
        blocksize: i64 [0, 32768],
    }
}

filter_options! {
    /// Options of [`AudioStream::volume`].
    pub struct Volume("volume", Audio) {
        /// Volume expression. Default is "1.0".
        volume: String,
        precision: VolumePrecision,
        eval: VolumeEval,
        replaygain: ReplayGain,
        replaygain_preamp: f64 [-15, 15],
        replaygain_noclip: bool,
    }
}

filter_options! {
    /// Options of [`AudioStream::aresample`].
    pub struct Aresample("aresample", Audio) {
        out_sample_rate: i64 [0, 2147483647],
        out_sample_fmt: String,
        out_chlayout: String,
        resampler: Resampler,
        /// Stretch, squeeze, fill and trim to match timestamps.
        sync as "async": f64,
        min_hard_comp: f64 [0, 2147483647],
        first_pts: i64,
    }
}

filter_options! {
    /// Options of [`AudioStream::atempo`].
    pub struct Atempo("atempo", Audio) {
        tempo: f64 [0.5, 100],
    }
}

filter_options! {
    /// Options of [`AudioStream::afade`].
    pub struct Afade("afade", Audio) {
        fade_type as "type": FadeType,
        start_sample: i64 [0, 9223372036854775807i64],
        nb_samples: i64 [1, 9223372036854775807i64],
        start_time: String,
        duration: String,
        curve: Curve,
        silence: f64 [0, 1],
        unity: f64 [0, 1],
    }
}

filter_options! {
    /// Options of [`AudioStream::adelay`].
    pub struct Adelay("adelay", Audio)(
        /// Per-channel delays separated by `|`, in milliseconds unless suffixed.
        delays: String,
    ) {
        /// Pad every remaining channel with the last delay.
        all: bool,
    }
}

filter_options! {
    /// Options of [`AudioStream::aecho`].
    pub struct Aecho("aecho", Audio) {
        in_gain: f64 [0, 1],
        out_gain: f64 [0, 1],
        delays: String,
        decays: String,
    }
}

filter_options! {
    /// Options of [`AudioStream::acompressor`].
    pub struct Acompressor("acompressor", Audio) {
        level_in: f64 [0.015625, 64],
        mode: CompressorMode,
        threshold: f64 [0.000976563, 1],
        ratio: f64 [1, 20],
        attack: f64 [0.01, 2000],
        release: f64 [0.01, 9000],
        makeup: f64 [1, 64],
        knee: f64 [1, 8],
        link: CompressorLink,
        detection: CompressorDetection,
        level_sc: f64 [0.015625, 64],
        mix: f64 [0, 1],
    }
}

filter_options! {
    /// Options of [`AudioStream::sidechaincompress`].
    pub struct Sidechaincompress("sidechaincompress", Audio) {
        level_in: f64 [0.015625, 64],
        mode: CompressorMode,
        threshold: f64 [0.000976563, 1],
        ratio: f64 [1, 20],
        attack: f64 [0.01, 2000],
        release: f64 [0.01, 9000],
        makeup: f64 [1, 64],
        knee: f64 [1, 8],
        link: CompressorLink,
        detection: CompressorDetection,
        level_sc: f64 [0.015625, 64],
        mix: f64 [0, 1],
    }
}

filter_options! {
    /// Options of [`AudioStream::amix`].
    pub struct Amix("amix", Audio) {
        /// Number of inputs. Filled from the stream count when unset.
        inputs: i64 [1, 32767],
        duration: MixDuration,
        dropout_transition: f64 [0, 2147483647],
        weights: String,
        normalize: bool,
    }
}

filter_options! {
    /// Options of [`AudioStream::asplit`].
    pub struct Asplit("asplit", Audio) {
        outputs: i64 [1, 2147483647],
    }
}

filter_options! {
    /// Options of [`AudioStream::loudnorm`], EBU R128 loudness normalization.
    pub struct Loudnorm("loudnorm", Audio) {
        /// Integrated loudness target.
        integrated as "I": f64 [-70, -5],
        /// Loudness range target.
        loudness_range as "LRA": f64 [1, 50],
        /// Maximum true peak.
        true_peak as "TP": f64 [-9, 0],
        measured_i as "measured_I": f64 [-99, 0],
        measured_lra as "measured_LRA": f64 [0, 99],
        measured_tp as "measured_TP": f64 [-99, 99],
        measured_thresh: f64 [-99, 0],
        offset: f64 [-99, 99],
        linear: bool,
        dual_mono: bool,
        print_format: PrintFormat,
    }
}

filter_options! {
    /// Options of [`AudioStream::arls`], recursive least squares adaptive filter.
    pub struct Arls("arls", Audio) {
        order: i64 [1, 32767],
        lambda: f64 [0, 1],
        delta: f64 [0, 32767],
        out_mode: RlsOutMode,
        precision: RlsPrecision,
    }
}

filter_options! {
    /// Options of [`AudioStream::apad`].
    pub struct Apad("apad", Audio) {
        packet_size: i64 [0, 2147483647],
        pad_len: i64 [-1, 9223372036854775807i64],
        whole_len: i64 [-1, 9223372036854775807i64],
        pad_dur: String,
        whole_dur: String,
    }
}

filter_options! {
    /// Options of [`AudioStream::atrim`].
    pub struct Atrim("atrim", Audio) {
        start: String,
        end: String,
        start_pts: i64,
        end_pts: i64,
        duration: String,
        start_sample: i64 [-1, 9223372036854775807i64],
        end_sample: i64 [0, 9223372036854775807i64],
    }
}

filter_options! {
    /// Options of [`AudioStream::asetpts`].
    pub struct Asetpts("asetpts", Audio) {
        /// Presentation timestamp expression. Default is "PTS".
        expr: String,
    }
}

filter_options! {
    /// Options of [`AudioStream::dynaudnorm`].
    pub struct Dynaudnorm("dynaudnorm", Audio) {
        framelen: i64 [10, 8000],
        gausssize: i64 [3, 301],
        peak: f64 [0, 1],
        maxgain: f64 [1, 100],
        targetrms: f64 [0, 1],
        coupling: bool,
        correctdc: bool,
        altboundary: bool,
        compress: f64 [0, 30],
        threshold: f64 [0, 1],
    }
}

filter_options! {
    /// Options of [`AudioStream::aformat`].
    pub struct Aformat("aformat", Audio) {
        sample_fmts: Vec<String>,
        sample_rates: Vec<String>,
        channel_layouts: Vec<String>,
    }
}

filter_options! {
    /// Options of [`AudioStream::pan`].
    pub struct Pan("pan", Audio)(
        /// Output layout and channel gains, e.g. `stereo|c0=FL|c1=FR`.
        args: String,
    ) {}
}

filter_options! {
    /// Options of [`AudioStream::silenceremove`].
    pub struct Silenceremove("silenceremove", Audio) {
        start_periods: i64 [0, 9000],
        start_duration: String,
        start_threshold: f64 [0, 1.7976931348623157e308],
        stop_periods: i64 [-9000, 9000],
        stop_duration: String,
        stop_threshold: f64 [0, 1.7976931348623157e308],
        detection: SilenceDetection,
        window: String,
    }
}

filter_options! {
    /// Options of [`AudioStream::anull`].
    pub struct Anull("anull", Audio) {}
}

impl AudioStream {
    pub(crate) fn apply<F: FilterOptions>(&self, options: F) -> AudioStream {
        self.apply_with(Vec::new(), options)
    }

    fn apply_with<F: FilterOptions>(&self, others: Vec<Stream>, options: F) -> AudioStream {
        let mut inputs = Vec::with_capacity(others.len() + 1);
        inputs.push(self.0.clone());
        inputs.extend(others);
        AudioStream(FilterNode::from_options(inputs, options, vec![MediaKind::Audio]).stream())
    }

    /// Apply a high-pass filter with 3dB point frequency.
    pub fn highpass(&self, options: Highpass) -> AudioStream {
        self.apply(options)
    }

    /// Apply a low-pass filter with 3dB point frequency.
    pub fn lowpass(&self, options: Lowpass) -> AudioStream {
        self.apply(options)
    }

    /// Apply a two-pole Butterworth band-pass filter.
    pub fn bandpass(&self, options: Bandpass) -> AudioStream {
        self.apply(options)
    }

    /// Apply a two-pole peaking equalisation (EQ) filter.
    pub fn equalizer(&self, options: Equalizer) -> AudioStream {
        self.apply(options)
    }

    /// Change input volume.
    pub fn volume(&self, options: Volume) -> AudioStream {
        self.apply(options)
    }

    /// Resample audio data.
    pub fn aresample(&self, options: Aresample) -> AudioStream {
        self.apply(options)
    }

    /// Adjust audio tempo.
    pub fn atempo(&self, options: Atempo) -> AudioStream {
        self.apply(options)
    }

    /// Fade in/out input audio.
    pub fn afade(&self, options: Afade) -> AudioStream {
        self.apply(options)
    }

    /// Delay one or more audio channels.
    pub fn adelay(&self, options: Adelay) -> AudioStream {
        self.apply(options)
    }

    /// Add echoing to the audio.
    pub fn aecho(&self, options: Aecho) -> AudioStream {
        self.apply(options)
    }

    /// Audio compressor.
    pub fn acompressor(&self, options: Acompressor) -> AudioStream {
        self.apply(options)
    }

    /// Sidechain compressor: this stream is compressed, `sidechain` drives the gain reduction.
    pub fn sidechaincompress(
        &self,
        sidechain: &AudioStream,
        options: Sidechaincompress,
    ) -> AudioStream {
        self.apply_with(vec![sidechain.into()], options)
    }

    /// Audio mixing. `others` follow this stream as inputs, in order.
    pub fn amix(&self, others: &[AudioStream], mut options: Amix) -> AudioStream {
        if options.inputs.is_none() {
            options.inputs = Some(others.len() as i64 + 1);
        }
        self.apply_with(others.iter().map(Stream::from).collect(), options)
    }

    /// Pass on the audio input to N audio outputs. Defaults to two outputs.
    pub fn asplit(&self, options: Asplit) -> FilterNode {
        let outputs = output_count(options.outputs);
        FilterNode::from_options(
            vec![self.0.clone()],
            options,
            Pads::uniform(MediaKind::Audio, outputs),
        )
    }

    /// EBU R128 loudness normalization.
    pub fn loudnorm(&self, options: Loudnorm) -> AudioStream {
        self.apply(options)
    }

    /// Apply Recursive Least Squares algorithm to this stream against `desired`.
    pub fn arls(&self, desired: &AudioStream, options: Arls) -> AudioStream {
        self.apply_with(vec![desired.into()], options)
    }

    /// Pad audio with silence.
    pub fn apad(&self, options: Apad) -> AudioStream {
        self.apply(options)
    }

    /// Pick one continuous section from the input, drop the rest.
    pub fn atrim(&self, options: Atrim) -> AudioStream {
        self.apply(options)
    }

    /// Set PTS for the output audio frame.
    pub fn asetpts(&self, options: Asetpts) -> AudioStream {
        self.apply(options)
    }

    /// Dynamic Audio Normalizer.
    pub fn dynaudnorm(&self, options: Dynaudnorm) -> AudioStream {
        self.apply(options)
    }

    /// Convert the input audio to one of the specified formats.
    pub fn aformat(&self, options: Aformat) -> AudioStream {
        self.apply(options)
    }

    /// Remix channels with coefficients (panning).
    pub fn pan(&self, options: Pan) -> AudioStream {
        self.apply(options)
    }

    /// Remove silence.
    pub fn silenceremove(&self, options: Silenceremove) -> AudioStream {
        self.apply(options)
    }

    /// Pass the source unchanged to the output.
    pub fn anull(&self) -> AudioStream {
        self.apply(Anull::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::input;
    use crate::value::Value;

    #[test]
    fn test_highpass_then_lowpass_builds_two_nodes() {
        let root = input("in.wav").audio();
        let out = root
            .highpass(Highpass::new().frequency(3000).poles(2))
            .lowpass(Lowpass::new().frequency(500).poles(2));

        let lowpass = out.node().unwrap();
        assert_eq!(lowpass.name(), "lowpass");
        assert_eq!(lowpass.params().get("frequency"), Some(&Value::Float(500.0)));
        assert_eq!(lowpass.params().get("poles"), Some(&Value::Int(2)));
        assert_eq!(lowpass.inputs().len(), 1);

        let highpass = lowpass.inputs()[0].node().unwrap();
        assert_eq!(highpass.name(), "highpass");
        assert_eq!(highpass.params().get("frequency"), Some(&Value::Float(3000.0)));
        assert_eq!(highpass.params().get("poles"), Some(&Value::Int(2)));
        assert_eq!(highpass.inputs().len(), 1);
        assert!(highpass.inputs()[0].same_as(&root));
        assert!(lowpass.inputs()[0].same_as(&highpass.stream()));
    }

    #[test]
    fn test_optional_options_are_declared_unset() {
        let out = input("in.wav").audio().highpass(Highpass::new());
        let params = out.node().unwrap().params();

        assert_eq!(params.len(), Highpass::SPEC.options.len());
        assert!(params.contains_key("width_type"));
        assert_eq!(params.iter_set().count(), 0);
    }

    #[test]
    fn test_required_option_and_passthrough() {
        let out = input("in.wav")
            .audio()
            .adelay(Adelay::new("1500|0").extra("enable", "gte(t,1)"));
        let params = out.node().unwrap().params();

        assert_eq!(params.get("delays"), Some(&Value::from("1500|0")));
        assert!(!params.is_set("all"));
        assert_eq!(params.get("enable"), Some(&Value::from("gte(t,1)")));
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec!["delays", "all", "enable"]
        );
    }

    #[test]
    fn test_sidechain_is_second_input() {
        let source = input("in.mkv");
        let music = source.audio_at(0);
        let voice = source.audio_at(1);
        let ducked = music.sidechaincompress(&voice, Sidechaincompress::new().threshold(0.1));

        let node = ducked.node().unwrap();
        assert_eq!(node.inputs().len(), 2);
        assert!(node.inputs()[0].same_as(&music));
        assert!(node.inputs()[1].same_as(&voice));
    }

    #[test]
    fn test_amix_counts_inputs() {
        let a = input("a.wav").audio();
        let b = input("b.wav").audio();
        let c = input("c.wav").audio();
        let mixed = a.amix(&[b.clone(), c.clone()], Amix::new().duration(MixDuration::Longest));

        let node = mixed.node().unwrap();
        assert_eq!(node.inputs().len(), 3);
        assert!(node.inputs()[2].same_as(&c));
        assert_eq!(node.params().get("inputs"), Some(&Value::Int(3)));
        assert_eq!(node.params().get("duration"), Some(&Value::from("longest")));
    }

    #[test]
    fn test_renamed_options_use_wire_keys() {
        let out = input("in.wav").audio().afade(
            Afade::new()
                .fade_type(FadeType::Out)
                .curve(Curve::Qsin),
        );
        let params = out.node().unwrap().params();
        assert_eq!(params.get("type"), Some(&Value::from("out")));
        assert!(!params.contains_key("fade_type"));

        let out = input("in.wav").audio().loudnorm(Loudnorm::new().integrated(-16).true_peak(-1.5));
        let params = out.node().unwrap().params();
        assert_eq!(params.get("I"), Some(&Value::Float(-16.0)));
        assert_eq!(params.get("TP"), Some(&Value::Float(-1.5)));
        assert!(!params.contains_key("integrated"));

        let out = input("in.wav").audio().aresample(Aresample::new().sync(1));
        assert!(out.node().unwrap().params().is_set("async"));
        assert_eq!(Aresample::SPEC.wire_key("sync"), Some("async"));
    }

    #[test]
    fn test_arls_lambda_and_desired_input() {
        let source = input("in.wav");
        let desired = source.audio_at(1);
        let out = source.audio_at(0).arls(&desired, Arls::new().lambda(0.99).order(16));

        let node = out.node().unwrap();
        assert_eq!(node.params().get("lambda"), Some(&Value::Float(0.99)));
        assert_eq!(node.inputs().len(), 2);
    }

    #[test]
    fn test_asplit_outputs() {
        let node = input("in.wav").audio().asplit(Asplit::new().outputs(3));
        assert_eq!(node.outputs(), &Pads::uniform(MediaKind::Audio, 3));
        assert_eq!(node.audio(2).unwrap().index(), 2);

        let node = input("in.wav").audio().asplit(Asplit::new());
        assert_eq!(node.outputs().len(), 2);

        let node = input("in.wav").audio().asplit(Asplit::new().outputs(2147483647));
        assert_eq!(node.outputs().len(), 2147483647);
        assert_eq!(node.audio(2147483646).unwrap().index(), 2147483646);
    }

    #[test]
    fn test_enum_tokens() {
        assert_eq!("q".parse::<WidthType>().unwrap(), WidthType::Q);
        assert!("x".parse::<WidthType>().is_err());
        assert_eq!(RlsOutMode::Noise.to_string(), "n");
        assert_eq!(Curve::ALL.len(), 24);
    }
}
