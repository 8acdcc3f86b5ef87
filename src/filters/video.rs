use super::audio::FadeType;
use super::{FilterOptions, output_count};
use crate::node::{FilterNode, Pads};
use crate::stream::{MediaKind, Stream, VideoStream};

option_enum! {
    /// When size and position expressions are evaluated.
    pub enum EvalMode {
        Init => "init",
        Frame => "frame",
    }
}

option_enum! {
    pub enum ForceAspectRatio {
        Disable => "disable",
        Decrease => "decrease",
        Increase => "increase",
    }
}

option_enum! {
    /// Timestamp rounding of `fps`.
    pub enum Rounding {
        Zero => "zero",
        Inf => "inf",
        Down => "down",
        Up => "up",
        Near => "near",
    }
}

option_enum! {
    pub enum FpsEofAction {
        Round => "round",
        Pass => "pass",
    }
}

option_enum! {
    /// What `overlay` does when the secondary input ends.
    pub enum OverlayEofAction {
        Repeat => "repeat",
        EndAll => "endall",
        Pass => "pass",
    }
}

option_enum! {
    pub enum OverlayFormat {
        Yuv420 => "yuv420",
        Yuv420p10 => "yuv420p10",
        Yuv422 => "yuv422",
        Yuv422p10 => "yuv422p10",
        Yuv444 => "yuv444",
        Yuv444p10 => "yuv444p10",
        Rgb => "rgb",
        Gbrp => "gbrp",
        Auto => "auto",
    }
}

option_enum! {
    pub enum AlphaMode {
        Straight => "straight",
        Premultiplied => "premultiplied",
    }
}

option_enum! {
    pub enum TransposeDir {
        CclockFlip => "cclock_flip",
        Clock => "clock",
        Cclock => "cclock",
        ClockFlip => "clock_flip",
    }
}

option_enum! {
    pub enum TransposePassthrough {
        None => "none",
        Portrait => "portrait",
        Landscape => "landscape",
    }
}

option_enum! {
    /// `atadenoise` averaging algorithm: parallel or serial.
    pub enum AtaAlgorithm {
        Parallel => "p",
        Serial => "s",
    }
}

option_enum! {
    pub enum XfadeTransition {
        Custom => "custom",
        Fade => "fade",
        WipeLeft => "wipeleft",
        WipeRight => "wiperight",
        WipeUp => "wipeup",
        WipeDown => "wipedown",
        SlideLeft => "slideleft",
        SlideRight => "slideright",
        SlideUp => "slideup",
        SlideDown => "slidedown",
        CircleCrop => "circlecrop",
        RectCrop => "rectcrop",
        Distance => "distance",
        FadeBlack => "fadeblack",
        FadeWhite => "fadewhite",
        Radial => "radial",
        SmoothLeft => "smoothleft",
        SmoothRight => "smoothright",
        SmoothUp => "smoothup",
        SmoothDown => "smoothdown",
        CircleOpen => "circleopen",
        CircleClose => "circleclose",
        VertOpen => "vertopen",
        VertClose => "vertclose",
        HorzOpen => "horzopen",
        HorzClose => "horzclose",
        Dissolve => "dissolve",
        Pixelize => "pixelize",
        DiagTl => "diagtl",
        DiagTr => "diagtr",
        DiagBl => "diagbl",
        DiagBr => "diagbr",
        HlSlice => "hlslice",
        HrSlice => "hrslice",
        VuSlice => "vuslice",
        VdSlice => "vdslice",
        HBlur => "hblur",
        FadeGrays => "fadegrays",
        WipeTl => "wipetl",
        WipeTr => "wipetr",
        WipeBl => "wipebl",
        WipeBr => "wipebr",
        SqueezeH => "squeezeh",
        SqueezeV => "squeezev",
        ZoomIn => "zoomin",
        FadeFast => "fadefast",
        FadeSlow => "fadeslow",
    }
}

option_enum! {
    pub enum YadifMode {
        SendFrame => "send_frame",
        SendField => "send_field",
        SendFrameNospatial => "send_frame_nospatial",
        SendFieldNospatial => "send_field_nospatial",
    }
}

option_enum! {
    pub enum YadifParity {
        Tff => "tff",
        Bff => "bff",
        Auto => "auto",
    }
}

option_enum! {
    pub enum YadifDeint {
        All => "all",
        Interlaced => "interlaced",
    }
}

filter_options! {
    /// Options of [`VideoStream::scale`].
    pub struct Scale("scale", Video) {
        /// Output width expression.
        width as "w": String,
        /// Output height expression.
        height as "h": String,
        /// Scaler flags, e.g. `bicubic`.
        flags: String,
        interl: i64 [-1, 1],
        in_color_matrix: String,
        out_color_matrix: String,
        in_range: String,
        out_range: String,
        force_original_aspect_ratio: ForceAspectRatio,
        force_divisible_by: i64 [1, 256],
        eval: EvalMode,
    }
}

filter_options! {
    /// Options of [`VideoStream::crop`].
    pub struct Crop("crop", Video) {
        out_w as "w": String,
        out_h as "h": String,
        x: String,
        y: String,
        keep_aspect: bool,
        exact: bool,
    }
}

filter_options! {
    /// Options of [`VideoStream::pad`].
    pub struct Pad("pad", Video) {
        width as "w": String,
        height as "h": String,
        x: String,
        y: String,
        color: String,
        eval: EvalMode,
        aspect: String,
    }
}

filter_options! {
    /// Options of [`VideoStream::fps`].
    pub struct Fps("fps", Video) {
        /// Output frame rate. Default is 25.
        fps: String,
        start_time: f64,
        round: Rounding,
        eof_action: FpsEofAction,
    }
}

filter_options! {
    /// Options of [`VideoStream::setpts`].
    pub struct Setpts("setpts", Video) {
        /// Presentation timestamp expression. Default is "PTS".
        expr: String,
    }
}

filter_options! {
    /// Options of [`VideoStream::trim`].
    pub struct Trim("trim", Video) {
        start: String,
        end: String,
        start_pts: i64,
        end_pts: i64,
        duration: String,
        start_frame: i64 [-1, 9223372036854775807i64],
        end_frame: i64 [0, 9223372036854775807i64],
    }
}

filter_options! {
    /// Options of [`VideoStream::overlay`].
    pub struct Overlay("overlay", Video) {
        x: String,
        y: String,
        eof_action: OverlayEofAction,
        eval: EvalMode,
        shortest: bool,
        format: OverlayFormat,
        repeatlast: bool,
        alpha: AlphaMode,
    }
}

filter_options! {
    /// Options of [`VideoStream::hflip`].
    pub struct Hflip("hflip", Video) {}
}

filter_options! {
    /// Options of [`VideoStream::vflip`].
    pub struct Vflip("vflip", Video) {}
}

filter_options! {
    /// Options of [`VideoStream::transpose`].
    pub struct Transpose("transpose", Video) {
        dir: TransposeDir,
        passthrough: TransposePassthrough,
    }
}

filter_options! {
    /// Options of [`VideoStream::rotate`].
    pub struct Rotate("rotate", Video) {
        /// Angle expression in radians.
        angle: String,
        out_w as "ow": String,
        out_h as "oh": String,
        fillcolor: String,
        bilinear: bool,
    }
}

filter_options! {
    /// Options of [`VideoStream::format`].
    pub struct Format("format", Video) {
        /// Accepted pixel formats, in order of preference.
        pix_fmts: Vec<String>,
    }
}

filter_options! {
    /// Options of [`VideoStream::drawtext`].
    pub struct Drawtext("drawtext", Video) {
        text: String,
        textfile: String,
        fontfile: String,
        font: String,
        fontsize: String,
        fontcolor: String,
        x: String,
        y: String,
        /// Draw a box around the text.
        draw_box as "box": bool,
        boxcolor: String,
        boxborderw: String,
        borderw: i64 [0, 2147483647],
        bordercolor: String,
        shadowx: i64,
        shadowy: i64,
        line_spacing: i64,
    }
}

filter_options! {
    /// Options of [`VideoStream::eq`].
    pub struct EqFilter("eq", Video) {
        contrast: f64 [-1000, 1000],
        brightness: f64 [-1, 1],
        saturation: f64 [0, 3],
        gamma: f64 [0.1, 10],
        gamma_r: f64 [0.1, 10],
        gamma_g: f64 [0.1, 10],
        gamma_b: f64 [0.1, 10],
        gamma_weight: f64 [0, 1],
        eval: EvalMode,
    }
}

filter_options! {
    /// Options of [`VideoStream::hqdn3d`].
    pub struct Hqdn3d("hqdn3d", Video) {
        luma_spatial: f64 [0, 1.7976931348623157e308],
        chroma_spatial: f64 [0, 1.7976931348623157e308],
        luma_tmp: f64 [0, 1.7976931348623157e308],
        chroma_tmp: f64 [0, 1.7976931348623157e308],
    }
}

filter_options! {
    /// Options of [`VideoStream::atadenoise`], adaptive temporal averaging.
    pub struct Atadenoise("atadenoise", Video) {
        /// Threshold A for the first plane.
        a0 as "0a": f64 [0, 0.3],
        /// Threshold B for the first plane.
        b0 as "0b": f64 [0, 5],
        a1 as "1a": f64 [0, 0.3],
        b1 as "1b": f64 [0, 5],
        a2 as "2a": f64 [0, 0.3],
        b2 as "2b": f64 [0, 5],
        /// Number of frames to average, odd.
        size as "s": i64 [5, 129],
        planes as "p": i64 [0, 15],
        algorithm as "a": AtaAlgorithm,
        sigma0 as "0s": f64 [0, 32767],
        sigma1 as "1s": f64 [0, 32767],
        sigma2 as "2s": f64 [0, 32767],
    }
}

filter_options! {
    /// Options of [`VideoStream::split`].
    pub struct Split("split", Video) {
        outputs: i64 [1, 2147483647],
    }
}

filter_options! {
    /// Options of [`VideoStream::hstack`].
    pub struct Hstack("hstack", Video) {
        /// Number of inputs. Filled from the stream count when unset.
        inputs: i64 [2, 2147483647],
        shortest: bool,
    }
}

filter_options! {
    /// Options of [`VideoStream::vstack`].
    pub struct Vstack("vstack", Video) {
        inputs: i64 [2, 2147483647],
        shortest: bool,
    }
}

filter_options! {
    /// Options of [`VideoStream::xfade`].
    pub struct Xfade("xfade", Video) {
        transition: XfadeTransition,
        /// Cross fade duration in seconds.
        duration: f64 [0, 60],
        /// Offset of the cross fade relative to the first input, in seconds.
        offset: f64,
        /// Custom transition expression.
        expr: String,
    }
}

filter_options! {
    /// Options of [`VideoStream::fade`].
    pub struct Fade("fade", Video) {
        fade_type as "type": FadeType,
        start_frame: i64 [0, 2147483647],
        nb_frames: i64 [1, 2147483647],
        alpha: bool,
        start_time: String,
        duration: String,
        color: String,
    }
}

filter_options! {
    /// Options of [`VideoStream::unsharp`].
    pub struct Unsharp("unsharp", Video) {
        luma_msize_x: i64 [3, 23],
        luma_msize_y: i64 [3, 23],
        luma_amount: f64 [-2, 5],
        chroma_msize_x: i64 [3, 23],
        chroma_msize_y: i64 [3, 23],
        chroma_amount: f64 [-2, 5],
    }
}

filter_options! {
    /// Options of [`VideoStream::boxblur`].
    pub struct Boxblur("boxblur", Video) {
        luma_radius: String,
        luma_power: i64 [0, 2147483647],
        chroma_radius: String,
        chroma_power: i64 [-1, 2147483647],
        alpha_radius: String,
        alpha_power: i64 [-1, 2147483647],
    }
}

filter_options! {
    /// Options of [`VideoStream::gblur`].
    pub struct Gblur("gblur", Video) {
        sigma: f64 [0, 1024],
        steps: i64 [1, 6],
        planes: i64 [0, 15],
        sigma_v as "sigmaV": f64 [-1, 1024],
    }
}

filter_options! {
    /// Options of [`VideoStream::setsar`].
    pub struct Setsar("setsar", Video) {
        ratio as "r": String,
        max: i64 [1, 2147483647],
    }
}

filter_options! {
    /// Options of [`VideoStream::yadif`].
    pub struct Yadif("yadif", Video) {
        mode: YadifMode,
        parity: YadifParity,
        deint: YadifDeint,
    }
}

filter_options! {
    /// Options of [`VideoStream::null`].
    pub struct Null("null", Video) {}
}

filter_options! {
    /// Options of [`VideoStream::subtitles`].
    pub struct Subtitles("subtitles", Video)(
        /// Subtitle file to render.
        filename: String,
    ) {
        original_size: String,
        fontsdir: String,
        alpha: bool,
        charenc: String,
        stream_index as "si": i64,
        force_style: String,
        wrap_unicode: bool,
    }
}

impl VideoStream {
    pub(crate) fn apply<F: FilterOptions>(&self, options: F) -> VideoStream {
        self.apply_with(Vec::new(), options)
    }

    fn apply_with<F: FilterOptions>(&self, others: Vec<Stream>, options: F) -> VideoStream {
        let mut inputs = Vec::with_capacity(others.len() + 1);
        inputs.push(self.0.clone());
        inputs.extend(others);
        VideoStream(FilterNode::from_options(inputs, options, vec![MediaKind::Video]).stream())
    }

    /// Scale the input video size and/or convert the image format.
    pub fn scale(&self, options: Scale) -> VideoStream {
        self.apply(options)
    }

    /// Crop the input video.
    pub fn crop(&self, options: Crop) -> VideoStream {
        self.apply(options)
    }

    /// Pad the input video.
    pub fn pad(&self, options: Pad) -> VideoStream {
        self.apply(options)
    }

    /// Force constant framerate.
    pub fn fps(&self, options: Fps) -> VideoStream {
        self.apply(options)
    }

    /// Set PTS for the output video frame.
    pub fn setpts(&self, options: Setpts) -> VideoStream {
        self.apply(options)
    }

    /// Pick one continuous section from the input, drop the rest.
    pub fn trim(&self, options: Trim) -> VideoStream {
        self.apply(options)
    }

    /// Overlay `overlay` on top of this stream.
    pub fn overlay(&self, overlay: &VideoStream, options: Overlay) -> VideoStream {
        self.apply_with(vec![overlay.into()], options)
    }

    /// Horizontally flip the input video.
    pub fn hflip(&self) -> VideoStream {
        self.apply(Hflip::new())
    }

    /// Flip the input video vertically.
    pub fn vflip(&self) -> VideoStream {
        self.apply(Vflip::new())
    }

    /// Transpose input video.
    pub fn transpose(&self, options: Transpose) -> VideoStream {
        self.apply(options)
    }

    /// Rotate the input image.
    pub fn rotate(&self, options: Rotate) -> VideoStream {
        self.apply(options)
    }

    /// Convert the input video to one of the specified pixel formats.
    pub fn format(&self, options: Format) -> VideoStream {
        self.apply(options)
    }

    /// Draw text on top of video frames using libfreetype library.
    pub fn drawtext(&self, options: Drawtext) -> VideoStream {
        self.apply(options)
    }

    /// Adjust brightness, contrast, gamma, and saturation.
    pub fn eq(&self, options: EqFilter) -> VideoStream {
        self.apply(options)
    }

    /// Apply a High Quality 3D Denoiser.
    pub fn hqdn3d(&self, options: Hqdn3d) -> VideoStream {
        self.apply(options)
    }

    /// Apply an Adaptive Temporal Averaging Denoiser.
    pub fn atadenoise(&self, options: Atadenoise) -> VideoStream {
        self.apply(options)
    }

    /// Pass on the input to N video outputs. Defaults to two outputs.
    pub fn split(&self, options: Split) -> FilterNode {
        let outputs = output_count(options.outputs);
        FilterNode::from_options(
            vec![self.0.clone()],
            options,
            Pads::uniform(MediaKind::Video, outputs),
        )
    }

    /// Stack this stream and `others` horizontally.
    pub fn hstack(&self, others: &[VideoStream], mut options: Hstack) -> VideoStream {
        if options.inputs.is_none() {
            options.inputs = Some(others.len() as i64 + 1);
        }
        self.apply_with(others.iter().map(Stream::from).collect(), options)
    }

    /// Stack this stream and `others` vertically.
    pub fn vstack(&self, others: &[VideoStream], mut options: Vstack) -> VideoStream {
        if options.inputs.is_none() {
            options.inputs = Some(others.len() as i64 + 1);
        }
        self.apply_with(others.iter().map(Stream::from).collect(), options)
    }

    /// Cross fade from this stream into `next`.
    pub fn xfade(&self, next: &VideoStream, options: Xfade) -> VideoStream {
        self.apply_with(vec![next.into()], options)
    }

    /// Fade in/out input video.
    pub fn fade(&self, options: Fade) -> VideoStream {
        self.apply(options)
    }

    /// Sharpen or blur the input video.
    pub fn unsharp(&self, options: Unsharp) -> VideoStream {
        self.apply(options)
    }

    /// Blur the input.
    pub fn boxblur(&self, options: Boxblur) -> VideoStream {
        self.apply(options)
    }

    /// Apply Gaussian Blur filter.
    pub fn gblur(&self, options: Gblur) -> VideoStream {
        self.apply(options)
    }

    /// Set the pixel sample aspect ratio.
    pub fn setsar(&self, options: Setsar) -> VideoStream {
        self.apply(options)
    }

    /// Deinterlace the input image.
    pub fn yadif(&self, options: Yadif) -> VideoStream {
        self.apply(options)
    }

    /// Pass the source unchanged to the output.
    pub fn null(&self) -> VideoStream {
        self.apply(Null::new())
    }

    /// Render text subtitles onto input video using the libass library.
    pub fn subtitles(&self, options: Subtitles) -> VideoStream {
        self.apply(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::input;
    use crate::value::Value;

    #[test]
    fn test_digit_leading_options_use_wire_keys() {
        let out = input("in.mp4")
            .video()
            .atadenoise(Atadenoise::new().a0(0.02).b1(0.04).size(9).algorithm(AtaAlgorithm::Serial));
        let params = out.node().unwrap().params();

        assert_eq!(params.get("0a"), Some(&Value::Float(0.02)));
        assert_eq!(params.get("1b"), Some(&Value::Float(0.04)));
        assert_eq!(params.get("s"), Some(&Value::Int(9)));
        assert_eq!(params.get("a"), Some(&Value::from("s")));
        for field in ["a0", "b1", "size", "algorithm"] {
            assert!(!params.contains_key(field));
        }
        assert_eq!(Atadenoise::SPEC.wire_key("sigma2"), Some("2s"));
    }

    #[test]
    fn test_overlay_inputs_in_call_order() {
        let source = input("in.mp4");
        let logo = input("logo.png").video();
        let out = source
            .video()
            .overlay(&logo, Overlay::new().x("W-w-10").y("10"));

        let node = out.node().unwrap();
        assert_eq!(node.name(), "overlay");
        assert_eq!(node.inputs().len(), 2);
        assert!(node.inputs()[0].same_as(&source.video()));
        assert!(node.inputs()[1].same_as(&logo));
    }

    #[test]
    fn test_hstack_three_inputs() {
        let a = input("a.mp4").video();
        let b = input("b.mp4").video();
        let c = input("c.mp4").video();
        let out = a.hstack(&[b, c], Hstack::new());

        let node = out.node().unwrap();
        assert_eq!(node.inputs().len(), 3);
        assert_eq!(node.params().get("inputs"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_explicit_inputs_count_is_kept() {
        let a = input("a.mp4").video();
        let b = input("b.mp4").video();
        let out = a.vstack(&[b], Vstack::new().inputs(2).shortest(true));
        assert_eq!(out.node().unwrap().params().get("shortest"), Some(&Value::Bool(true)));
        assert_eq!(out.node().unwrap().params().get("inputs"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_split_returns_node_with_video_outputs() {
        let node = input("in.mp4").video().split(Split::new().outputs(2));
        let left = node.video(0).unwrap().hflip();
        let right = node.video(1).unwrap().vflip();

        assert!(left.node().unwrap().inputs()[0].same_as(&node.stream()));
        assert_eq!(right.node().unwrap().inputs()[0].index(), 1);
    }

    #[test]
    fn test_split_with_huge_output_count_builds_lazily() {
        let node = input("in.mp4").video().split(Split::new().outputs(i64::MAX));
        assert_eq!(node.outputs().len(), i64::MAX as usize);
        assert_eq!(node.params().get("outputs"), Some(&Value::Int(i64::MAX)));

        let last = node.video(i64::MAX as usize - 1).unwrap();
        assert_eq!(last.index(), i64::MAX as usize - 1);
        assert_eq!(last.kind(), MediaKind::Video);
    }

    #[test]
    fn test_scale_width_and_height_keys() {
        let out = input("in.mp4")
            .video()
            .scale(Scale::new().width("1280").height("-2").force_divisible_by(2));
        let params = out.node().unwrap().params();
        assert_eq!(params.get("w"), Some(&Value::from("1280")));
        assert_eq!(params.get("h"), Some(&Value::from("-2")));
        assert_eq!(params.get("force_divisible_by"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_subtitles_requires_filename() {
        let out = input("in.mp4").video().subtitles(Subtitles::new("subs.srt"));
        let params = out.node().unwrap().params();
        assert_eq!(params.get("filename"), Some(&Value::from("subs.srt")));
        assert!(Subtitles::SPEC.option("filename").unwrap().required);
    }
}
