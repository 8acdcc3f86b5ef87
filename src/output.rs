use crate::compile::{Command, CompileOptions};
use crate::error::Result;
use crate::params::Params;
use crate::stream::Stream;
use crate::value::Value;

/// An output file and the streams mapped into it.
#[derive(Debug, Clone)]
pub struct OutputNode {
    streams: Vec<Stream>,
    filename: String,
    options: Params,
}

/// Maps `streams` into `filename`, in order.
pub fn output<I, S>(streams: I, filename: impl Into<String>) -> OutputNode
where
    I: IntoIterator<Item = S>,
    S: Into<Stream>,
{
    OutputNode::new(streams, filename)
}

impl OutputNode {
    pub fn new<I, S>(streams: I, filename: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Stream>,
    {
        Self {
            streams: streams.into_iter().map(Into::into).collect(),
            filename: filename.into(),
            options: Params::new(),
        }
    }

    /// Adds an output option such as `c:v` or `shortest`.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.set(key, value);
        self
    }

    /// Adds every set entry of `options`; later values replace earlier ones.
    pub fn with_options(mut self, options: Params) -> Self {
        for (key, value) in options.iter_set() {
            self.options.set(key, value.clone());
        }
        self
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn options(&self) -> &Params {
        &self.options
    }

    /// Shortcut for a single-output [`Command`].
    pub fn compile(&self, options: &CompileOptions) -> Result<Vec<String>> {
        Command::new().output(self.clone()).compile(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::input;

    #[test]
    fn test_later_options_win() {
        let node = input("in.mp4")
            .stream()
            .output("out.mp4")
            .option("c:v", "libx264")
            .with_options(Params::new().with("c:v", "libx265").with("crf", 23))
            .option("crf", 28);

        assert_eq!(node.options().get("c:v"), Some(&Value::from("libx265")));
        assert_eq!(node.options().get("crf"), Some(&Value::Int(28)));
        assert_eq!(node.options().keys().collect::<Vec<_>>(), vec!["c:v", "crf"]);

        let args = node.compile(&CompileOptions::default()).unwrap();
        assert_eq!(
            args,
            vec!["ffmpeg", "-i", "in.mp4", "-map", "0", "-c:v", "libx265", "-crf", "28", "out.mp4"]
        );
    }

    #[test]
    fn test_unset_entries_are_not_copied() {
        let mut options = Params::new();
        options.declare("shortest", None);
        let node = OutputNode::new([input("in.wav").audio()], "out.wav")
            .option("shortest", true)
            .with_options(options);
        assert_eq!(node.options().get("shortest"), Some(&Value::Bool(true)));
    }
}
