//! Declarative graph description loaded from TOML or JSON.
//!
//! ```toml
//! [[inputs]]
//! id = "main"
//! file = "in.wav"
//!
//! [[filters]]
//! id = "hp"
//! filter = "highpass"
//! inputs = ["main:a"]
//! params = { frequency = 3000, poles = 2 }
//!
//! [[outputs]]
//! file = "out.wav"
//! streams = ["hp"]
//! ```

use crate::compile::Command;
use crate::error::{Error, Result};
use crate::filters::{output_count, registry};
use crate::node::{FilterNode, Pads, Source};
use crate::output::OutputNode;
use crate::params::Params;
use crate::stream::{MediaKind, Stream};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDocument {
    pub inputs: Vec<InputEntry>,
    pub filters: Vec<FilterEntry>,
    pub outputs: Vec<OutputEntry>,
    /// Options placed before the first input.
    pub global: Params,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEntry {
    pub id: String,
    pub file: String,
    #[serde(default)]
    pub options: Params,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub id: String,
    pub filter: String,
    /// References to earlier inputs or filters.
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub params: Params,
    /// Output pad kinds. A single output of the first input's kind when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<MediaKind>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEntry {
    pub file: String,
    pub streams: Vec<String>,
    #[serde(default)]
    pub options: Params,
}

enum Entry {
    Input(Source),
    Filter(FilterNode),
}

impl GraphDocument {
    /// Loads a document, picking the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default();
        match extension {
            "toml" => Self::from_toml_str(&std::fs::read_to_string(path)?),
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(Error::UnsupportedDocument(path.display().to_string())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolves every reference and assembles the command.
    ///
    /// Filters the binding does not model are passed through unless `strict`.
    pub fn build(&self, strict: bool) -> Result<Command> {
        let mut entries: HashMap<&str, Entry> = HashMap::new();

        for input in &self.inputs {
            let source = Source::with_options(&input.file, input.options.clone());
            if entries.insert(&input.id, Entry::Input(source)).is_some() {
                return Err(Error::DuplicateId(input.id.clone()));
            }
        }

        for filter in &self.filters {
            if registry::lookup(&filter.filter).is_none() {
                if strict {
                    return Err(Error::UnknownFilter(filter.filter.clone()));
                }
                warn!(filter = %filter.filter, id = %filter.id, "Passing through unmodelled filter");
            }

            let inputs = filter
                .inputs
                .iter()
                .map(|reference| resolve(&entries, reference))
                .collect::<Result<Vec<_>>>()?;
            let mut params = filter.params.clone();
            if registry::counts_inputs(&filter.filter) && !params.is_set("inputs") {
                params.set("inputs", inputs.len());
            }
            let node = match &filter.outputs {
                Some(outputs) => {
                    FilterNode::with_outputs(inputs, &filter.filter, params, outputs.clone())
                }
                None if registry::counts_outputs(&filter.filter) => {
                    let kind = inputs
                        .first()
                        .map(Stream::kind)
                        .or(registry::lookup(&filter.filter).map(|spec| spec.media))
                        .unwrap_or(MediaKind::Any);
                    let count = output_count(params.get("outputs").and_then(Value::as_i64));
                    FilterNode::with_outputs(
                        inputs,
                        &filter.filter,
                        params,
                        Pads::uniform(kind, count),
                    )
                }
                None => FilterNode::new(inputs, &filter.filter, params),
            };
            if entries.insert(&filter.id, Entry::Filter(node)).is_some() {
                return Err(Error::DuplicateId(filter.id.clone()));
            }
        }

        let mut command = Command::new();
        for (key, value) in self.global.iter_set() {
            command = command.global(key, value.clone());
        }
        for output in &self.outputs {
            let streams = output
                .streams
                .iter()
                .map(|reference| resolve(&entries, reference))
                .collect::<Result<Vec<_>>>()?;
            command = command.output(
                OutputNode::new(streams, &output.file).with_options(output.options.clone()),
            );
        }

        debug!(
            inputs = self.inputs.len(),
            filters = self.filters.len(),
            outputs = self.outputs.len(),
            "Graph document built"
        );
        Ok(command)
    }
}

/// `id`, `id:a`, `id:v`, `id:a:N` for inputs; `id` or `id:N` for filters.
fn resolve(entries: &HashMap<&str, Entry>, reference: &str) -> Result<Stream> {
    let unknown = || Error::UnknownReference(reference.to_string());
    let (id, selector) = match reference.split_once(':') {
        Some((id, selector)) => (id, Some(selector)),
        None => (reference, None),
    };

    match entries.get(id).ok_or_else(unknown)? {
        Entry::Input(source) => {
            let Some(selector) = selector else {
                return Ok(source.stream());
            };
            let (kind, position) = match selector.split_once(':') {
                Some((kind, position)) => {
                    (kind, Some(position.parse::<usize>().map_err(|_| unknown())?))
                }
                None => (selector, None),
            };
            match (kind, position) {
                ("a", None) => Ok(source.audio().into()),
                ("v", None) => Ok(source.video().into()),
                ("a", Some(position)) => Ok(source.audio_at(position).into()),
                ("v", Some(position)) => Ok(source.video_at(position).into()),
                _ => Err(unknown()),
            }
        }
        Entry::Filter(node) => {
            let index = match selector {
                Some(index) => index.parse::<usize>().map_err(|_| unknown())?,
                None => 0,
            };
            node.output(index).ok_or_else(unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::CompileOptions;

    const HIGHPASS_LOWPASS: &str = r#"
[[inputs]]
id = "main"
file = "in.wav"

[[filters]]
id = "hp"
filter = "highpass"
inputs = ["main:a"]
params = { frequency = 3000, poles = 2 }

[[filters]]
id = "lp"
filter = "lowpass"
inputs = ["hp"]
params = { frequency = 500, poles = 2 }

[[outputs]]
file = "out.wav"
streams = ["lp"]
"#;

    #[test]
    fn test_toml_document_builds_chain() {
        let document = GraphDocument::from_toml_str(HIGHPASS_LOWPASS).unwrap();
        assert_eq!(
            document.filters[0].params.get("frequency"),
            Some(&Value::Int(3000))
        );

        let args = document
            .build(true)
            .unwrap()
            .compile(&CompileOptions::default())
            .unwrap();
        assert_eq!(
            args,
            vec![
                "ffmpeg",
                "-i",
                "in.wav",
                "-filter_complex",
                "[0:a]highpass=frequency=3000:poles=2[s0];[s0]lowpass=frequency=500:poles=2[s1]",
                "-map",
                "[s1]",
                "out.wav",
            ]
        );
    }

    #[test]
    fn test_json_document_with_split_outputs() {
        let document = GraphDocument::from_json_str(
            r#"{
                "inputs": [{ "id": "in", "file": "in.mp4", "options": { "ss": "10" } }],
                "filters": [
                    { "id": "sp", "filter": "split", "inputs": ["in:v"], "outputs": ["video", "video"] },
                    { "id": "flip", "filter": "hflip", "inputs": ["sp:1"] },
                    { "id": "st", "filter": "hstack", "inputs": ["sp", "flip"] }
                ],
                "outputs": [{ "file": "out.mp4", "streams": ["st", "in:a"], "options": { "c:a": "copy" } }],
                "global": { "hide_banner": true }
            }"#,
        )
        .unwrap();

        let args = document
            .build(false)
            .unwrap()
            .compile(&CompileOptions::default())
            .unwrap();
        assert_eq!(
            args,
            vec![
                "ffmpeg",
                "-hide_banner",
                "-ss",
                "10",
                "-i",
                "in.mp4",
                "-filter_complex",
                "[0:v]split[s0][s1];[s1]hflip[s2];[s0][s2]hstack=inputs=2[s3]",
                "-map",
                "[s3]",
                "-map",
                "0:a",
                "-c:a",
                "copy",
                "out.mp4",
            ]
        );
    }

    #[test]
    fn test_split_pad_count_comes_from_params() {
        let document = GraphDocument::from_toml_str(
            r#"
[[inputs]]
id = "in"
file = "in.mp4"

[[filters]]
id = "sp"
filter = "split"
inputs = ["in:v"]
params = { outputs = 3 }

[[filters]]
id = "flip"
filter = "hflip"
inputs = ["sp:2"]

[[outputs]]
file = "a.mp4"
streams = ["sp:0"]

[[outputs]]
file = "b.mp4"
streams = ["sp:1"]

[[outputs]]
file = "c.mp4"
streams = ["flip"]
"#,
        )
        .unwrap();

        let command = document.build(true).unwrap();
        assert_eq!(
            command.filter_complex(&CompileOptions::default()).unwrap().as_deref(),
            Some("[0:v]split=outputs=3[s0][s1][s2];[s2]hflip[s3]")
        );

        let mut document = document;
        document.filters[0].params = Params::new();
        assert!(matches!(
            document.build(true),
            Err(Error::UnknownReference(ref reference)) if reference == "sp:2"
        ));
    }

    #[test]
    fn test_variadic_input_count_is_filled() {
        let document = GraphDocument::from_json_str(
            r#"{
                "inputs": [
                    { "id": "a", "file": "a.wav" },
                    { "id": "b", "file": "b.wav" },
                    { "id": "c", "file": "c.wav" }
                ],
                "filters": [
                    { "id": "mix", "filter": "amix", "inputs": ["a:a", "b:a", "c:a"], "params": { "duration": "longest" } }
                ],
                "outputs": [{ "file": "out.wav", "streams": ["mix"] }]
            }"#,
        )
        .unwrap();

        let command = document.build(true).unwrap();
        assert_eq!(
            command.filter_complex(&CompileOptions::default()).unwrap().as_deref(),
            Some("[0:a][1:a][2:a]amix=duration=longest:inputs=3[s0]")
        );

        let mut document = document;
        document.filters[0].params.set("inputs", 2);
        let command = document.build(true).unwrap();
        assert_eq!(
            command.filter_complex(&CompileOptions::default()).unwrap().as_deref(),
            Some("[0:a][1:a][2:a]amix=duration=longest:inputs=2[s0]")
        );
    }

    #[test]
    fn test_unknown_filter_depends_on_strict() {
        let document = GraphDocument::from_toml_str(
            r#"
[[inputs]]
id = "in"
file = "in.mp4"

[[filters]]
id = "blend"
filter = "tblend"
inputs = ["in:v"]
params = { all_mode = "average" }

[[outputs]]
file = "out.mp4"
streams = ["blend"]
"#,
        )
        .unwrap();

        assert!(matches!(
            document.build(true),
            Err(Error::UnknownFilter(ref name)) if name == "tblend"
        ));
        assert!(document.build(false).is_ok());
    }

    #[test]
    fn test_bad_references() {
        let mut document = GraphDocument::from_toml_str(HIGHPASS_LOWPASS).unwrap();
        document.filters[1].inputs = vec!["hp:3".to_string()];
        assert!(matches!(
            document.build(false),
            Err(Error::UnknownReference(ref reference)) if reference == "hp:3"
        ));

        document.filters[1].inputs = vec!["main:x".to_string()];
        assert!(matches!(document.build(false), Err(Error::UnknownReference(_))));

        document.filters[1].inputs = vec!["lp".to_string()];
        assert!(matches!(document.build(false), Err(Error::UnknownReference(_))));

        document.filters[1].inputs = vec!["hp".to_string()];
        document.filters[1].id = "main".to_string();
        assert!(matches!(
            document.build(false),
            Err(Error::DuplicateId(ref id)) if id == "main"
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            GraphDocument::from_path(Path::new("graph.yaml")),
            Err(Error::UnsupportedDocument(_))
        ));
    }
}
