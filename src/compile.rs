//! Serialization of a graph into FFmpeg's filtergraph text and command line.

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::node::{FilterNode, NodeId};
use crate::output::OutputNode;
use crate::params::Params;
use crate::stream::{MediaKind, Origin, Stream};
use crate::validate;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

/// Most output pads one node may have and still be labelled.
pub const MAX_OUTPUT_PADS: usize = 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Program name placed in front of the arguments.
    pub program: String,
    /// Emit `-y`.
    pub overwrite: bool,
    /// Insert `split`/`asplit` when a filter output is read more than once.
    pub auto_split: bool,
    /// Fail on [`validate::Issue`]s instead of leaving them to FFmpeg.
    pub validate: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            overwrite: false,
            auto_split: false,
            validate: false,
        }
    }
}

/// Global options plus the outputs of one `ffmpeg` invocation.
#[derive(Debug, Clone, Default)]
pub struct Command {
    global: Params,
    outputs: Vec<OutputNode>,
}

impl Command {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(mut self, output: OutputNode) -> Self {
        self.outputs.push(output);
        self
    }

    /// Adds a global option such as `hide_banner` or `loglevel`.
    pub fn global(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.global.set(key, value);
        self
    }

    pub fn outputs(&self) -> &[OutputNode] {
        &self.outputs
    }

    fn roots(&self) -> Vec<Stream> {
        self.outputs
            .iter()
            .flat_map(|output| output.streams().iter().cloned())
            .collect()
    }

    /// The `-filter_complex` argument, `None` when no filter is involved.
    pub fn filter_complex(&self, options: &CompileOptions) -> Result<Option<String>> {
        let roots = self.roots();
        let graph = Graph::collect(&roots);
        let mut plan = Plan::new(&graph, options)?;
        plan.render_filters()?;
        Ok(plan.description())
    }

    /// The full argument vector, program name first.
    pub fn compile(&self, options: &CompileOptions) -> Result<Vec<String>> {
        if self.outputs.is_empty() {
            return Err(Error::NoOutputs);
        }

        let roots = self.roots();
        let graph = Graph::collect(&roots);
        let mut plan = Plan::new(&graph, options)?;
        plan.render_filters()?;

        let mut args = vec![options.program.clone()];
        if options.overwrite {
            args.push("-y".to_string());
        }
        push_options(&mut args, &self.global);

        for source in graph.sources() {
            push_options(&mut args, source.options());
            args.push("-i".to_string());
            args.push(source.filename().to_string());
        }

        if let Some(description) = plan.description() {
            args.push("-filter_complex".to_string());
            args.push(description);
        }

        for output in &self.outputs {
            for stream in output.streams() {
                let label = plan.take_label(stream)?;
                args.push("-map".to_string());
                args.push(match stream.origin() {
                    Origin::Filter(_) => format!("[{label}]"),
                    Origin::Source { .. } => label,
                });
            }
            push_options(&mut args, output.options());
            args.push(output.filename().to_string());
        }

        debug!(
            inputs = graph.sources().len(),
            filters = graph.filters().len(),
            outputs = self.outputs.len(),
            "Command compiled"
        );
        Ok(args)
    }
}

/// Filtergraph text of the graph ending at `roots`.
///
/// Root streams produced by filters keep their `sN` label so the caller can
/// map them.
pub fn filter_graph(roots: &[Stream], options: &CompileOptions) -> Result<String> {
    let graph = Graph::collect(roots);
    let mut plan = Plan::new(&graph, options)?;
    plan.render_filters()?;
    Ok(plan.description().unwrap_or_default())
}

/// Label bookkeeping for one serialization.
struct Plan<'g> {
    graph: &'g Graph,
    auto_split: bool,
    next_label: usize,
    labels: HashMap<(NodeId, usize), VecDeque<String>>,
    statements: Vec<String>,
}

impl<'g> Plan<'g> {
    fn new(graph: &'g Graph, options: &CompileOptions) -> Result<Self> {
        if options.validate {
            let issues = validate::check(graph, options.auto_split);
            if !issues.is_empty() {
                for issue in &issues {
                    warn!(%issue, "Filter graph issue");
                }
                return Err(Error::Validation(issues));
            }
        }

        Ok(Self {
            graph,
            auto_split: options.auto_split,
            next_label: 0,
            labels: HashMap::new(),
            statements: Vec::new(),
        })
    }

    fn fresh_label(&mut self) -> String {
        let label = format!("s{}", self.next_label);
        self.next_label += 1;
        label
    }

    fn render_filters(&mut self) -> Result<()> {
        for node in self.graph.filters() {
            let mut inputs = String::new();
            for input in node.inputs() {
                inputs.push_str(&format!("[{}]", self.take_label(input)?));
            }

            let pads = node.outputs().len();
            if pads > MAX_OUTPUT_PADS {
                return Err(Error::TooManyOutputs {
                    filter: node.name().to_string(),
                    count: pads,
                    max: MAX_OUTPUT_PADS,
                });
            }

            let mut outputs = String::new();
            let mut splits = Vec::new();
            for (index, kind) in node.outputs().iter().enumerate() {
                let label = self.fresh_label();
                outputs.push_str(&format!("[{label}]"));

                let consumers = self.graph.consumers(node, index);
                if consumers > 1 {
                    if !self.auto_split {
                        return Err(Error::StreamReused {
                            filter: node.name().to_string(),
                            index,
                            consumers,
                        });
                    }
                    splits.push((index, kind, label, consumers));
                } else {
                    self.labels
                        .insert((node.id(), index), VecDeque::from([label]));
                }
            }

            self.statements
                .push(format!("{inputs}{}{outputs}", filter_call(node)));

            for (index, kind, label, consumers) in splits {
                let branches: VecDeque<String> =
                    (0..consumers).map(|_| self.fresh_label()).collect();
                let name = if kind == MediaKind::Audio {
                    "asplit"
                } else {
                    "split"
                };
                let pads: String = branches.iter().map(|branch| format!("[{branch}]")).collect();
                self.statements
                    .push(format!("[{label}]{name}=outputs={consumers}{pads}"));
                self.labels.insert((node.id(), index), branches);
            }
        }
        Ok(())
    }

    /// Label a consumer reads `stream` through. Filter labels are handed out once each.
    fn take_label(&mut self, stream: &Stream) -> Result<String> {
        match stream.origin() {
            Origin::Source { source, position } => {
                let index = self.graph.source_index(source).ok_or_else(|| {
                    Error::UnresolvedStream {
                        filter: source.filename().to_string(),
                    }
                })?;
                Ok(stream_specifier(index, stream.kind(), *position))
            }
            Origin::Filter(node) => self
                .labels
                .get_mut(&(node.id(), stream.index()))
                .and_then(VecDeque::pop_front)
                .ok_or_else(|| Error::UnresolvedStream {
                    filter: node.name().to_string(),
                }),
        }
    }

    fn description(&self) -> Option<String> {
        (!self.statements.is_empty()).then(|| self.statements.join(";"))
    }
}

/// `name` or `name=k=v:k=v`, escaped for the filtergraph level.
fn filter_call(node: &FilterNode) -> String {
    let args: Vec<String> = node
        .params()
        .iter_set()
        .map(|(key, value)| format!("{key}={}", escape_value(&value.to_string())))
        .collect();
    if args.is_empty() {
        node.name().to_string()
    } else {
        format!("{}={}", node.name(), escape_graph(&args.join(":")))
    }
}

fn stream_specifier(index: usize, kind: MediaKind, position: Option<usize>) -> String {
    let mut specifier = index.to_string();
    match kind {
        MediaKind::Audio => specifier.push_str(":a"),
        MediaKind::Video => specifier.push_str(":v"),
        MediaKind::Any => {}
    }
    if let Some(position) = position {
        specifier.push_str(&format!(":{position}"));
    }
    specifier
}

/// Backslash-escapes `special` characters, plus whitespace in first or last
/// position, which FFmpeg's tokenizer would otherwise trim.
fn escape(text: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (offset, ch) in text.char_indices() {
        let edge = offset == 0 || offset + ch.len_utf8() == text.len();
        if special.contains(&ch) || (edge && ch.is_ascii_whitespace()) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// First level: an option value inside a filter's argument list.
pub fn escape_value(value: &str) -> String {
    escape(value, &['\\', '\'', ':'])
}

/// Second level: a filter's argument list inside the filtergraph.
pub fn escape_graph(args: &str) -> String {
    escape(args, &['\\', '\'', '[', ']', ',', ';'])
}

/// `-key value` pairs; `true` is a bare flag, `false` and unset are dropped.
fn push_options(args: &mut Vec<String>, options: &Params) {
    for (key, value) in options.iter_set() {
        match value {
            Value::Bool(false) => {}
            Value::Bool(true) => args.push(format!("-{key}")),
            value => {
                args.push(format!("-{key}"));
                args.push(value.to_string());
            }
        }
    }
}

/// Renders `args` as one POSIX shell command line.
pub fn shell_join(args: &[String]) -> String {
    shell_words::join(args)
}
