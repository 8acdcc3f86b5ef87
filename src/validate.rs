//! Optional checks against the documented option schema.
//!
//! Building a graph never validates. FFmpeg itself is the authority; these
//! checks only surface, before running it, what it would reject.

use crate::compile::MAX_OUTPUT_PADS;
use crate::graph::Graph;
use crate::stream::Stream;
use tracing::debug;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Issue {
    #[error("{filter}: option '{key}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        filter: String,
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{filter}: required option '{key}' is not set")]
    MissingRequired { filter: String, key: String },

    #[error("{filter}: output {index} is consumed {consumers} times without a split")]
    StreamReused {
        filter: String,
        index: usize,
        consumers: usize,
    },

    #[error("{filter}: {count} output pads, more than {max}")]
    TooManyOutputs {
        filter: String,
        count: usize,
        max: usize,
    },

    #[error("{filter}: output {index} is never consumed")]
    UnconsumedOutput { filter: String, index: usize },

    #[error("{filter}: not known to libavfilter")]
    UnknownToEngine { filter: String },

    #[error("{filter}: expects {expected} inputs, got {actual}")]
    InputCount {
        filter: String,
        expected: usize,
        actual: usize,
    },
}

/// Validates the graph reachable from `roots`, as if every root were mapped once.
pub fn validate(roots: &[Stream]) -> Vec<Issue> {
    check(&Graph::collect(roots), false)
}

/// Runs every check on a collected graph.
///
/// With `allow_reuse`, outputs read more than once are accepted since the
/// compiler inserts the split itself.
pub fn check(graph: &Graph, allow_reuse: bool) -> Vec<Issue> {
    let mut issues = Vec::new();

    for node in graph.filters() {
        if let Some(spec) = node.spec() {
            for option in spec.options {
                let value = node.params().get(option.key);
                if option.required && value.is_none() {
                    issues.push(Issue::MissingRequired {
                        filter: node.name().to_string(),
                        key: option.key.to_string(),
                    });
                }
                let (Some((min, max)), Some(value)) =
                    (option.range, value.and_then(|value| value.as_f64()))
                else {
                    continue;
                };
                if value < min || value > max {
                    issues.push(Issue::OutOfRange {
                        filter: node.name().to_string(),
                        key: option.key.to_string(),
                        value,
                        min,
                        max,
                    });
                }
            }
        }

        let pads = node.outputs().len();
        if pads > MAX_OUTPUT_PADS {
            issues.push(Issue::TooManyOutputs {
                filter: node.name().to_string(),
                count: pads,
                max: MAX_OUTPUT_PADS,
            });
            continue;
        }
        for index in 0..pads {
            match graph.consumers(node, index) {
                0 => issues.push(Issue::UnconsumedOutput {
                    filter: node.name().to_string(),
                    index,
                }),
                1 => {}
                consumers if !allow_reuse => issues.push(Issue::StreamReused {
                    filter: node.name().to_string(),
                    index,
                    consumers,
                }),
                _ => {}
            }
        }
    }

    debug!(
        filters = graph.filters().len(),
        issues = issues.len(),
        "Filter graph validated"
    );
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Adelay, Atempo, Highpass, Lowpass, Split};
    use crate::node::{FilterNode, input};
    use crate::params::Params;

    #[test]
    fn test_valid_chain_has_no_issues() {
        let out = input("in.wav")
            .audio()
            .highpass(Highpass::new().frequency(3000).poles(2))
            .lowpass(Lowpass::new().frequency(500).poles(2));
        assert!(validate(&[out.into()]).is_empty());
    }

    #[test]
    fn test_out_of_range_is_reported_not_rejected() {
        let out = input("in.wav")
            .audio()
            .highpass(Highpass::new().poles(3))
            .atempo(Atempo::new().tempo(0.25));

        let issues = validate(&[out.into()]);
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            &issues[0],
            Issue::OutOfRange { filter, key, .. } if filter == "highpass" && key == "poles"
        ));
        assert!(matches!(
            &issues[1],
            Issue::OutOfRange { filter, key, .. } if filter == "atempo" && key == "tempo"
        ));
    }

    #[test]
    fn test_expressions_are_not_range_checked() {
        let out = input("in.wav")
            .audio()
            .filter("atempo", Params::new().with("tempo", "2*1"));
        assert!(validate(&[out]).is_empty());
    }

    #[test]
    fn test_missing_required_on_untyped_node() {
        let node = FilterNode::new(
            vec![input("in.wav").audio().into()],
            "adelay",
            Params::new().with("all", true),
        );
        let issues = validate(&[node.stream()]);
        assert_eq!(
            issues,
            vec![Issue::MissingRequired {
                filter: "adelay".to_string(),
                key: "delays".to_string(),
            }]
        );

        let typed = input("in.wav").audio().adelay(Adelay::new("10"));
        assert!(validate(&[typed.into()]).is_empty());
    }

    #[test]
    fn test_split_outputs_must_be_consumed_once() {
        let split = input("in.mp4").video().split(Split::new().outputs(3));
        let a = split.video(0).unwrap().hflip();
        let issues = validate(&[a.clone().into(), a.into()]);

        assert!(issues.contains(&Issue::UnconsumedOutput {
            filter: "split".to_string(),
            index: 1,
        }));
        assert!(issues.contains(&Issue::StreamReused {
            filter: "hflip".to_string(),
            index: 0,
            consumers: 2,
        }));
    }

    #[test]
    fn test_oversized_split_is_reported() {
        let split = input("in.mp4").video().split(Split::new().outputs(i64::MAX));
        let out = split.video(0).unwrap().hflip();
        let issues = validate(&[out.into()]);

        assert!(issues.contains(&Issue::TooManyOutputs {
            filter: "split".to_string(),
            count: i64::MAX as usize,
            max: MAX_OUTPUT_PADS,
        }));
        assert!(issues.iter().any(
            |issue| matches!(issue, Issue::OutOfRange { filter, key, .. } if filter == "split" && key == "outputs")
        ));
    }
}
