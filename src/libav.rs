//! Checks a graph against the libavfilter this process links.

use crate::error::Result;
use crate::graph::Graph;
use crate::stream::Stream;
use crate::validate::Issue;
use ffmpeg_next as ffmpeg;
use ffmpeg_next::filter::Flags;
use tracing::debug;

/// Reports filters unknown to libavfilter and input counts that do not match
/// a filter's static pads. Filters with dynamic inputs are not counted.
pub fn check_engine(roots: &[Stream]) -> Result<Vec<Issue>> {
    ffmpeg::init()?;

    let graph = Graph::collect(roots);
    let mut issues = Vec::new();

    for node in graph.filters() {
        let Some(filter) = ffmpeg::filter::find(node.name()) else {
            issues.push(Issue::UnknownToEngine {
                filter: node.name().to_string(),
            });
            continue;
        };
        if filter.flags().contains(Flags::DYNAMIC_INPUTS) {
            continue;
        }

        let expected = filter.inputs().map(|pads| pads.count()).unwrap_or(0);
        if expected != node.inputs().len() {
            issues.push(Issue::InputCount {
                filter: node.name().to_string(),
                expected,
                actual: node.inputs().len(),
            });
        }
    }

    debug!(
        filters = graph.filters().len(),
        issues = issues.len(),
        "Filter graph checked against libavfilter"
    );
    Ok(issues)
}
