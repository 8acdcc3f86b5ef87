use crate::node::{FilterNode, NodeId, Source};
use crate::stream::{Origin, Stream};
use std::collections::{HashMap, HashSet};

/// The nodes reachable from a set of terminal streams.
///
/// Filters are kept in dependency order: every node comes after the nodes
/// producing its inputs. Sources are numbered by first appearance.
#[derive(Debug, Default)]
pub struct Graph {
    sources: Vec<Source>,
    filters: Vec<FilterNode>,
    source_index: HashMap<NodeId, usize>,
    consumers: HashMap<(NodeId, usize), usize>,
}

impl Graph {
    /// Walks back from `roots`. Each root counts as one consumer of its stream.
    pub fn collect<'a, I>(roots: I) -> Self
    where
        I: IntoIterator<Item = &'a Stream>,
    {
        let mut graph = Graph::default();
        let mut visited = HashSet::new();
        let roots: Vec<&Stream> = roots.into_iter().collect();

        for root in &roots {
            graph.visit(root, &mut visited);
        }

        for node in &graph.filters {
            for input in node.inputs() {
                if let Origin::Filter(producer) = input.origin() {
                    *graph
                        .consumers
                        .entry((producer.id(), input.index()))
                        .or_default() += 1;
                }
            }
        }
        for root in roots {
            if let Origin::Filter(producer) = root.origin() {
                *graph
                    .consumers
                    .entry((producer.id(), root.index()))
                    .or_default() += 1;
            }
        }

        graph
    }

    fn visit(&mut self, stream: &Stream, visited: &mut HashSet<NodeId>) {
        match stream.origin() {
            Origin::Source { source, .. } => {
                if !self.source_index.contains_key(&source.id()) {
                    self.source_index.insert(source.id(), self.sources.len());
                    self.sources.push(source.clone());
                }
            }
            Origin::Filter(node) => {
                if !visited.insert(node.id()) {
                    return;
                }
                for input in node.inputs() {
                    self.visit(input, visited);
                }
                self.filters.push(node.clone());
            }
        }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Filter nodes in dependency order.
    pub fn filters(&self) -> &[FilterNode] {
        &self.filters
    }

    /// Position of `source` on the command line.
    pub fn source_index(&self, source: &Source) -> Option<usize> {
        self.source_index.get(&source.id()).copied()
    }

    /// How many filter inputs and roots read output `index` of `node`.
    pub fn consumers(&self, node: &FilterNode, index: usize) -> usize {
        self.consumers
            .get(&(node.id(), index))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Highpass, Lowpass, Overlay, Split};
    use crate::node::input;

    #[test]
    fn test_chain_collects_in_dependency_order() {
        let root = input("in.wav").audio();
        let out = root
            .highpass(Highpass::new().frequency(3000).poles(2))
            .lowpass(Lowpass::new().frequency(500).poles(2));

        let graph = Graph::collect([&*out]);
        assert_eq!(graph.sources().len(), 1);
        let names: Vec<_> = graph.filters().iter().map(FilterNode::name).collect();
        assert_eq!(names, vec!["highpass", "lowpass"]);
        assert_eq!(graph.consumers(&graph.filters()[0], 0), 1);
        assert_eq!(graph.consumers(&graph.filters()[1], 0), 1);
    }

    #[test]
    fn test_shared_node_is_visited_once() {
        let source = input("in.mp4");
        let split = source.video().split(Split::new());
        let left = split.video(0).unwrap().hflip();
        let right = split.video(1).unwrap();
        let out = left.overlay(&right, Overlay::new());

        let graph = Graph::collect([&*out]);
        assert_eq!(graph.filters().len(), 3);
        assert_eq!(graph.filters()[0].name(), "split");
        assert_eq!(graph.consumers(&split, 0), 1);
        assert_eq!(graph.consumers(&split, 1), 1);
    }

    #[test]
    fn test_sources_numbered_by_first_appearance() {
        let main = input("main.mp4");
        let logo = input("logo.png");
        let out = main.video().overlay(&logo.video(), Overlay::new());

        let graph = Graph::collect([&*out]);
        assert_eq!(graph.source_index(&main), Some(0));
        assert_eq!(graph.source_index(&logo), Some(1));
    }

    #[test]
    fn test_reused_output_is_counted() {
        let hp = input("in.wav").audio().highpass(Highpass::new());
        let a = hp.lowpass(Lowpass::new());
        let graph = Graph::collect([&*a, &*hp]);
        assert_eq!(graph.consumers(hp.node().unwrap(), 0), 2);
    }
}
