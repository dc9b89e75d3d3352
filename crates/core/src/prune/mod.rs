//! Weight pruning followed by reachability collection
//!
//! A pass runs three steps on one graph, always in this order:
//!
//! 1. [`prune_edges`] drops edges lighter than the threshold.
//! 2. [`find_nodes`] resolves root labels to node declarations.
//! 3. [`collect`] marks everything reachable from the roots and sweeps
//!    the rest.
//!
//! Because weight pruning runs first, a node whose only link to a root was
//! a light edge is swept as unreachable.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PruneError;
use crate::graph::Graph;

pub mod adjacency;
pub mod collect;
pub mod roots;
pub mod walk;
pub mod weight;

pub use adjacency::NeighborIndex;
pub use collect::{collect, mark, sweep, Sweep};
pub use roots::find_nodes;
pub use walk::{walk, Walker};
pub use weight::{edge_weight, prune_edges};

/// Settings for one pruning pass
#[derive(Debug, Clone, PartialEq)]
pub struct PruneOptions {
    /// Edges with a weight strictly below this are removed
    pub threshold: f64,
    /// Labels (decoded) of the nodes treated as always reachable
    pub roots: HashSet<String>,
}

impl PruneOptions {
    pub fn new<I, S>(threshold: f64, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            threshold,
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }
}

/// What a pruning pass removed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PruneReport {
    /// Edges removed by the weight threshold
    pub light_edges: usize,
    /// Node declarations matching a root label
    pub roots: usize,
    /// Result of the mark-sweep step
    pub sweep: Sweep,
}

/// Run a full pass on `graph`
///
/// # Errors
///
/// Returns [`PruneError::MalformedWeight`] if an edge weight cannot be
/// read. The graph may already be partially pruned at that point; clone it
/// beforehand if the original must survive a failure.
///
/// # Example
/// ```
/// use dotprune_core::{dot, prune, PruneOptions};
///
/// let mut graph = dot::parse(r#"digraph {
///     a [label="root"];
///     b [label="kept"];
///     c [label="lost"];
///     a -> b [label="0.5"];
///     b -> c [label="0.01"];
/// }"#).unwrap();
///
/// let report = prune(&mut graph, &PruneOptions::new(0.1, ["root"])).unwrap();
///
/// assert_eq!(report.light_edges, 1);
/// assert_eq!(graph.node_count(), 2);
/// ```
pub fn prune(graph: &mut Graph, options: &PruneOptions) -> Result<PruneReport, PruneError> {
    let light_edges = prune_edges(graph, options.threshold)?;

    let roots: Vec<String> = find_nodes(graph, &options.roots)
        .into_iter()
        .map(|node| node.name().to_string())
        .collect();
    if roots.is_empty() {
        tracing::warn!(labels = ?options.roots, "no node matches a root label, sweeping everything");
    }

    let sweep = collect(graph, &roots);

    Ok(PruneReport {
        light_edges,
        roots: roots.len(),
        sweep,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, GraphKind, Node};

    fn labeled(name: &str, label: &str) -> Node {
        Node::with_attributes(name, [("label", label)].into_iter().collect())
    }

    fn weighted(source: &str, destination: &str, weight: &str) -> Edge {
        Edge::with_attributes(source, destination, [("label", weight)].into_iter().collect())
    }

    fn molecules() -> Graph {
        let mut graph = Graph::new(GraphKind::Digraph);
        graph.add_node(labeled("C6H6", "\"C6H6\""));
        graph.add_node(labeled("C7H8", "\"C7H8\""));
        graph.add_node(labeled("X", "\"X\""));
        graph.add_edge(weighted("C6H6", "C7H8", "\"0.1\""));
        graph.add_edge(weighted("C7H8", "X", "\"0.01\""));
        graph
    }

    #[test]
    fn test_light_edge_disconnects_before_collection() {
        let mut graph = molecules();

        let report = prune(&mut graph, &PruneOptions::new(0.09, ["C6H6", "C7H8"])).unwrap();

        let mut names: Vec<&str> = graph.nodes().map(Node::name).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["C6H6", "C7H8"]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(report.light_edges, 1);
        assert_eq!(report.roots, 2);
        assert_eq!(report.sweep.nodes_removed, 1);
        assert_eq!(report.sweep.edges_removed, 0);
    }

    #[test]
    fn test_heavy_reverse_edge_keeps_neighbor_in_undirected_graph() {
        let mut graph = Graph::new(GraphKind::Graph);
        graph.add_node(labeled("a", "\"root\""));
        graph.add_node(labeled("b", "\"b\""));
        graph.add_edge(weighted("a", "b", "\"0.01\""));
        graph.add_edge(weighted("b", "a", "\"0.9\""));

        let report = prune(&mut graph, &PruneOptions::new(0.5, ["root"])).unwrap();

        assert_eq!(report.light_edges, 1);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node("b").len(), 1);
        assert_eq!(report.sweep.nodes_removed, 0);
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let mut graph = molecules();
        let options = PruneOptions::new(0.09, ["C6H6"]);
        prune(&mut graph, &options).unwrap();
        let nodes_before = graph.node_count();
        let edges_before = graph.edge_count();

        let report = prune(&mut graph, &options).unwrap();

        assert_eq!(report.light_edges, 0);
        assert_eq!(report.sweep.nodes_removed, 0);
        assert_eq!(report.sweep.edges_removed, 0);
        assert_eq!(graph.node_count(), nodes_before);
        assert_eq!(graph.edge_count(), edges_before);
    }

    #[test]
    fn test_no_matching_root_empties_graph() {
        let mut graph = molecules();

        let report = prune(&mut graph, &PruneOptions::new(0.0, ["nobody"])).unwrap();

        assert_eq!(report.roots, 0);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_malformed_weight_stops_the_pass() {
        let mut graph = molecules();
        graph.add_edge(weighted("X", "C6H6", "\"n/a\""));

        let err = prune(&mut graph, &PruneOptions::new(0.09, ["C6H6"])).unwrap_err();

        assert!(matches!(err, PruneError::MalformedWeight { .. }));
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_report_serializes() {
        let report = PruneReport {
            light_edges: 1,
            roots: 2,
            sweep: Sweep {
                marked: 2,
                nodes_removed: 1,
                edges_removed: 0,
            },
        };

        let json = serde_json::to_value(report).unwrap();

        assert_eq!(json["light_edges"], 1);
        assert_eq!(json["sweep"]["nodes_removed"], 1);
    }
}
