//! Mark-sweep collection from a set of root names
//!
//! Mark walks from every root and records the names it reaches. Sweep then
//! drops unmarked node declarations and every edge with no marked endpoint.
//! An edge keeps living as long as one endpoint is marked, even when the
//! other endpoint's declarations were swept.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::walk::Walker;
use crate::graph::{Graph, Node};

/// Outcome of one collection pass
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sweep {
    /// Distinct names marked reachable
    pub marked: usize,
    /// Node declarations removed
    pub nodes_removed: usize,
    /// Edges removed
    pub edges_removed: usize,
}

/// Names of every node declaration reachable from `roots`
///
/// One neighbor index serves all roots. A root whose name an earlier walk
/// already marked is skipped, since its whole component is marked too.
pub fn mark<R: AsRef<str>>(graph: &Graph, roots: &[R]) -> HashSet<String> {
    let walker = Walker::new(graph);
    let mut marked: HashSet<String> = HashSet::new();

    for root in roots {
        let root = root.as_ref();
        if marked.contains(root) {
            continue;
        }
        walker.walk(root, |node| {
            marked.insert(node.name().to_string());
        });
    }

    marked
}

/// Delete what `marked` does not cover
pub fn sweep(graph: &mut Graph, marked: &HashSet<String>) -> Sweep {
    let doomed_nodes: HashSet<String> = graph
        .nodes()
        .map(Node::name)
        .filter(|name| !marked.contains(*name))
        .map(str::to_string)
        .collect();
    let nodes_removed: usize = doomed_nodes
        .iter()
        .map(|name| graph.remove_node(name))
        .sum();

    let doomed_edges: Vec<(String, String)> = graph
        .edges()
        .filter(|edge| !marked.contains(edge.source()) && !marked.contains(edge.destination()))
        .map(|edge| (edge.source().to_string(), edge.destination().to_string()))
        .collect();
    let edges_removed: usize = doomed_edges
        .iter()
        .map(|(source, destination)| graph.remove_edge(source, destination))
        .sum();

    Sweep {
        marked: marked.len(),
        nodes_removed,
        edges_removed,
    }
}

/// Mark from `roots`, then sweep
pub fn collect<R: AsRef<str>>(graph: &mut Graph, roots: &[R]) -> Sweep {
    let marked = mark(graph, roots);
    let sweep = sweep(graph, &marked);
    tracing::debug!(
        roots = roots.len(),
        marked = sweep.marked,
        nodes_removed = sweep.nodes_removed,
        edges_removed = sweep.edges_removed,
        "collected unreachable nodes"
    );
    sweep
}
