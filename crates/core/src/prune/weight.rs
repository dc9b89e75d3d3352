//! Edge removal by weight threshold

use crate::error::PruneError;
use crate::graph::{Edge, Graph};
use crate::label;

/// Decode and parse an edge's weight
///
/// Surrounding whitespace is ignored; everything else `f64::from_str`
/// rejects is a [`PruneError::MalformedWeight`].
pub fn edge_weight(edge: &Edge) -> Result<f64, PruneError> {
    edge.label()
        .and_then(|raw| label::decode(raw).trim().parse::<f64>().ok())
        .ok_or_else(|| PruneError::MalformedWeight {
            from: edge.source().to_string(),
            to: edge.destination().to_string(),
            weight: edge.label().map(str::to_string),
        })
}

/// Remove every edge whose weight is strictly below `threshold`
///
/// Edges are judged against a snapshot taken before the first deletion.
/// Deletion goes through [`Graph::remove_edge`], so parallel edges sharing
/// the key of a light edge go with it. Returns the number of edges removed.
///
/// # Errors
///
/// Returns [`PruneError::MalformedWeight`] on the first edge whose weight is
/// missing or unparseable. Edges removed before that point stay removed.
pub fn prune_edges(graph: &mut Graph, threshold: f64) -> Result<usize, PruneError> {
    let snapshot: Vec<Edge> = graph.edges().cloned().collect();

    let mut removed = 0;
    for edge in &snapshot {
        if edge_weight(edge)? < threshold {
            removed += graph.remove_edge(edge.source(), edge.destination());
        }
    }

    tracing::debug!(
        threshold,
        examined = snapshot.len(),
        removed,
        "pruned edges by weight"
    );
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphKind;

    fn weighted(source: &str, destination: &str, weight: &str) -> Edge {
        Edge::with_attributes(source, destination, [("label", weight)].into_iter().collect())
    }

    fn weights(graph: &Graph) -> Vec<String> {
        let mut weights: Vec<String> = graph
            .edges()
            .filter_map(Edge::label)
            .map(str::to_string)
            .collect();
        weights.sort();
        weights
    }

    #[test]
    fn test_only_light_edge_removed() {
        let mut graph = Graph::new(GraphKind::Digraph);
        graph.add_edge(weighted("a", "b", "\"0.05\""));
        graph.add_edge(weighted("b", "c", "\"0.1\""));
        graph.add_edge(weighted("c", "d", "\"0.2\""));

        let removed = prune_edges(&mut graph, 0.09).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(weights(&graph), vec!["\"0.1\"", "\"0.2\""]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut graph = Graph::new(GraphKind::Digraph);
        graph.add_edge(weighted("a", "b", "0.5"));

        assert_eq!(prune_edges(&mut graph, 0.5).unwrap(), 0);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_consecutive_light_edges_all_removed() {
        let mut graph = Graph::new(GraphKind::Digraph);
        graph.add_edge(weighted("a", "b", "0.01"));
        graph.add_edge(weighted("b", "c", "0.02"));
        graph.add_edge(weighted("c", "d", "0.03"));
        graph.add_edge(weighted("d", "e", "0.9"));

        assert_eq!(prune_edges(&mut graph, 0.5).unwrap(), 3);
        assert_eq!(weights(&graph), vec!["0.9"]);
    }

    #[test]
    fn test_nodes_untouched() {
        let mut graph = Graph::new(GraphKind::Graph);
        graph.add_node(crate::graph::Node::new("a"));
        graph.add_edge(weighted("a", "b", "0.01"));

        prune_edges(&mut graph, 1.0).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_missing_weight_is_malformed() {
        let mut graph = Graph::new(GraphKind::Digraph);
        graph.add_edge(Edge::new("a", "b"));

        let err = prune_edges(&mut graph, 0.1).unwrap_err();

        assert_eq!(
            err,
            PruneError::MalformedWeight {
                from: "a".to_string(),
                to: "b".to_string(),
                weight: None,
            }
        );
    }

    #[test]
    fn test_unparseable_weight_is_malformed() {
        let mut graph = Graph::new(GraphKind::Digraph);
        graph.add_edge(weighted("a", "b", "\"heavy\""));

        let err = prune_edges(&mut graph, 0.1).unwrap_err();

        assert!(matches!(
            err,
            PruneError::MalformedWeight { weight: Some(ref w), .. } if w == "\"heavy\""
        ));
    }

    #[test]
    fn test_failure_leaves_earlier_removals_in_place() {
        let mut graph = Graph::new(GraphKind::Digraph);
        graph.add_edge(weighted("a", "b", "0.01"));
        graph.add_edge(weighted("b", "c", "oops"));

        assert!(prune_edges(&mut graph, 0.5).is_err());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_edge_weight_accepts_exponent_and_padding() {
        assert_eq!(edge_weight(&weighted("a", "b", "\" 1e-3 \"")).unwrap(), 0.001);
        assert_eq!(edge_weight(&weighted("a", "b", "-2")).unwrap(), -2.0);
    }

    #[test]
    fn test_edge_weight_rejects_digit_separators() {
        let err = edge_weight(&weighted("a", "b", "\"1_000\"")).unwrap_err();

        assert!(matches!(err, PruneError::MalformedWeight { .. }));
    }
}
