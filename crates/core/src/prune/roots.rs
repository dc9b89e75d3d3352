//! Root lookup by node label

use std::collections::HashSet;

use crate::graph::{Graph, Node};
use crate::label;

/// Every node whose decoded label is one of `labels`
///
/// Unlabeled nodes never match. No match is an empty result, not an error.
pub fn find_nodes<'g>(graph: &'g Graph, labels: &HashSet<String>) -> Vec<&'g Node> {
    graph
        .nodes()
        .filter(|node| {
            node.label()
                .is_some_and(|raw| labels.contains(label::decode(raw)))
        })
        .collect()
}
