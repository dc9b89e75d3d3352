//! Reachability walks over the neighbor index

use super::adjacency::NeighborIndex;
use crate::graph::{Graph, Node};

/// Breadth-first walker over one graph snapshot
///
/// The neighbor index is built once in [`Walker::new`]; every call to
/// [`Walker::walk`] starts with a fresh visited set.
pub struct Walker<'g> {
    graph: &'g Graph,
    index: NeighborIndex,
}

impl<'g> Walker<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            index: NeighborIndex::build(graph),
        }
    }

    /// Visit every name reachable from `start`
    ///
    /// `visit` runs once per node declaration of each reached name, so a
    /// name declared twice is reported twice. Names without declarations
    /// (implicit or already swept) are still traversed. Traversal order is
    /// unspecified. Returns the number of distinct names reached, `start`
    /// included; a name the graph has never seen reaches nothing.
    pub fn walk<F>(&self, start: &str, mut visit: F) -> usize
    where
        F: FnMut(&'g Node),
    {
        let graph = self.graph;
        let Some(start) = graph.vertex_index(start) else {
            return 0;
        };

        let mut reached = 0;
        for index in self.index.reachable(start) {
            reached += 1;
            for node in graph.declarations_at(index) {
                visit(node);
            }
        }
        reached
    }
}

/// Walk `graph` from `start`, building a fresh neighbor index
pub fn walk<F>(graph: &Graph, start: &str, visit: F) -> usize
where
    F: FnMut(&Node),
{
    Walker::new(graph).walk(start, visit)
}
