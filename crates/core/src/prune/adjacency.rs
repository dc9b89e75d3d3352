//! Undirected neighbor index over a graph's edges

use petgraph::graphmap::UnGraphMap;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::Bfs;

use crate::graph::Graph;

/// Undirected adjacency between the graph's name vertices
///
/// Built from the edge list only: a vertex that no edge touches is absent
/// from the map. Edge direction is ignored and parallel edges collapse
/// into one link.
#[derive(Debug)]
pub struct NeighborIndex {
    map: UnGraphMap<NodeIndex, ()>,
}

impl NeighborIndex {
    /// Link both endpoints of every edge
    pub fn build(graph: &Graph) -> Self {
        let mut map = UnGraphMap::new();
        for (from, to) in graph.edge_endpoints() {
            map.add_edge(from, to, ());
        }
        Self { map }
    }

    /// Breadth-first order of every vertex connected to `start`
    ///
    /// `start` comes first. A vertex with no edges yields only itself.
    pub fn reachable(&self, start: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut bfs = Bfs::new(&self.map, start);
        std::iter::from_fn(move || bfs.next(&self.map))
    }
}
