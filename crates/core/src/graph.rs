//! Graph model for DOT documents
//!
//! Uses `petgraph::StableGraph` keyed by node name so that indices remain
//! stable while the pruning passes delete nodes and edges. Each name vertex
//! holds every node statement declared under that name, which lets lookups
//! by name return a sequence when a document declares a node twice.
//!
//! A vertex may carry no declarations at all: edges can mention names that
//! never get a node statement, and an edge may outlive the node records of
//! one of its endpoints.

use std::collections::HashMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Whether the document is a `graph` or a `digraph`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GraphKind {
    Graph,
    Digraph,
}

impl GraphKind {
    /// Keyword opening the document
    pub fn keyword(self) -> &'static str {
        match self {
            GraphKind::Graph => "graph",
            GraphKind::Digraph => "digraph",
        }
    }

    /// Edge operator used between endpoints
    pub fn edge_op(self) -> &'static str {
        match self {
            GraphKind::Graph => "--",
            GraphKind::Digraph => "->",
        }
    }

    pub fn is_directed(self) -> bool {
        matches!(self, GraphKind::Digraph)
    }
}

/// Ordered `key=value` pairs, values kept in raw form (quotes included)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Raw value of `key`; the last assignment wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing an earlier value in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.set(key, value);
        }
        attributes
    }
}

/// A node statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    /// Node ID as written in the document
    name: String,
    attributes: Attributes,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_attributes(name, Attributes::new())
    }

    pub fn with_attributes(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw `label` attribute
    pub fn label(&self) -> Option<&str> {
        self.attributes.get("label")
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// An edge between two node names
///
/// Stored directed (source → destination); the `label` attribute carries
/// the edge weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    source: String,
    destination: String,
    attributes: Attributes,
}

impl Edge {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::with_attributes(source, destination, Attributes::new())
    }

    pub fn with_attributes(
        source: impl Into<String>,
        destination: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            attributes,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Raw `label` attribute (the edge weight)
    pub fn label(&self) -> Option<&str> {
        self.attributes.get("label")
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Target of an attribute statement such as `node [shape=box]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DefaultsTarget {
    Graph,
    Node,
    Edge,
}

impl DefaultsTarget {
    pub fn keyword(self) -> &'static str {
        match self {
            DefaultsTarget::Graph => "graph",
            DefaultsTarget::Node => "node",
            DefaultsTarget::Edge => "edge",
        }
    }
}

/// Graph-level statements, carried through pruning untouched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum GraphStatement {
    /// `name = value`
    Assign { name: String, value: String },
    /// `graph|node|edge [attributes]`
    Defaults {
        target: DefaultsTarget,
        attributes: Attributes,
    },
}

/// All declarations sharing one node name
#[derive(Debug, Clone)]
struct Vertex {
    name: String,
    declarations: Vec<Node>,
}

/// A DOT graph
#[derive(Debug, Clone)]
pub struct Graph {
    kind: GraphKind,
    strict: bool,
    id: Option<String>,
    statements: Vec<GraphStatement>,
    /// The underlying stable graph (private to enforce encapsulation)
    inner: StableGraph<Vertex, Edge>,
    /// Name to vertex lookup, kept in sync with `inner`
    by_name: HashMap<String, NodeIndex>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            strict: false,
            id: None,
            statements: Vec::new(),
            inner: StableGraph::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn statements(&self) -> &[GraphStatement] {
        &self.statements
    }

    pub fn push_statement(&mut self, statement: GraphStatement) {
        self.statements.push(statement);
    }

    /// Add a node declaration
    ///
    /// Declaring a name twice keeps both records.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        let index = self.vertex(node.name());
        if let Some(vertex) = self.inner.node_weight_mut(index) {
            vertex.declarations.push(node);
        }
        index
    }

    /// Add an edge, creating vertices for unseen endpoint names
    pub fn add_edge(&mut self, edge: Edge) -> EdgeIndex {
        let from = self.vertex(edge.source());
        let to = self.vertex(edge.destination());
        self.inner.add_edge(from, to, edge)
    }

    /// Iterate over every node declaration
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner
            .node_weights()
            .flat_map(|vertex| vertex.declarations.iter())
    }

    /// All declarations for `name`; empty if the name is unknown or was swept
    pub fn node(&self, name: &str) -> &[Node] {
        self.vertex_index(name)
            .map(|index| self.declarations_at(index))
            .unwrap_or(&[])
    }

    /// Iterate over all edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.inner.edge_weights()
    }

    /// Number of node declarations
    pub fn node_count(&self) -> usize {
        self.inner
            .node_weights()
            .map(|vertex| vertex.declarations.len())
            .sum()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Vertex holding `name`, if any declaration or edge mentions it
    pub fn vertex_index(&self, name: &str) -> Option<NodeIndex> {
        self.by_name.get(name).copied()
    }

    /// Declarations stored on the vertex at `index`
    pub(crate) fn declarations_at(&self, index: NodeIndex) -> &[Node] {
        self.inner
            .node_weight(index)
            .map(|vertex| vertex.declarations.as_slice())
            .unwrap_or(&[])
    }

    /// `(source, target)` vertex pairs, one per edge
    pub(crate) fn edge_endpoints(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.inner
            .edge_indices()
            .filter_map(|edge| self.inner.edge_endpoints(edge))
    }

    /// Delete every declaration of `name`
    ///
    /// Edges touching `name` are left alone. Returns the number of
    /// declarations removed.
    pub fn remove_node(&mut self, name: &str) -> usize {
        let Some(&index) = self.by_name.get(name) else {
            return 0;
        };
        let removed = self
            .inner
            .node_weight_mut(index)
            .map(|vertex| std::mem::take(&mut vertex.declarations).len())
            .unwrap_or(0);
        self.release_vertex(name);
        removed
    }

    /// Delete every edge stored under the `(source, destination)` key
    ///
    /// Parallel edges sharing the key go together. The reversed key is a
    /// different key, in a `graph` as well as a `digraph`, and is left
    /// alone. Returns the number of edges removed.
    pub fn remove_edge(&mut self, source: &str, destination: &str) -> usize {
        let doomed = self.edges_between(source, destination);
        for &index in &doomed {
            self.inner.remove_edge(index);
        }
        self.release_vertex(source);
        self.release_vertex(destination);
        doomed.len()
    }

    fn edges_between(&self, source: &str, destination: &str) -> Vec<EdgeIndex> {
        match (self.by_name.get(source), self.by_name.get(destination)) {
            (Some(&from), Some(&to)) => self
                .inner
                .edges(from)
                .filter(|edge| edge.target() == to)
                .map(|edge| edge.id())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn vertex(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.by_name.get(name) {
            return index;
        }
        let index = self.inner.add_node(Vertex {
            name: name.to_string(),
            declarations: Vec::new(),
        });
        self.by_name.insert(name.to_string(), index);
        index
    }

    /// Drop a vertex once nothing refers to it any more
    fn release_vertex(&mut self, name: &str) {
        let Some(&index) = self.by_name.get(name) else {
            return;
        };
        let unused = self
            .inner
            .node_weight(index)
            .is_some_and(|vertex| vertex.declarations.is_empty())
            && self.inner.neighbors_undirected(index).next().is_none();
        if unused {
            if let Some(vertex) = self.inner.remove_node(index) {
                self.by_name.remove(&vertex.name);
            }
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(GraphKind::Digraph)
    }
}
