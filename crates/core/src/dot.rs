//! DOT text boundary
//!
//! Reading and printing go through `graphviz-rust`; this module maps its
//! syntax tree onto [`Graph`] and back. Edge chains expand to one edge per
//! hop. Attribute values are never interpreted here: IDs are stored and
//! written back raw, quotes and HTML brackets included.
//!
//! Subgraphs and ports have no counterpart in [`Graph`] and are rejected.

use dot_structures as ast;
use graphviz_rust::printer::{DotPrinter, PrinterContext};

use crate::error::DotError;
use crate::graph::{Attributes, DefaultsTarget, Edge, Graph, GraphKind, GraphStatement, Node};

/// Parse DOT text into a graph
///
/// # Errors
///
/// Returns [`DotError::MalformedDocument`] when the text is not a DOT
/// document, or uses subgraphs or ports.
///
/// # Example
/// ```
/// use dotprune_core::dot;
///
/// let graph = dot::parse("digraph { a -> b [label=\"0.5\"] }").unwrap();
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub fn parse(text: &str) -> Result<Graph, DotError> {
    let document = graphviz_rust::parse(text).map_err(malformed)?;
    from_document(document)
}

/// Render a graph as DOT text
///
/// Graph statements come first, then node declarations, then edges.
pub fn serialize(graph: &Graph) -> String {
    to_document(graph).print(&mut PrinterContext::default())
}

fn malformed(message: impl Into<String>) -> DotError {
    DotError::MalformedDocument {
        message: message.into(),
    }
}

fn from_document(document: ast::Graph) -> Result<Graph, DotError> {
    let (kind, id, strict, stmts) = match document {
        ast::Graph::Graph { id, strict, stmts } => (GraphKind::Graph, id, strict, stmts),
        ast::Graph::DiGraph { id, strict, stmts } => (GraphKind::Digraph, id, strict, stmts),
    };

    let mut graph = Graph::new(kind);
    graph.set_strict(strict);
    if !matches!(id, ast::Id::Anonymous(_)) {
        graph.set_id(id_text(id));
    }
    for stmt in stmts {
        add_statement(&mut graph, stmt)?;
    }
    Ok(graph)
}

fn add_statement(graph: &mut Graph, stmt: ast::Stmt) -> Result<(), DotError> {
    match stmt {
        ast::Stmt::Node(node) => {
            let name = node_name(node.id)?;
            graph.add_node(Node::with_attributes(name, attribute_list(node.attributes)));
        }
        ast::Stmt::Edge(edge) => {
            let vertices = match edge.ty {
                ast::EdgeTy::Pair(from, to) => vec![from, to],
                ast::EdgeTy::Chain(vertices) => vertices,
            };
            let names = vertices
                .into_iter()
                .map(vertex_name)
                .collect::<Result<Vec<_>, _>>()?;
            let attributes = attribute_list(edge.attributes);
            for hop in names.windows(2) {
                graph.add_edge(Edge::with_attributes(
                    hop[0].as_str(),
                    hop[1].as_str(),
                    attributes.clone(),
                ));
            }
        }
        ast::Stmt::Attribute(ast::Attribute(name, value)) => {
            graph.push_statement(GraphStatement::Assign {
                name: id_text(name),
                value: id_text(value),
            });
        }
        ast::Stmt::GAttribute(defaults) => {
            let (target, attributes) = match defaults {
                ast::GraphAttributes::Graph(attributes) => (DefaultsTarget::Graph, attributes),
                ast::GraphAttributes::Node(attributes) => (DefaultsTarget::Node, attributes),
                ast::GraphAttributes::Edge(attributes) => (DefaultsTarget::Edge, attributes),
            };
            graph.push_statement(GraphStatement::Defaults {
                target,
                attributes: attribute_list(attributes),
            });
        }
        ast::Stmt::Subgraph(_) => return Err(malformed("subgraphs are not supported")),
    }
    Ok(())
}

fn vertex_name(vertex: ast::Vertex) -> Result<String, DotError> {
    match vertex {
        ast::Vertex::N(node_id) => node_name(node_id),
        ast::Vertex::S(_) => Err(malformed("subgraphs are not supported")),
    }
}

fn node_name(node_id: ast::NodeId) -> Result<String, DotError> {
    match node_id {
        ast::NodeId(id, None) => Ok(id_text(id)),
        ast::NodeId(_, Some(_)) => Err(malformed("ports are not supported")),
    }
}

fn attribute_list(attributes: Vec<ast::Attribute>) -> Attributes {
    attributes
        .into_iter()
        .map(|ast::Attribute(key, value)| (id_text(key), id_text(value)))
        .collect()
}

fn id_text(id: ast::Id) -> String {
    match id {
        ast::Id::Html(text)
        | ast::Id::Escaped(text)
        | ast::Id::Plain(text)
        | ast::Id::Anonymous(text) => text,
    }
}

/// Raw ID text back into the syntax tree, classified by its first character
fn to_id(text: &str) -> ast::Id {
    if text.starts_with('"') {
        ast::Id::Escaped(text.to_string())
    } else if text.starts_with('<') {
        ast::Id::Html(text.to_string())
    } else {
        ast::Id::Plain(text.to_string())
    }
}

fn to_attributes(attributes: &Attributes) -> Vec<ast::Attribute> {
    attributes
        .iter()
        .map(|(key, value)| ast::Attribute(to_id(key), to_id(value)))
        .collect()
}

fn to_vertex(name: &str) -> ast::Vertex {
    ast::Vertex::N(ast::NodeId(to_id(name), None))
}

fn to_document(graph: &Graph) -> ast::Graph {
    let mut stmts: Vec<ast::Stmt> = graph
        .statements()
        .iter()
        .map(|statement| match statement {
            GraphStatement::Assign { name, value } => {
                ast::Stmt::Attribute(ast::Attribute(to_id(name), to_id(value)))
            }
            GraphStatement::Defaults { target, attributes } => {
                let attributes = to_attributes(attributes);
                ast::Stmt::GAttribute(match target {
                    DefaultsTarget::Graph => ast::GraphAttributes::Graph(attributes),
                    DefaultsTarget::Node => ast::GraphAttributes::Node(attributes),
                    DefaultsTarget::Edge => ast::GraphAttributes::Edge(attributes),
                })
            }
        })
        .collect();

    stmts.extend(graph.nodes().map(|node| {
        ast::Stmt::Node(ast::Node {
            id: ast::NodeId(to_id(node.name()), None),
            attributes: to_attributes(node.attributes()),
        })
    }));
    stmts.extend(graph.edges().map(|edge| {
        ast::Stmt::Edge(ast::Edge {
            ty: ast::EdgeTy::Pair(to_vertex(edge.source()), to_vertex(edge.destination())),
            attributes: to_attributes(edge.attributes()),
        })
    }));

    let id = graph
        .id()
        .map(to_id)
        .unwrap_or_else(|| ast::Id::Anonymous(String::new()));
    let strict = graph.is_strict();
    match graph.kind() {
        GraphKind::Graph => ast::Graph::Graph { id, strict, stmts },
        GraphKind::Digraph => ast::Graph::DiGraph { id, strict, stmts },
    }
}
