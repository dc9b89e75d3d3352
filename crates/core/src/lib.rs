//! dotprune Core Library
//!
//! Prunes weighted DOT graphs: edges lighter than a threshold are dropped,
//! then every node that can no longer reach a root node is collected.
//! The [`dot`] module reads and writes the text form, [`prune`] holds the
//! passes, and [`transform`] wires them to strings, files and directories.

pub mod discovery;
pub mod dot;
pub mod error;
pub mod graph;
pub mod label;
pub mod prune;
pub mod transform;

// Re-export commonly used types
pub use error::{DotError, Error, PruneError};
pub use graph::{Attributes, Edge, Graph, GraphKind, Node};
pub use prune::{prune, PruneOptions, PruneReport};
pub use transform::{transform, transform_dir, transform_file};
