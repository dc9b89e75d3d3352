//! Error types shared by the DOT boundary, the pruning passes and the
//! file drivers.

use std::path::PathBuf;

/// Errors from reading DOT text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DotError {
    /// The text is not a DOT document this reader understands.
    #[error("malformed DOT document: {message}")]
    MalformedDocument { message: String },
}

/// Errors from the pruning passes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PruneError {
    /// An edge weight is missing or is not a floating-point literal.
    ///
    /// `from` and `to` name the edge endpoints.
    #[error("malformed weight on edge {from} -> {to}: {}", .weight.as_deref().unwrap_or("<missing>"))]
    MalformedWeight {
        from: String,
        to: String,
        weight: Option<String>,
    },
}

/// Top-level error for the transform drivers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Dot(#[from] DotError),

    #[error(transparent)]
    Prune(#[from] PruneError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
