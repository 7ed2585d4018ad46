//! Error types for wgraph operations.
//!
//! Most graph operations signal invalid input through their return value
//! (`false` or `None`). Fallible operations that need a reason return
//! [`Result<T>`].

use thiserror::Error;

/// Result type alias for wgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for graph lookups and snapshot decoding.
#[derive(Error, Debug)]
pub enum GraphError {
    /// No vertex is registered under the key
    #[error("Vertex not found: {key}")]
    VertexNotFound {
        /// Debug rendering of the missing key
        key: String,
    },

    /// An edge in a snapshot cannot be applied to the graph
    #[error("Invalid edge {from} -> {to}: {reason}")]
    InvalidEdge {
        /// Debug rendering of the source key
        from: String,
        /// Debug rendering of the target key
        to: String,
        /// Why the edge was rejected
        reason: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Snapshot was written with a schema version this build cannot read
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the input
        found: u32,
        /// Version this build writes
        expected: u32,
    },
}

impl GraphError {
    /// Create a not-found error for any debuggable key.
    pub fn vertex_not_found(key: &impl std::fmt::Debug) -> Self {
        Self::VertexNotFound {
            key: format!("{key:?}"),
        }
    }

    /// Create an invalid-edge error for any debuggable keys.
    pub fn invalid_edge(
        from: &impl std::fmt::Debug,
        to: &impl std::fmt::Debug,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEdge {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
            reason: reason.into(),
        }
    }

    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }
}
