//! Core graph types and operations.
//!
//! This module defines the fundamental building blocks:
//! - [`Vertex`]: a keyed value with weighted edge maps
//! - [`Graph`]: the thread-safe registry of vertices
//! - [`EdgeRecord`] / [`VertexRecord`]: flat records used by snapshots

mod digraph;
mod types;
mod vertex;

pub use digraph::Graph;
pub use types::{EdgeRecord, VertexId, VertexRecord, Weight};
pub use vertex::Vertex;
