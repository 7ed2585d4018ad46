//! # wgraph
//!
//! A thread-safe, weighted, directed graph with A* shortest-path search.
//!
//! ## Core Principles
//!
//! - **Shared, not global**: every operation takes `&self`; the graph locks the
//!   key registry and each vertex separately
//! - **Symmetric edges**: an edge is always visible from both endpoints or not
//!   at all
//! - **No surprises**: invalid edge operations return `false`, lookups return
//!   [`Result`], nothing panics
//!
//! ## Architecture
//!
//! ```text
//! Snapshots (versioned JSON)
//!     ↓
//! Search (A*, indexed heap)
//!     ↓
//! Graph (registry lock → vertex locks)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wgraph::Graph;
//!
//! let graph = Graph::new();
//! for (key, value) in [("1", 123), ("2", 678), ("3", 9), ("4", 0)] {
//!     graph.set(key, value);
//! }
//! graph.connect(&"1", &"2", 5);
//! graph.connect(&"2", &"3", 1);
//! graph.connect(&"3", &"1", 9);
//! graph.connect(&"4", &"2", 3);
//!
//! let route = graph.shortest_path_dijkstra(&"1", &"3").unwrap();
//! assert_eq!(route.cost, 6);
//! // keys run from the end vertex back to the start
//! assert_eq!(route.keys, vec!["3", "2", "1"]);
//!
//! assert!(graph.shortest_path_dijkstra(&"1", &"4").is_none());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod graph;
pub mod search;
pub mod snapshot;

// Re-export main types
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use graph::{EdgeRecord, Graph, Vertex, VertexId, VertexRecord, Weight};
pub use search::Route;
pub use snapshot::{GraphSnapshot, SNAPSHOT_VERSION};
