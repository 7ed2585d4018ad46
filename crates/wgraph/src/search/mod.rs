//! Shortest-path search.
//!
//! - [`IndexedHeap`]: min-heap whose items can be removed by handle
//! - A* search, exposed through [`Graph::shortest_path`](crate::Graph::shortest_path)

mod astar;
pub mod queue;

pub(crate) use astar::astar;
pub use astar::Route;
pub use queue::{HeapItem, IndexedHeap, ItemId};
