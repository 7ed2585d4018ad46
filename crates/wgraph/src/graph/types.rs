//! Core graph types: ids, weights, and the flat records used for snapshots.

use serde::{Deserialize, Serialize};

/// Stable identifier for a vertex (monotonic counter, never reused).
pub type VertexId = u64;

/// Edge weight and accumulated path cost.
pub type Weight = i64;

/// A directed edge addressed by vertex keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRecord<K> {
    /// Source vertex key
    pub from: K,
    /// Target vertex key
    pub to: K,
    /// Edge weight
    pub weight: Weight,
}

impl<K> EdgeRecord<K> {
    /// Create a new edge record.
    pub fn new(from: K, to: K, weight: Weight) -> Self {
        Self { from, to, weight }
    }
}

/// A vertex key with its stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord<K, V> {
    /// Vertex key
    pub key: K,
    /// Stored value
    pub value: V,
}

impl<K, V> VertexRecord<K, V> {
    /// Create a new vertex record.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}
