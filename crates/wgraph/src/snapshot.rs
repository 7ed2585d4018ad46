//! Versioned snapshots for persisting and rebuilding graphs.
//!
//! A snapshot is a flat, self-describing record set: the vertices as
//! `(key, value)` pairs and the edges as `(from, to, weight)` triples. JSON is
//! the on-disk format. Decoding never drops an edge silently: an edge that
//! cannot be applied fails the whole decode.

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::graph::{EdgeRecord, Graph, VertexRecord};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::io::{Read, Write};

/// Schema version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of a graph's vertices and edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot<K, V> {
    /// Schema version, see [`SNAPSHOT_VERSION`]
    pub version: u32,
    /// Vertices in insertion order
    pub vertices: Vec<VertexRecord<K, V>>,
    /// Directed edges
    pub edges: Vec<EdgeRecord<K>>,
}

impl<K, V> GraphSnapshot<K, V> {
    /// Create an empty snapshot at the current schema version.
    pub fn new() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<K, V> Default for GraphSnapshot<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Graph<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    /// Copy the graph into a snapshot.
    ///
    /// The vertex set is read under one registry lock, so the snapshot never
    /// contains an edge to a vertex it does not list.
    pub fn snapshot(&self) -> GraphSnapshot<K, V> {
        let registry = self.read_registry();

        let vertices = registry
            .vertices
            .values()
            .filter_map(|v| v.value().map(|value| VertexRecord::new(v.key().clone(), value)))
            .collect();

        GraphSnapshot {
            version: SNAPSHOT_VERSION,
            vertices,
            edges: registry.edge_records(),
        }
    }

    /// Build a new graph from a snapshot.
    ///
    /// # Errors
    ///
    /// See [`restore`](Self::restore).
    pub fn from_snapshot(snapshot: GraphSnapshot<K, V>) -> Result<Self> {
        let config = GraphConfig::default().with_capacity(snapshot.vertices.len());
        let graph = Self::with_config(config);
        graph.restore(snapshot)?;
        Ok(graph)
    }

    /// Apply a snapshot to this graph with `set` and `connect`.
    ///
    /// Existing vertices with the same keys get their values replaced and keep
    /// their edges. Edges are validated before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnsupportedVersion`] for a foreign schema version
    /// and [`GraphError::InvalidEdge`] for a self-loop or an edge whose
    /// endpoint is neither in the snapshot nor in the graph.
    pub fn restore(&self, snapshot: GraphSnapshot<K, V>) -> Result<()> {
        check_version(snapshot.version)?;

        {
            let known: HashSet<&K> = snapshot.vertices.iter().map(|r| &r.key).collect();
            for edge in &snapshot.edges {
                if edge.from == edge.to {
                    return Err(GraphError::invalid_edge(&edge.from, &edge.to, "self-loop"));
                }
                for endpoint in [&edge.from, &edge.to] {
                    if !known.contains(endpoint) && !self.contains(endpoint) {
                        return Err(GraphError::invalid_edge(
                            &edge.from,
                            &edge.to,
                            format!("unknown vertex {endpoint:?}"),
                        ));
                    }
                }
            }
        }

        debug!(
            "Restoring snapshot: {} vertices, {} edges",
            snapshot.vertices.len(),
            snapshot.edges.len()
        );

        for record in snapshot.vertices {
            self.set(record.key, record.value);
        }

        for edge in snapshot.edges {
            // an endpoint can still vanish under a concurrent delete
            if !self.connect(&edge.from, &edge.to, edge.weight) {
                return Err(GraphError::invalid_edge(
                    &edge.from,
                    &edge.to,
                    "endpoint missing while connecting",
                ));
            }
        }

        Ok(())
    }
}

impl<K, V> Graph<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + Serialize + DeserializeOwned,
    V: Clone + Serialize + DeserializeOwned,
{
    /// Encode the graph as a JSON snapshot.
    ///
    /// Pretty-printed when [`GraphConfig::pretty_json`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] if a key or value fails to serialize.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.snapshot();
        let encoded = if self.config().pretty_json {
            serde_json::to_string_pretty(&snapshot)
        } else {
            serde_json::to_string(&snapshot)
        };
        encoded.map_err(|e| GraphError::serialization("Failed to encode snapshot", Some(e)))
    }

    /// Write the graph as a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] on encode or I/O failure.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let snapshot = self.snapshot();
        let written = if self.config().pretty_json {
            serde_json::to_writer_pretty(writer, &snapshot)
        } else {
            serde_json::to_writer(writer, &snapshot)
        };
        written.map_err(|e| GraphError::serialization("Failed to write snapshot", Some(e)))
    }

    /// Decode a graph from a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] for malformed input, plus the
    /// errors of [`restore`](Self::restore).
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| GraphError::serialization("Failed to parse snapshot", Some(e)))?;
        Self::from_snapshot(decode_snapshot(value)?)
    }

    /// Read a graph from a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json), plus I/O failures.
    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)
            .map_err(|e| GraphError::serialization("Failed to read snapshot", Some(e)))?;
        Self::from_snapshot(decode_snapshot(value)?)
    }
}

fn check_version(found: u32) -> Result<()> {
    if found != SNAPSHOT_VERSION {
        return Err(GraphError::UnsupportedVersion {
            found,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(())
}

/// Check the version before the body, so a newer layout reports as a version
/// mismatch instead of a shape error.
fn decode_snapshot<K, V>(value: Value) -> Result<GraphSnapshot<K, V>>
where
    K: DeserializeOwned,
    V: DeserializeOwned,
{
    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            GraphError::serialization("Snapshot has no version field", None::<serde_json::Error>)
        })?;
    check_version(u32::try_from(version).unwrap_or(u32::MAX))?;

    serde_json::from_value(value)
        .map_err(|e| GraphError::serialization("Failed to decode snapshot", Some(e)))
}
