//! Main `Graph` interface: the key → vertex registry and edge operations.

use super::types::{EdgeRecord, VertexId, Weight};
use super::vertex::{lock_pair, read_pair, Vertex};
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::search::{self, Route};
use log::{debug, trace};
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

/// The registry guarded by the graph lock: which keys map to which vertices.
pub(crate) struct Registry<K, V> {
    pub(crate) vertices: BTreeMap<VertexId, Vertex<K, V>>,
    keys: HashMap<K, VertexId>,
    next_id: VertexId,
}

impl<K: Eq + Hash, V> Registry<K, V> {
    pub(crate) fn resolve(&self, key: &K) -> Option<&Vertex<K, V>> {
        self.keys.get(key).and_then(|id| self.vertices.get(id))
    }

    /// Resolve two distinct keys. `None` if they are equal or either is unknown.
    fn resolve_pair(&self, from: &K, to: &K) -> Option<(&Vertex<K, V>, &Vertex<K, V>)> {
        if from == to {
            return None;
        }
        Some((self.resolve(from)?, self.resolve(to)?))
    }

    fn keys_of(&self, edges: HashMap<VertexId, Weight>) -> HashMap<K, Weight>
    where
        K: Clone,
    {
        edges
            .into_iter()
            .filter_map(|(id, weight)| self.vertices.get(&id).map(|v| (v.key().clone(), weight)))
            .collect()
    }

    /// Every directed edge, grouped by source vertex in insertion order.
    pub(crate) fn edge_records(&self) -> Vec<EdgeRecord<K>>
    where
        K: Clone,
    {
        let mut records = Vec::new();

        for vertex in self.vertices.values() {
            let mut targets: Vec<_> = vertex.outgoing().into_iter().collect();
            targets.sort_unstable_by_key(|(id, _)| *id);

            for (target, weight) in targets {
                if let Some(to) = self.vertices.get(&target) {
                    records.push(EdgeRecord::new(vertex.key().clone(), to.key().clone(), weight));
                }
            }
        }

        records
    }
}

/// A thread-safe, weighted, directed graph.
///
/// Vertices are addressed by key and hold an arbitrary value. Every operation
/// takes `&self`; share the graph between threads with an `Arc`.
///
/// Two lock tiers protect the graph. The registry lock guards the key → vertex
/// mapping and is held exclusively only to insert or delete vertices. Each
/// vertex has its own lock over its value and edge maps. Operations touching
/// two vertices lock them in ascending [`VertexId`] order.
///
/// # Example
///
/// ```
/// use wgraph::Graph;
///
/// let graph = Graph::new();
/// graph.set("a", 1);
/// graph.set("b", 2);
/// assert!(graph.connect(&"a", &"b", 5));
/// assert_eq!(graph.is_connected(&"a", &"b"), Some(5));
/// assert_eq!(graph.is_connected(&"b", &"a"), None);
/// ```
pub struct Graph<K, V> {
    registry: RwLock<Registry<K, V>>,
    config: GraphConfig,
}

impl<K, V> Graph<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    /// Create an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty graph with the given configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            registry: RwLock::new(Registry {
                vertices: BTreeMap::new(),
                keys: HashMap::with_capacity(config.initial_capacity),
                next_id: 0,
            }),
            config,
        }
    }

    /// The configuration this graph was created with.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Number of vertices in the graph.
    pub fn len(&self) -> usize {
        self.registry.read().vertices.len()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.registry.read().vertices.is_empty()
    }

    /// Whether a vertex is registered under `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.registry.read().keys.contains_key(key)
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        let registry = self.registry.read();
        registry.vertices.values().map(Vertex::out_degree).sum()
    }

    /// Store `value` under `key`.
    ///
    /// Creates a vertex with no edges if the key is new. Otherwise only the
    /// value is replaced and all edges stay intact.
    pub fn set(&self, key: K, value: V) {
        {
            let registry = self.registry.read();
            if let Some(vertex) = registry.resolve(&key) {
                vertex.write().value = value;
                trace!("Updated value of vertex {key:?}");
                return;
            }
        }

        let mut registry = self.registry.write();
        // another writer may have inserted the key between the two locks
        if let Some(vertex) = registry.resolve(&key) {
            vertex.write().value = value;
            trace!("Updated value of vertex {key:?}");
            return;
        }

        let id = registry.next_id;
        registry.next_id += 1;
        debug!("Adding vertex: id={id}, key={key:?}");
        registry.keys.insert(key.clone(), id);
        registry.vertices.insert(id, Vertex::new(id, key, value));
    }

    /// Delete the vertex under `key` together with every edge touching it.
    ///
    /// Returns `false` if the key is unknown. Handles to the deleted vertex
    /// stay usable but report no value and no edges.
    pub fn delete(&self, key: &K) -> bool {
        let mut registry = self.registry.write();

        let Some(vertex) = registry.resolve(key).cloned() else {
            return false;
        };
        let id = vertex.id();
        debug!("Deleting vertex: id={id}, key={key:?}");

        let (outgoing, incoming) = vertex.detach();
        trace!(
            "Stripping {} incoming and {} outgoing edges of vertex {id}",
            incoming.len(),
            outgoing.len()
        );

        // one neighbor lock at a time
        for source in incoming.keys() {
            if let Some(neighbor) = registry.vertices.get(source) {
                neighbor.write().outgoing.remove(&id);
            }
        }
        for target in outgoing.keys() {
            if let Some(neighbor) = registry.vertices.get(target) {
                neighbor.write().incoming.remove(&id);
            }
        }

        registry.keys.remove(key);
        registry.vertices.remove(&id);

        true
    }

    /// Get a handle to the vertex under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if the key is unknown.
    pub fn get(&self, key: &K) -> Result<Vertex<K, V>> {
        self.registry
            .read()
            .resolve(key)
            .cloned()
            .ok_or_else(|| GraphError::vertex_not_found(key))
    }

    /// Handles to all vertices, in insertion order.
    pub fn get_all(&self) -> Vec<Vertex<K, V>> {
        self.registry.read().vertices.values().cloned().collect()
    }

    /// Create or overwrite the directed edge `from → to`.
    ///
    /// Returns `false` if the keys are equal (self-loops are rejected) or if
    /// either key is unknown.
    pub fn connect(&self, from: &K, to: &K, weight: Weight) -> bool {
        let registry = self.registry.read();
        let Some((from_v, to_v)) = registry.resolve_pair(from, to) else {
            return false;
        };

        let (mut from_state, mut to_state) = lock_pair(from_v, to_v);
        from_state.outgoing.insert(to_v.id(), weight);
        to_state.incoming.insert(from_v.id(), weight);
        trace!("Connected {from:?} -> {to:?} (weight={weight})");

        true
    }

    /// Remove the directed edge `from → to`.
    ///
    /// Returns `false` under the same conditions as [`connect`](Self::connect).
    /// Removing an edge that does not exist is a successful no-op.
    pub fn disconnect(&self, from: &K, to: &K) -> bool {
        let registry = self.registry.read();
        let Some((from_v, to_v)) = registry.resolve_pair(from, to) else {
            return false;
        };

        let (mut from_state, mut to_state) = lock_pair(from_v, to_v);
        from_state.outgoing.remove(&to_v.id());
        to_state.incoming.remove(&from_v.id());
        trace!("Disconnected {from:?} -> {to:?}");

        true
    }

    /// Weight of the directed edge `from → to`, if there is one.
    ///
    /// Returns `None` if the keys are equal, either is unknown, or the edge
    /// does not exist.
    pub fn is_connected(&self, from: &K, to: &K) -> Option<Weight> {
        let registry = self.registry.read();
        let (from_v, to_v) = registry.resolve_pair(from, to)?;

        let (from_state, to_state) = read_pair(from_v, to_v);
        // look in the smaller of the two maps
        if from_state.outgoing.len() < to_state.incoming.len() {
            from_state.outgoing.get(&to_v.id()).copied()
        } else {
            to_state.incoming.get(&from_v.id()).copied()
        }
    }

    /// Connect `a` and `b` in both directions with the same weight.
    ///
    /// Each direction is applied as its own atomic step.
    pub fn connect_undirected(&self, a: &K, b: &K, weight: Weight) -> bool {
        self.connect(a, b, weight) && self.connect(b, a, weight)
    }

    /// Remove the edges between `a` and `b` in both directions.
    pub fn disconnect_undirected(&self, a: &K, b: &K) -> bool {
        self.disconnect(a, b) && self.disconnect(b, a)
    }

    /// Outgoing edges of the vertex under `key`, as target key → weight.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if the key is unknown.
    pub fn outgoing(&self, key: &K) -> Result<HashMap<K, Weight>> {
        let registry = self.registry.read();
        let vertex = registry
            .resolve(key)
            .ok_or_else(|| GraphError::vertex_not_found(key))?;
        Ok(registry.keys_of(vertex.outgoing()))
    }

    /// Incoming edges of the vertex under `key`, as source key → weight.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if the key is unknown.
    pub fn incoming(&self, key: &K) -> Result<HashMap<K, Weight>> {
        let registry = self.registry.read();
        let vertex = registry
            .resolve(key)
            .ok_or_else(|| GraphError::vertex_not_found(key))?;
        Ok(registry.keys_of(vertex.incoming()))
    }

    /// All directed edges, grouped by source vertex in insertion order.
    pub fn edges(&self) -> Vec<EdgeRecord<K>> {
        self.registry.read().edge_records()
    }

    /// Find the cheapest path from `start` to `end` with A* search.
    ///
    /// `heuristic(key, end)` estimates the remaining cost from `key`. The
    /// result is optimal when edge weights are non-negative and the heuristic
    /// never overestimates. The heuristic runs while the registry read lock
    /// is held and must not call back into this graph.
    ///
    /// Returns `None` if either key is unknown or `end` is unreachable. The
    /// route lists keys from `end` back to `start`.
    pub fn shortest_path<H>(&self, start: &K, end: &K, heuristic: H) -> Option<Route<K>>
    where
        H: FnMut(&K, &K) -> Weight,
    {
        search::astar(self, start, end, heuristic)
    }

    /// A* with the zero heuristic, i.e. Dijkstra's algorithm.
    pub fn shortest_path_dijkstra(&self, start: &K, end: &K) -> Option<Route<K>> {
        self.shortest_path(start, end, |_, _| 0)
    }

    pub(crate) fn read_registry(&self) -> RwLockReadGuard<'_, Registry<K, V>> {
        self.registry.read()
    }
}

impl<K, V> Default for Graph<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Graph<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.registry.read().vertices.len())
            .field("config", &self.config)
            .finish()
    }
}
