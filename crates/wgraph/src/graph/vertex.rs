//! Vertex handles and their lock-guarded state.

use super::types::{VertexId, Weight};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Mutable part of a vertex, guarded by the vertex's own lock.
#[derive(Debug)]
pub(crate) struct VertexState<V> {
    pub(crate) value: V,
    pub(crate) outgoing: HashMap<VertexId, Weight>,
    pub(crate) incoming: HashMap<VertexId, Weight>,
    pub(crate) removed: bool,
}

struct VertexInner<K, V> {
    id: VertexId,
    key: K,
    state: RwLock<VertexState<V>>,
}

/// A shared handle to a vertex in a [`Graph`](crate::Graph).
///
/// Handles are cheap to clone and stay valid after the vertex is deleted.
/// A handle to a deleted vertex keeps its key and id, but reports no value
/// and no edges.
pub struct Vertex<K, V> {
    inner: Arc<VertexInner<K, V>>,
}

impl<K, V> Clone for Vertex<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Vertex<K, V> {
    pub(crate) fn new(id: VertexId, key: K, value: V) -> Self {
        Self {
            inner: Arc::new(VertexInner {
                id,
                key,
                state: RwLock::new(VertexState {
                    value,
                    outgoing: HashMap::new(),
                    incoming: HashMap::new(),
                    removed: false,
                }),
            }),
        }
    }

    /// The vertex's stable id within its graph.
    pub fn id(&self) -> VertexId {
        self.inner.id
    }

    /// The vertex's key.
    pub fn key(&self) -> &K {
        &self.inner.key
    }

    /// Whether the vertex has been deleted from its graph.
    pub fn is_removed(&self) -> bool {
        self.read().removed
    }

    /// Outgoing edges as target id → weight. Empty once removed.
    pub fn outgoing(&self) -> HashMap<VertexId, Weight> {
        self.read().outgoing.clone()
    }

    /// Incoming edges as source id → weight. Empty once removed.
    pub fn incoming(&self) -> HashMap<VertexId, Weight> {
        self.read().incoming.clone()
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self) -> usize {
        self.read().outgoing.len()
    }

    /// Number of incoming edges.
    pub fn in_degree(&self) -> usize {
        self.read().incoming.len()
    }

    /// Whether two handles refer to the same vertex.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, VertexState<V>> {
        self.inner.state.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, VertexState<V>> {
        self.inner.state.write()
    }

    /// Marks the vertex removed and hands back its edge maps as
    /// `(outgoing, incoming)`.
    pub(crate) fn detach(&self) -> (HashMap<VertexId, Weight>, HashMap<VertexId, Weight>) {
        let mut state = self.write();
        state.removed = true;
        (
            std::mem::take(&mut state.outgoing),
            std::mem::take(&mut state.incoming),
        )
    }
}

impl<K, V: Clone> Vertex<K, V> {
    /// A copy of the stored value, or `None` once the vertex was removed.
    pub fn value(&self) -> Option<V> {
        let state = self.read();
        if state.removed {
            return None;
        }
        Some(state.value.clone())
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Vertex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("id", &self.inner.id)
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

/// Write-locks two distinct vertices in ascending id order.
///
/// Guards are returned in argument order.
pub(crate) fn lock_pair<'a, K, V>(
    a: &'a Vertex<K, V>,
    b: &'a Vertex<K, V>,
) -> (
    RwLockWriteGuard<'a, VertexState<V>>,
    RwLockWriteGuard<'a, VertexState<V>>,
) {
    debug_assert_ne!(a.id(), b.id());
    if a.id() < b.id() {
        let first = a.write();
        let second = b.write();
        (first, second)
    } else {
        let second = b.write();
        let first = a.write();
        (first, second)
    }
}

/// Read-locks two distinct vertices in ascending id order.
pub(crate) fn read_pair<'a, K, V>(
    a: &'a Vertex<K, V>,
    b: &'a Vertex<K, V>,
) -> (
    RwLockReadGuard<'a, VertexState<V>>,
    RwLockReadGuard<'a, VertexState<V>>,
) {
    debug_assert_ne!(a.id(), b.id());
    if a.id() < b.id() {
        let first = a.read();
        let second = b.read();
        (first, second)
    } else {
        let second = b.read();
        let first = a.read();
        (first, second)
    }
}
