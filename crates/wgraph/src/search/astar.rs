//! A* shortest-path search over a [`Graph`].

use super::queue::{HeapItem, IndexedHeap, ItemId};
use crate::graph::{Graph, VertexId, Weight};
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A path found by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<K> {
    /// Vertex keys from the end vertex back to the start vertex
    pub keys: Vec<K>,
    /// Sum of the edge weights along the path
    pub cost: Weight,
}

impl<K> Route<K> {
    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.keys.len().saturating_sub(1)
    }

    /// The start vertex key.
    pub fn start(&self) -> Option<&K> {
        self.keys.last()
    }

    /// The end vertex key.
    pub fn end(&self) -> Option<&K> {
        self.keys.first()
    }
}

/// Open-set entry for one vertex.
#[derive(Debug)]
struct SearchItem {
    vertex: VertexId,
    prev: Option<VertexId>,
    /// true cost from the start (g)
    cost: Weight,
    /// g + h
    priority: Weight,
    heap_index: Option<usize>,
}

impl HeapItem for SearchItem {
    fn priority(&self) -> Weight {
        self.priority
    }

    fn heap_index(&self) -> Option<usize> {
        self.heap_index
    }

    fn set_heap_index(&mut self, index: Option<usize>) {
        self.heap_index = index;
    }
}

/// Run A* from `start_key` to `end_key`.
///
/// Holds the graph's registry read lock for the whole query; each expansion
/// snapshots the current vertex's outgoing edges under its own lock.
pub(crate) fn astar<K, V, H>(
    graph: &Graph<K, V>,
    start_key: &K,
    end_key: &K,
    mut heuristic: H,
) -> Option<Route<K>>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
    H: FnMut(&K, &K) -> Weight,
{
    let registry = graph.read_registry();
    let start = registry.resolve(start_key)?.id();
    let end = registry.resolve(end_key)?.id();
    debug!("A* search: start={start_key:?}, end={end_key:?}");

    let mut queue = IndexedHeap::new();
    let mut open: HashMap<VertexId, ItemId> = HashMap::new();
    let mut closed: HashMap<VertexId, ItemId> = HashMap::new();

    let first = queue.push(SearchItem {
        vertex: start,
        prev: None,
        cost: 0,
        priority: 0,
        heap_index: None,
    });
    open.insert(start, first);

    while let Some(item_id) = queue.pop() {
        let (current, cost) = match queue.get(item_id) {
            Some(item) => (item.vertex, item.cost),
            None => continue,
        };
        open.remove(&current);
        closed.insert(current, item_id);

        if current == end {
            let keys = reconstruct(&queue, &closed, end, |id| {
                registry.vertices.get(&id).map(|v| v.key().clone())
            });
            debug!(
                "A* found path: {} hops, cost={cost}, {} vertices closed",
                keys.len().saturating_sub(1),
                closed.len()
            );
            return Some(Route { keys, cost });
        }

        let Some(vertex) = registry.vertices.get(&current) else {
            continue;
        };

        for (neighbor, weight) in vertex.outgoing() {
            if closed.contains_key(&neighbor) {
                continue;
            }
            let candidate = cost.saturating_add(weight);

            // keep an open entry that is already at least as cheap
            if let Some(&stale) = open.get(&neighbor) {
                if queue.get(stale).is_some_and(|item| item.cost <= candidate) {
                    continue;
                }
                queue.remove(stale);
            }

            let Some(neighbor_vertex) = registry.vertices.get(&neighbor) else {
                continue;
            };
            let estimate = heuristic(neighbor_vertex.key(), end_key);

            let item = queue.push(SearchItem {
                vertex: neighbor,
                prev: Some(current),
                cost: candidate,
                priority: candidate.saturating_add(estimate),
                heap_index: None,
            });
            open.insert(neighbor, item);
        }
    }

    trace!(
        "A* exhausted open set after closing {} vertices: no path",
        closed.len()
    );
    None
}

/// Walk predecessor links from `end` through the closed set.
fn reconstruct<K>(
    queue: &IndexedHeap<SearchItem>,
    closed: &HashMap<VertexId, ItemId>,
    end: VertexId,
    mut key_of: impl FnMut(VertexId) -> Option<K>,
) -> Vec<K> {
    let mut keys = Vec::new();
    let mut cursor = Some(end);

    while let Some(id) = cursor {
        if let Some(key) = key_of(id) {
            keys.push(key);
        }
        cursor = closed
            .get(&id)
            .and_then(|item| queue.get(*item))
            .and_then(|item| item.prev);
    }

    keys
}
