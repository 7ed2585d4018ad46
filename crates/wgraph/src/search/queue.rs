//! Indexed binary min-heap.
//!
//! Items live in an arena owned by the heap and keep their current heap
//! position, so any tracked item can be removed in `O(log n)`, not only the
//! minimum. Popped and removed items stay readable through [`IndexedHeap::get`].

use crate::graph::Weight;

/// Handle to an item pushed into an [`IndexedHeap`].
pub type ItemId = usize;

/// An element that can be ordered by an [`IndexedHeap`].
pub trait HeapItem {
    /// Ordering key; smaller values are popped first.
    fn priority(&self) -> Weight;

    /// Current position in the heap, `None` when not queued.
    fn heap_index(&self) -> Option<usize>;

    /// Called by the heap whenever the item moves.
    fn set_heap_index(&mut self, index: Option<usize>);
}

/// Binary min-heap with removal of arbitrary items.
///
/// Ties between equal priorities are broken arbitrarily.
#[derive(Debug)]
pub struct IndexedHeap<T> {
    items: Vec<T>,
    heap: Vec<ItemId>,
}

impl<T: HeapItem> IndexedHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            heap: Vec::new(),
        }
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no items are queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether the item is currently queued.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items
            .get(id)
            .is_some_and(|item| item.heap_index().is_some())
    }

    /// Read an item, queued or not.
    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.get(id)
    }

    /// Queue an item and return its handle.
    pub fn push(&mut self, mut item: T) -> ItemId {
        let id = self.items.len();
        let position = self.heap.len();
        item.set_heap_index(Some(position));
        self.items.push(item);
        self.heap.push(id);
        self.sift_up(position);
        id
    }

    /// Dequeue the item with the smallest priority.
    pub fn pop(&mut self) -> Option<ItemId> {
        if self.heap.is_empty() {
            return None;
        }
        let id = self.heap[0];
        self.remove_at(0);
        Some(id)
    }

    /// Dequeue a specific item. Returns `false` if it was not queued.
    pub fn remove(&mut self, id: ItemId) -> bool {
        match self.items.get(id).and_then(HeapItem::heap_index) {
            Some(position) => {
                self.remove_at(position);
                true
            }
            None => false,
        }
    }

    fn remove_at(&mut self, position: usize) {
        let last = self.heap.len() - 1;
        self.swap(position, last);

        if let Some(id) = self.heap.pop() {
            self.items[id].set_heap_index(None);
        }

        if position < self.heap.len() && !self.sift_up(position) {
            self.sift_down(position);
        }
    }

    fn priority_at(&self, position: usize) -> Weight {
        self.items[self.heap[position]].priority()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        let (id_a, id_b) = (self.heap[a], self.heap[b]);
        self.items[id_a].set_heap_index(Some(a));
        self.items[id_b].set_heap_index(Some(b));
    }

    /// Returns whether the item moved.
    fn sift_up(&mut self, mut position: usize) -> bool {
        let start = position;
        while position > 0 {
            let parent = (position - 1) / 2;
            if self.priority_at(position) >= self.priority_at(parent) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
        position != start
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * position + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && self.priority_at(right) < self.priority_at(left) {
                child = right;
            }
            if self.priority_at(child) >= self.priority_at(position) {
                break;
            }
            self.swap(position, child);
            position = child;
        }
    }
}

impl<T: HeapItem> Default for IndexedHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
