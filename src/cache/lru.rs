//! LRU Recency List Module
//!
//! Keeps entries in access order inside a flat slot arena linked by index.

use crate::cache::Entry;

/// Null link marker.
const NIL: usize = usize::MAX;

// == Handle ==
/// Stable address of an entry inside a [`RecencyList`].
///
/// A handle stays valid until its entry is removed; touching an entry does
/// not move it in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug)]
struct Slot {
    /// `None` while the slot sits on the free list
    entry: Option<Entry>,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Doubly-linked recency order over an arena of slots.
///
/// - Head = Least recently used
/// - Tail = Most recently used
///
/// Removed slots are chained into a free list and reused by later pushes.
#[derive(Debug)]
pub struct RecencyList {
    slots: Vec<Slot>,
    head: usize,
    tail: usize,
    /// First free slot, linked through `next`
    free: usize,
    len: usize,
}

impl Default for RecencyList {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends an entry as the most recently used one.
    pub fn push_back(&mut self, entry: Entry) -> Handle {
        let idx = if self.free != NIL {
            let idx = self.free;
            self.free = self.slots[idx].next;
            self.slots[idx] = Slot {
                entry: Some(entry),
                prev: NIL,
                next: NIL,
            };
            idx
        } else {
            self.slots.push(Slot {
                entry: Some(entry),
                prev: NIL,
                next: NIL,
            });
            self.slots.len() - 1
        };

        self.link_back(idx);
        self.len += 1;
        Handle(idx)
    }

    // == Touch ==
    /// Moves a live entry to the most recently used end.
    ///
    /// Dead handles are ignored.
    pub fn touch(&mut self, handle: Handle) {
        if !self.is_live(handle) || self.tail == handle.0 {
            return;
        }
        self.unlink(handle.0);
        self.link_back(handle.0);
    }

    // == Remove ==
    /// Detaches an entry and returns it, freeing its slot.
    pub fn remove(&mut self, handle: Handle) -> Option<Entry> {
        if !self.is_live(handle) {
            return None;
        }
        let idx = handle.0;
        self.unlink(idx);

        let entry = self.slots[idx].entry.take();
        self.slots[idx].next = self.free;
        self.free = idx;
        self.len -= 1;
        entry
    }

    // == Front ==
    /// Returns the handle of the least recently used entry.
    pub fn front(&self) -> Option<Handle> {
        (self.head != NIL).then_some(Handle(self.head))
    }

    // == Back ==
    /// Returns the handle of the most recently used entry.
    pub fn back(&self) -> Option<Handle> {
        (self.tail != NIL).then_some(Handle(self.tail))
    }

    // == Pop Front ==
    /// Removes and returns the least recently used entry.
    pub fn pop_front(&mut self) -> Option<Entry> {
        let handle = self.front()?;
        self.remove(handle)
    }

    pub fn get(&self, handle: Handle) -> Option<&Entry> {
        self.slots.get(handle.0).and_then(|slot| slot.entry.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry> {
        self.slots
            .get_mut(handle.0)
            .and_then(|slot| slot.entry.as_mut())
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Iterates live entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn is_live(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Unlinks slot `idx` from the order without freeing it.
    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }

    /// Links slot `idx` at the tail.
    fn link_back(&mut self, idx: usize) {
        self.slots[idx].prev = self.tail;
        self.slots[idx].next = NIL;

        if self.tail != NIL {
            self.slots[self.tail].next = idx;
        } else {
            self.head = idx;
        }
        self.tail = idx;
    }
}

// == Iterator ==
/// Borrowing iterator over entries, least recently used first.
pub struct Iter<'a> {
    list: &'a RecencyList,
    current: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NIL {
            return None;
        }
        let slot = &self.list.slots[self.current];
        self.current = slot.next;
        slot.entry.as_ref()
    }
}
