//! # Intrusive Key Lists
//!
//! Doubly-linked lists threaded through elements stored in a
//! [`slotmap::SlotMap`]. Links are keys, not pointers, so an element can be
//! moved between lists in O(1) without any back-pointer into raw memory.
//!
//! An element carries a single [`Link`], so it belongs to at most one list
//! at a time; the owner of the list is responsible for that discipline.

use slotmap::{Key, SlotMap};

/// Prev/next keys embedded in a list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<K> {
    prev: Option<K>,
    next: Option<K>,
}

impl<K> Default for Link<K> {
    fn default() -> Self {
        Self {
            prev: None,
            next: None,
        }
    }
}

/// Elements that can be threaded into a [`KeyList`].
pub trait Linked<K> {
    /// Returns the embedded link.
    fn link(&self) -> &Link<K>;
    /// Returns the embedded link mutably.
    fn link_mut(&mut self) -> &mut Link<K>;
}

/// Head/tail of an intrusive list over arena keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyList<K> {
    head: Option<K>,
    tail: Option<K>,
    len: usize,
}

impl<K> Default for KeyList<K> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<K: Key> KeyList<K> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First element.
    #[inline]
    pub fn head(&self) -> Option<K> {
        self.head
    }

    /// Appends `key` at the tail.
    pub fn push_back<T: Linked<K>>(&mut self, arena: &mut SlotMap<K, T>, key: K) {
        *arena[key].link_mut() = Link {
            prev: self.tail,
            next: None,
        };
        match self.tail {
            Some(tail) => arena[tail].link_mut().next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.len += 1;
    }

    /// Unlinks `key`, which must be a member of this list.
    pub fn remove<T: Linked<K>>(&mut self, arena: &mut SlotMap<K, T>, key: K) {
        let Link { prev, next } = std::mem::take(arena[key].link_mut());
        match prev {
            Some(prev) => arena[prev].link_mut().next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => arena[next].link_mut().prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    /// Unlinks and returns the first element.
    pub fn pop_front<T: Linked<K>>(&mut self, arena: &mut SlotMap<K, T>) -> Option<K> {
        let head = self.head?;
        self.remove(arena, head);
        Some(head)
    }

    /// Moves every element of `other` to the tail of this list in O(1).
    pub fn append<T: Linked<K>>(&mut self, arena: &mut SlotMap<K, T>, other: &mut KeyList<K>) {
        let Some(other_head) = other.head else {
            return;
        };
        match self.tail {
            Some(tail) => {
                arena[tail].link_mut().next = Some(other_head);
                arena[other_head].link_mut().prev = Some(tail);
            }
            None => self.head = Some(other_head),
        }
        self.tail = other.tail;
        self.len += other.len;
        *other = KeyList::default();
    }

    /// Iterates the keys from head to tail.
    pub fn iter<'a, T: Linked<K>>(&self, arena: &'a SlotMap<K, T>) -> Iter<'a, K, T> {
        Iter {
            arena,
            cursor: self.head,
        }
    }

    /// Collects the keys from head to tail.
    ///
    /// Use this when the arena is mutated while walking the list.
    pub fn keys<T: Linked<K>>(&self, arena: &SlotMap<K, T>) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        keys.extend(self.iter(arena));
        keys
    }
}

/// Iterator over a [`KeyList`].
pub struct Iter<'a, K: Key, T> {
    arena: &'a SlotMap<K, T>,
    cursor: Option<K>,
}

impl<K: Key, T: Linked<K>> Iterator for Iter<'_, K, T> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let key = self.cursor?;
        self.cursor = self.arena[key].link().next;
        Some(key)
    }
}
