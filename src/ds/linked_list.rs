//! Doubly-linked list backed by an [`Arena`].
//!
//! Nodes live in an arena and are linked by [`Handle`], so a caller that
//! kept the handle returned by `push_front`/`push_back` can remove or
//! inspect that node in O(1) without a search. This is the recency list
//! inside every frequency bucket: most-recently-touched at the front,
//! least-recently-touched at the back.
//!
//! ```text
//!   head ─► [h0] ◄──► [h1] ◄──► [h2] ◄── tail
//!            MRU                  LRU
//! ```
//!
//! `push_front` / `push_back` / `pop_front` / `pop_back` / `remove` are
//! all O(1); `iter` is O(n). A `debug_validate` walker is available in
//! debug/test builds.

use crate::ds::arena::{Arena, Handle};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<Handle>,
    next: Option<Handle>,
}

#[derive(Debug)]
pub struct LinkedList<T> {
    arena: Arena<Node<T>>,
    head: Option<Handle>,
    tail: Option<Handle>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: None,
            tail: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, node: Handle) -> bool {
        self.arena.contains(node)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.arena.get(id)).map(|n| &n.value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.arena.get(id)).map(|n| &n.value)
    }

    pub fn front_id(&self) -> Option<Handle> {
        self.head
    }

    pub fn back_id(&self) -> Option<Handle> {
        self.tail
    }

    pub fn get(&self, node: Handle) -> Option<&T> {
        self.arena.get(node).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, node: Handle) -> Option<&mut T> {
        self.arena.get_mut(node).map(|n| &mut n.value)
    }

    /// Inserts `value` at the front and returns its node handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.arena.get_mut(old_head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Inserts `value` at the back and returns its node handle.
    pub fn push_back(&mut self, value: T) -> Handle {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old_tail) => {
                if let Some(node) = self.arena.get_mut(old_tail) {
                    node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks the node named by `node` and returns its value.
    ///
    /// Handles all four link shapes: sole element, head, tail, interior.
    pub fn remove(&mut self, node: Handle) -> Option<T> {
        let (prev, next) = {
            let n = self.arena.get(node)?;
            (n.prev, n.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        self.arena.remove(node).map(|n| n.value)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("linked node missing");
            assert_eq!(node.prev, prev);
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }
        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len());
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    current: Option<Handle>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}
