//! Doubly-linked list bounded by two sentinel nodes.
//!
//! Nodes live in a [`slab::Slab`] arena owned by the list, and the links
//! between them are arena slots rather than pointers. Two permanent sentinel
//! nodes (head and tail) frame the real nodes, so every insertion and removal
//! is the same four-link rewire with no first/last special cases.
//!
//! # Sentinel Invariant
//!
//! The sentinels hold no value (`Node::value` is `None`) and are never
//! removed or handed out. Every real node holds `Some(value)`. Walking `next`
//! from the head visits exactly [`len`](LinkedList::len) real nodes before
//! reaching the tail, and walking `prev` from the tail visits the same nodes
//! in reverse.
//!
//! # Positions
//!
//! Position-based operations ([`get`](LinkedList::get),
//! [`insert`](LinkedList::insert), [`remove_at`](LinkedList::remove_at), ...)
//! walk from the head: O(n). No index structure is maintained.
//! Handle-based operations ([`remove_node`](LinkedList::remove_node),
//! [`node`](LinkedList::node)) are O(1).
//!
//! # Example
//!
//! ```
//! use linked_scope::{Error, LinkedList};
//!
//! let mut list = LinkedList::new();
//!
//! list.push_front(1);
//! list.push_front(2);
//! let three = list.push_back(3);
//!
//! assert_eq!(list.to_string(), "[2, 1, 3]");
//! assert_eq!(list.get(1), Ok(&1));
//!
//! // Remove from the back by handle - O(1)
//! assert_eq!(list.remove_node(three), Ok(3));
//! assert_eq!(list.node(three), None);
//!
//! assert_eq!(list.pop_front(), Ok(2));
//! assert_eq!(list.pop_front(), Ok(1));
//! assert_eq!(list.pop_front(), Err(Error::EmptyContainer));
//! ```

use core::fmt;
use core::iter::FusedIterator;
use core::sync::atomic::{AtomicU64, Ordering};

use slab::Slab;

use crate::{Element, Error, Handle, Result};

/// Link value of the outer side of each sentinel.
const NIL: usize = usize::MAX;

/// Source of list ids; each constructed list takes the next one.
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

const HEAD_STAMP: u64 = 0;
const TAIL_STAMP: u64 = 1;

const SENTINEL: &str = "cannot remove a sentinel node";
const DETACHED: &str = "node is not in this list";

/// A node in the list arena.
///
/// Sentinels carry no payload (`value: None`).
struct Node<T> {
    value: Option<T>,
    prev: usize,
    next: usize,
    stamp: u64,
}

/// A doubly-linked list with sentinel head and tail nodes.
///
/// # Example
///
/// ```
/// use linked_scope::LinkedList;
///
/// let mut list: LinkedList<&str> = LinkedList::new();
/// list.push_back("b");
/// list.insert(0, "a").unwrap();
///
/// assert_eq!(list.index_of(&"b"), Some(1));
/// assert!(list.remove(&"a"));
/// assert_eq!(list.to_string(), "[b]");
/// ```
pub struct LinkedList<T> {
    nodes: Slab<Node<T>>,
    head: usize,
    tail: usize,
    len: usize,
    next_stamp: u64,
    id: u64,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    /// Creates an empty list: the head and tail sentinels linked to each other.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with arena room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Slab::with_capacity(capacity + 2);
        let head = nodes.insert(Node {
            value: None,
            prev: NIL,
            next: NIL,
            stamp: HEAD_STAMP,
        });
        let tail = nodes.insert(Node {
            value: None,
            prev: head,
            next: NIL,
            stamp: TAIL_STAMP,
        });
        nodes[head].next = tail;

        Self {
            nodes,
            head,
            tail,
            len: 0,
            next_stamp: TAIL_STAMP + 1,
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ========================================================================
    // Ends
    // ========================================================================

    /// Returns a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front(&self) -> Result<&T> {
        let first = self.nodes[self.head].next;
        // On an empty list `first` is the tail sentinel, which holds no value.
        self.nodes[first].value.as_ref().ok_or(Error::EmptyContainer)
    }

    /// Returns a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        let first = self.nodes[self.head].next;
        self.nodes[first].value.as_mut().ok_or(Error::EmptyContainer)
    }

    /// Returns a reference to the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back(&self) -> Result<&T> {
        let last = self.nodes[self.tail].prev;
        self.nodes[last].value.as_ref().ok_or(Error::EmptyContainer)
    }

    /// Returns a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        let last = self.nodes[self.tail].prev;
        self.nodes[last].value.as_mut().ok_or(Error::EmptyContainer)
    }

    /// Pushes a value to the front of the list.
    ///
    /// Returns the handle of the inserted node.
    #[inline]
    pub fn push_front(&mut self, value: T) -> Handle {
        let first = self.nodes[self.head].next;
        self.link_before(first, value)
    }

    /// Pushes a value to the back of the list.
    ///
    /// Returns the handle of the inserted node.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Handle {
        self.link_before(self.tail, value)
    }

    /// Removes and returns the front element.
    ///
    /// The front node itself is unlinked, so with duplicate values only that
    /// node goes.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T> {
        let first = self.nodes[self.head].next;
        if first == self.tail {
            return Err(Error::EmptyContainer);
        }
        self.unlink(first)
    }

    /// Removes and returns the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T> {
        let last = self.nodes[self.tail].prev;
        if last == self.head {
            return Err(Error::EmptyContainer);
        }
        self.unlink(last)
    }

    // ========================================================================
    // Positions
    // ========================================================================

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let slot = self.slot_at(index)?;
        self.nodes[slot].value.as_ref().ok_or(Error::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let slot = self.slot_at(index)?;
        let len = self.len;
        self.nodes[slot]
            .value
            .as_mut()
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index`, returning the previous value.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let current = self.get_mut(index)?;
        Ok(core::mem::replace(current, value))
    }

    /// Inserts a value so that it becomes the element at `index`.
    ///
    /// `index == len` appends, like [`push_back`](Self::push_back).
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<Handle> {
        let at = if index == self.len {
            self.tail
        } else {
            self.slot_at(index)?
        };
        Ok(self.link_before(at, value))
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let slot = self.slot_at(index)?;
        self.unlink(slot)
    }

    // ========================================================================
    // Handles
    // ========================================================================

    /// Returns a reference to the element behind `handle`.
    ///
    /// Returns `None` if the node has been removed or the handle came from
    /// another list.
    #[inline]
    pub fn node(&self, handle: Handle) -> Option<&T> {
        if handle.list != self.id {
            return None;
        }
        self.nodes
            .get(handle.slot)
            .filter(|node| node.stamp == handle.stamp)
            .and_then(|node| node.value.as_ref())
    }

    /// Returns a mutable reference to the element behind `handle`.
    #[inline]
    pub fn node_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if handle.list != self.id {
            return None;
        }
        self.nodes
            .get_mut(handle.slot)
            .filter(|node| node.stamp == handle.stamp)
            .and_then(|node| node.value.as_mut())
    }

    /// Removes the node behind `handle` and returns its value. O(1).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOperation`] if the handle names a sentinel, a node
    /// that is no longer in the list, or a node of another list. The list is
    /// left untouched.
    pub fn remove_node(&mut self, handle: Handle) -> Result<T> {
        let current = handle.list == self.id
            && self
                .nodes
                .get(handle.slot)
                .is_some_and(|node| node.stamp == handle.stamp);
        if !current {
            tracing::trace!(slot = handle.slot, "rejected removal of detached node");
            return Err(Error::InvalidOperation(DETACHED));
        }
        self.unlink(handle.slot)
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Clears the list, removing all elements.
    ///
    /// The sentinels are relinked to each other. Clearing an empty list is a
    /// no-op.
    pub fn clear(&mut self) {
        let removed = self.len;
        let (head, tail) = (self.head, self.tail);
        self.nodes.retain(|slot, _| slot == head || slot == tail);
        self.nodes[head].next = tail;
        self.nodes[tail].prev = head;
        self.len = 0;
        tracing::debug!(removed, "cleared list");
    }

    /// Clones every element, front to back, into `buf` starting at `offset`.
    ///
    /// Slots outside `offset..offset + len` are left unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `offset` lies past the end of `buf` or
    /// fewer than `len` slots remain after it.
    pub fn copy_to(&self, buf: &mut [T], offset: usize) -> Result<()>
    where
        T: Clone,
    {
        let capacity = buf.len();
        if offset > capacity || capacity - offset < self.len {
            return Err(Error::InvalidArgument {
                offset,
                needed: self.len,
                capacity,
            });
        }

        for (dst, src) in buf[offset..].iter_mut().zip(self.iter()) {
            dst.clone_from(src);
        }
        Ok(())
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    ///
    /// The iterator borrows the list, so the list cannot be modified until
    /// the iterator is dropped. Call `iter` again to restart.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.nodes[self.head].next,
            back: self.nodes[self.tail].prev,
            remaining: self.len,
        }
    }

    // ========================================================================
    // Links
    // ========================================================================

    /// Links a new node holding `value` immediately before slot `at`.
    fn link_before(&mut self, at: usize, value: T) -> Handle {
        let prev = self.nodes[at].prev;
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        let slot = self.nodes.insert(Node {
            value: Some(value),
            prev,
            next: at,
            stamp,
        });
        self.nodes[prev].next = slot;
        self.nodes[at].prev = slot;

        self.len += 1;
        Handle {
            slot,
            stamp,
            list: self.id,
        }
    }

    /// Unlinks the node at `slot` and returns its value.
    ///
    /// Sentinels and vacant slots are rejected before any link changes.
    fn unlink(&mut self, slot: usize) -> Result<T> {
        let value = match self.nodes.get_mut(slot) {
            Some(node) => node.value.take().ok_or(Error::InvalidOperation(SENTINEL))?,
            None => return Err(Error::InvalidOperation(DETACHED)),
        };

        let node = self.nodes.remove(slot);
        self.nodes[node.prev].next = node.next;
        self.nodes[node.next].prev = node.prev;

        self.len -= 1;
        Ok(value)
    }

    /// Walks from the head to the node at `index`.
    fn slot_at(&self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let mut slot = self.nodes[self.head].next;
        for _ in 0..index {
            slot = self.nodes[slot].next;
        }
        Ok(slot)
    }

    /// Finds the first node, front to back, whose value equals `value`.
    fn find_slot(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let mut slot = self.nodes[self.head].next;
        while slot != self.tail {
            let node = &self.nodes[slot];
            if node.value.as_ref() == Some(value) {
                return Some(slot);
            }
            slot = node.next;
        }
        None
    }
}

// =============================================================================
// Value search
// =============================================================================

impl<T: PartialEq> LinkedList<T> {
    /// Returns `true` if any element equals `value`. O(n).
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.find_slot(value).is_some()
    }

    /// Returns the position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|item| item == value)
    }

    /// Removes the first element, front to back, equal to `value`.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.find_slot(value) {
            Some(slot) => self.unlink(slot).is_ok(),
            None => false,
        }
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity(self.len);
        list.extend(self.iter().cloned());
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders as `[e0, e1, ...]`, with `null` for absent elements.
impl<T: Element> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            value.render(f)?;
        }
        f.write_str("]")
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T> {
    nodes: &'a Slab<Node<T>>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = &self.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = &self.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator that pops elements from the front.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
