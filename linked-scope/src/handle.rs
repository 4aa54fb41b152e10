//! Stable references to list nodes.

/// Reference to one node of a [`LinkedList`](crate::LinkedList).
///
/// Returned by the insertion methods. A handle stays valid until its node is
/// removed; afterwards every handle-based call treats it as absent, even if
/// the node's arena slot has been reused by a newer insertion.
///
/// A handle also records which list created it. Any other list, clones
/// included, treats it as absent.
///
/// Slots are reused after removal, so key external maps on the whole
/// `Handle`, not on [`slot`](Handle::slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) slot: usize,
    pub(crate) stamp: u64,
    pub(crate) list: u64,
}

impl Handle {
    /// Returns the arena slot. Useful for debugging only.
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }
}
