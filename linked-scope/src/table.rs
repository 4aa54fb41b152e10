//! Scope-chained symbol table over two parallel linked lists.
//!
//! A [`SymbolTable`] stores its keys in one [`LinkedList`] and its values in
//! another. Position *i* of the key list is bound to position *i* of the value
//! list, and every mutation touches both lists at the same position. Lookups
//! scan the key list linearly: O(n) in the number of local bindings.
//!
//! # Scopes
//!
//! A table may borrow an enclosing table as its parent. The chained lookups
//! ([`contains_key`](SymbolTable::contains_key),
//! [`try_get_value`](SymbolTable::try_get_value)) search the local table
//! first and then each ancestor, nearest first, so an inner binding shadows
//! an outer one. The `*_local` lookups and every mutation only ever touch the
//! table they are called on.
//!
//! ```
//! use linked_scope::SymbolTable;
//!
//! let mut globals = SymbolTable::new();
//! globals.add("x", 1).unwrap();
//! globals.add("y", 2).unwrap();
//!
//! let mut block = SymbolTable::with_parent(&globals);
//! block.add("x", 10).unwrap();
//!
//! assert_eq!(block.try_get_value(&"x"), Ok(Some(&10)));
//! assert_eq!(block.try_get_value(&"y"), Ok(Some(&2)));
//! assert_eq!(block.try_get_value_local(&"y"), Ok(None));
//! assert_eq!(block.depth(), 1);
//! ```

use core::fmt;
use core::iter::FusedIterator;

use crate::list::Iter;
use crate::{Element, Error, LinkedList, Result};

/// Key-value table built from two synchronized linked lists.
///
/// Keys are unique within one table; the same key may be bound again in a
/// child scope.
///
/// # Example
///
/// ```
/// use linked_scope::{Error, SymbolTable};
///
/// let mut table = SymbolTable::new();
/// table.add("a", 1).unwrap();
///
/// assert_eq!(table.add("a", 2), Err(Error::DuplicateKey));
/// assert_eq!(table.to_string(), "{a: 1}");
///
/// assert!(table.remove(&"a"));
/// assert!(table.is_empty());
/// ```
#[derive(Clone)]
pub struct SymbolTable<'p, K, V> {
    keys: LinkedList<K>,
    values: LinkedList<V>,
    parent: Option<&'p SymbolTable<'p, K, V>>,
}

impl<K, V> Default for SymbolTable<'_, K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, K, V> SymbolTable<'p, K, V> {
    /// Creates an empty table with no enclosing scope.
    #[inline]
    pub fn new() -> Self {
        Self {
            keys: LinkedList::new(),
            values: LinkedList::new(),
            parent: None,
        }
    }

    /// Creates an empty table nested in `parent`.
    ///
    /// The parent is borrowed for the life of the child and cannot be
    /// changed afterwards.
    #[inline]
    pub fn with_parent(parent: &'p SymbolTable<'p, K, V>) -> Self {
        Self {
            keys: LinkedList::new(),
            values: LinkedList::new(),
            parent: Some(parent),
        }
    }

    /// Returns the enclosing scope, if any.
    #[inline]
    pub fn parent(&self) -> Option<&'p SymbolTable<'p, K, V>> {
        self.parent
    }

    /// Returns the number of local bindings.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the table has no local bindings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the number of enclosing scopes.
    pub fn depth(&self) -> usize {
        self.scopes().count() - 1
    }

    /// Removes every local binding. The parent is not affected.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
        tracing::debug!(depth = self.depth(), "cleared scope");
    }

    /// Returns an iterator over this table and its ancestors, nearest first.
    #[inline]
    pub fn scopes(&self) -> Scopes<'_, K, V> {
        Scopes { next: Some(self) }
    }

    /// Returns an iterator over local keys in binding order.
    #[inline]
    pub fn keys(&self) -> Iter<'_, K> {
        self.keys.iter()
    }

    /// Returns an iterator over local values in binding order.
    #[inline]
    pub fn values(&self) -> Iter<'_, V> {
        self.values.iter()
    }

    /// Returns an iterator over local `(key, value)` bindings.
    #[inline]
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries {
            keys: self.keys.iter(),
            values: self.values.iter(),
        }
    }

    /// Clones every local binding into `buf` starting at `offset`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `offset` lies past the end of `buf` or
    /// fewer than [`len`](Self::len) slots remain after it.
    pub fn copy_to(&self, buf: &mut [(K, V)], offset: usize) -> Result<()>
    where
        K: Clone,
        V: Clone,
    {
        let capacity = buf.len();
        if offset > capacity || capacity - offset < self.len() {
            return Err(Error::InvalidArgument {
                offset,
                needed: self.len(),
                capacity,
            });
        }

        for (dst, (key, value)) in buf[offset..].iter_mut().zip(self.iter()) {
            *dst = (key.clone(), value.clone());
        }
        Ok(())
    }

    /// Removes the binding at `index` from both lists.
    ///
    /// Both removals always run, so a failure in one list cannot leave the
    /// other a binding ahead.
    fn unbind(&mut self, index: usize) -> bool {
        let key = self.keys.remove_at(index);
        let value = self.values.remove_at(index);
        match (key, value) {
            (Ok(_), Ok(_)) => true,
            (key, value) => {
                tracing::error!(
                    index,
                    key_removed = key.is_ok(),
                    value_removed = value.is_ok(),
                    "key and value lists out of step"
                );
                false
            }
        }
    }
}

impl<K: Element + PartialEq, V: Element> SymbolTable<'_, K, V> {
    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns `true` if `key` is bound here or in any enclosing scope.
    ///
    /// # Errors
    ///
    /// [`Error::NullKey`] if `key` is null.
    pub fn contains_key(&self, key: &K) -> Result<bool> {
        check_key(key)?;
        Ok(self.scopes().any(|scope| scope.position(key).is_some()))
    }

    /// Returns `true` if `key` is bound in this table.
    ///
    /// # Errors
    ///
    /// [`Error::NullKey`] if `key` is null.
    pub fn contains_key_local(&self, key: &K) -> Result<bool> {
        check_key(key)?;
        Ok(self.position(key).is_some())
    }

    /// Looks `key` up here, then in each enclosing scope.
    ///
    /// Returns the value of the nearest binding, or `None` if no scope binds
    /// the key.
    ///
    /// # Errors
    ///
    /// - [`Error::NullKey`] if `key` is null
    /// - [`Error::IndexOutOfRange`] if the key and value lists are out of step
    pub fn try_get_value(&self, key: &K) -> Result<Option<&V>> {
        check_key(key)?;
        for (depth, scope) in self.scopes().enumerate() {
            if let Some(index) = scope.position(key) {
                tracing::trace!(depth, index, "resolved key");
                return scope.values.get(index).map(Some);
            }
        }
        Ok(None)
    }

    /// Looks `key` up in this table only.
    ///
    /// # Errors
    ///
    /// - [`Error::NullKey`] if `key` is null
    /// - [`Error::IndexOutOfRange`] if the key and value lists are out of step
    pub fn try_get_value_local(&self, key: &K) -> Result<Option<&V>> {
        check_key(key)?;
        self.position(key)
            .map(|index| self.values.get(index))
            .transpose()
    }

    /// Returns a mutable reference to the local value bound to `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::NullKey`] if `key` is null
    /// - [`Error::IndexOutOfRange`] if the key and value lists are out of step
    pub fn get_mut_local(&mut self, key: &K) -> Result<Option<&mut V>> {
        check_key(key)?;
        match self.position(key) {
            Some(index) => self.values.get_mut(index).map(Some),
            None => Ok(None),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Binds `key` to `value` at the end of this table.
    ///
    /// Only this table is checked for an existing binding, so a key from an
    /// enclosing scope may be shadowed.
    ///
    /// # Errors
    ///
    /// - [`Error::NullKey`] if `key` is null
    /// - [`Error::NullValue`] if `value` is null
    /// - [`Error::DuplicateKey`] if `key` is already bound in this table
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        check_key(&key)?;
        check_value(&value)?;
        if self.position(&key).is_some() {
            tracing::trace!(len = self.len(), "rejected duplicate key");
            return Err(Error::DuplicateKey);
        }

        self.bind(key, value);
        Ok(())
    }

    /// Binds `key` to `value`, replacing an existing local binding.
    ///
    /// Returns the replaced value, or `None` if the key was newly added.
    ///
    /// # Errors
    ///
    /// - [`Error::NullKey`] if `key` is null
    /// - [`Error::NullValue`] if `value` is null
    pub fn assign(&mut self, key: K, value: V) -> Result<Option<V>> {
        check_key(&key)?;
        check_value(&value)?;
        match self.position(&key) {
            Some(index) => self.values.set(index, value).map(Some),
            None => {
                self.bind(key, value);
                Ok(None)
            }
        }
    }

    /// Removes the local binding of `key` from both lists.
    ///
    /// Returns `false` if this table does not bind `key`.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(index) => {
                tracing::trace!(index, "removing binding");
                self.unbind(index)
            }
            None => false,
        }
    }

    fn bind(&mut self, key: K, value: V) {
        self.keys.push_back(key);
        self.values.push_back(value);
        tracing::trace!(len = self.len(), "bound key");
    }

    /// Position of `key` in the local key list.
    #[inline]
    fn position(&self, key: &K) -> Option<usize> {
        self.keys.index_of(key)
    }
}

impl<K: Element + PartialEq, V: Element + PartialEq> SymbolTable<'_, K, V> {
    /// Returns `true` if `key` is bound in this table to a value equal to
    /// `value`.
    ///
    /// # Errors
    ///
    /// - [`Error::NullKey`] if `key` is null
    /// - [`Error::IndexOutOfRange`] if the key and value lists are out of step
    pub fn contains_entry(&self, key: &K, value: &V) -> Result<bool> {
        check_key(key)?;
        Ok(self
            .try_get_value_local(key)?
            .is_some_and(|bound| bound == value))
    }

    /// Removes the local binding of `key` only if it is bound to a value
    /// equal to `expected`.
    ///
    /// Returns `false`, leaving the table unchanged, otherwise.
    pub fn remove_entry(&mut self, key: &K, expected: &V) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        if self.values.get(index).ok() != Some(expected) {
            return false;
        }
        self.unbind(index)
    }
}

#[inline]
fn check_key<K: Element>(key: &K) -> Result<()> {
    if key.is_null() {
        return Err(Error::NullKey);
    }
    Ok(())
}

#[inline]
fn check_value<V: Element>(value: &V) -> Result<()> {
    if value.is_null() {
        return Err(Error::NullValue);
    }
    Ok(())
}

// =============================================================================
// Trait impls
// =============================================================================

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SymbolTable<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders the local bindings as `{k0: v0, k1: v1}`.
impl<K: Element, V: Element> fmt::Display for SymbolTable<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            key.render(f)?;
            f.write_str(": ")?;
            value.render(f)?;
        }
        f.write_str("}")
    }
}

impl<'a, K, V> IntoIterator for &'a SymbolTable<'_, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over the local bindings of a table.
pub struct Entries<'a, K, V> {
    keys: Iter<'a, K>,
    values: Iter<'a, V>,
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.keys.next()?, self.values.next()?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Entries<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.keys.next_back()?, self.values.next_back()?))
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

impl<K, V> FusedIterator for Entries<'_, K, V> {}

/// Iterator over a table and its enclosing scopes, nearest first.
pub struct Scopes<'a, K, V> {
    next: Option<&'a SymbolTable<'a, K, V>>,
}

impl<'a, K, V> Iterator for Scopes<'a, K, V> {
    type Item = &'a SymbolTable<'a, K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let scope = self.next?;
        self.next = scope.parent;
        Some(scope)
    }
}

impl<K, V> FusedIterator for Scopes<'_, K, V> {}
