//! Sentinel-bounded linked list and a scope-chained symbol table.
//!
//! This crate provides two collections for small, single-owner workloads
//! such as the symbol tables of an interpreter:
//!
//! ```text
//! LinkedList<T>          - doubly linked, sentinel head/tail, arena-backed
//! SymbolTable<'p, K, V>  - two parallel LinkedLists + optional parent scope
//! ```
//!
//! # Design
//!
//! The list keeps its nodes in a [`slab::Slab`] arena and links them by slot
//! rather than by pointer, so the cyclic prev/next structure needs no shared
//! ownership and no `unsafe`. Two permanent sentinel nodes frame the
//! elements:
//!
//! ```text
//! HEAD <-> a <-> b <-> c <-> TAIL
//! ```
//!
//! Every insertion links a node before some existing node (possibly the
//! tail) and every removal unlinks one node: four link writes either way.
//!
//! Position-based access walks from the head in O(n). The table finds a key
//! by scanning its key list, then reads or writes its value list at the same
//! position, so the two lists always stay in step.
//!
//! # Quick Start
//!
//! ```
//! use linked_scope::{LinkedList, SymbolTable};
//!
//! let mut list = LinkedList::new();
//! list.push_back(1);
//! list.push_back(3);
//! list.insert(1, 2).unwrap();
//! assert_eq!(list.to_string(), "[1, 2, 3]");
//!
//! let mut outer = SymbolTable::new();
//! outer.add("half", 0.5).unwrap();
//!
//! let mut inner = SymbolTable::with_parent(&outer);
//! inner.add("two", 2.0).unwrap();
//!
//! assert_eq!(inner.try_get_value(&"half"), Ok(Some(&0.5)));
//! assert_eq!(inner.contains_key_local(&"half"), Ok(false));
//! ```
//!
//! # Null Values
//!
//! Keys and values go through the [`Element`] trait. `Option<T>` is the
//! nullable element: a `None` key or value is rejected by the table with
//! [`Error::NullKey`] / [`Error::NullValue`], and a `None` list element
//! renders as `null`.
//!
//! # Threading
//!
//! Nothing here synchronizes. Share a collection across threads only behind
//! a lock held for the whole call.

#![warn(missing_docs)]

pub mod element;
pub mod error;
pub mod handle;
pub mod list;
pub mod table;

pub use element::Element;
pub use error::{Error, Result};
pub use handle::Handle;
pub use list::LinkedList;
pub use table::SymbolTable;
