//! Property-based tests for the list invariants.
//! Random operation sequences are replayed against a `VecDeque` model.

use std::collections::VecDeque;

use linked_scope::{Error, LinkedList};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    PushFront(u8),
    PushBack(u8),
    PopFront,
    PopBack,
    Insert(usize, u8),
    RemoveAt(usize),
    Remove(u8),
    Set(usize, u8),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    // Small value and index ranges keep duplicates and boundary hits common.
    prop_oneof![
        4 => any::<u8>().prop_map(|v| Op::PushFront(v % 8)),
        4 => any::<u8>().prop_map(|v| Op::PushBack(v % 8)),
        2 => Just(Op::PopFront),
        2 => Just(Op::PopBack),
        3 => (0usize..12, any::<u8>()).prop_map(|(i, v)| Op::Insert(i, v % 8)),
        2 => (0usize..12).prop_map(Op::RemoveAt),
        2 => any::<u8>().prop_map(|v| Op::Remove(v % 8)),
        2 => (0usize..12, any::<u8>()).prop_map(|(i, v)| Op::Set(i, v % 8)),
        1 => Just(Op::Clear),
    ]
}

fn apply(list: &mut LinkedList<u8>, model: &mut VecDeque<u8>, op: Op) {
    let len = model.len();
    let out_of_range = |index| Error::IndexOutOfRange { index, len };

    match op {
        Op::PushFront(v) => {
            list.push_front(v);
            model.push_front(v);
        }
        Op::PushBack(v) => {
            list.push_back(v);
            model.push_back(v);
        }
        Op::PopFront => {
            assert_eq!(list.pop_front().ok(), model.pop_front());
        }
        Op::PopBack => {
            assert_eq!(list.pop_back().ok(), model.pop_back());
        }
        Op::Insert(i, v) => {
            if i <= len {
                assert!(list.insert(i, v).is_ok());
                model.insert(i, v);
            } else {
                assert_eq!(list.insert(i, v), Err(out_of_range(i)));
            }
        }
        Op::RemoveAt(i) => {
            if i < len {
                assert_eq!(list.remove_at(i).ok(), model.remove(i));
            } else {
                assert_eq!(list.remove_at(i), Err(out_of_range(i)));
            }
        }
        Op::Remove(v) => {
            let expected = model.iter().position(|x| *x == v);
            assert_eq!(list.remove(&v), expected.is_some());
            if let Some(i) = expected {
                model.remove(i);
            }
        }
        Op::Set(i, v) => {
            if i < len {
                assert_eq!(list.set(i, v).ok(), Some(model[i]));
                model[i] = v;
            } else {
                assert_eq!(list.set(i, v), Err(out_of_range(i)));
            }
        }
        Op::Clear => {
            list.clear();
            model.clear();
        }
    }
}

proptest! {
    /// Size always equals the number of elements a full traversal yields.
    #[test]
    fn len_matches_traversal(ops in prop::collection::vec(op(), 0..64)) {
        let mut list = LinkedList::new();
        let mut model = VecDeque::new();

        for op in ops {
            apply(&mut list, &mut model, op);
            prop_assert_eq!(list.len(), list.iter().count());
            prop_assert_eq!(list.is_empty(), list.len() == 0);
        }
    }

    /// Contents follow the model and back-to-front is the exact reverse.
    #[test]
    fn order_matches_model_in_both_directions(ops in prop::collection::vec(op(), 0..64)) {
        let mut list = LinkedList::new();
        let mut model = VecDeque::new();

        for op in ops {
            apply(&mut list, &mut model, op);
        }

        let forward: Vec<u8> = list.iter().copied().collect();
        let mut backward: Vec<u8> = list.iter().rev().copied().collect();
        backward.reverse();

        prop_assert_eq!(&forward, &Vec::from(model.clone()));
        prop_assert_eq!(forward, backward);
    }

    /// Reported positions and membership agree with the model.
    #[test]
    fn index_of_matches_first_occurrence(values in prop::collection::vec(0u8..6, 0..32), probe in 0u8..8) {
        let list: LinkedList<u8> = values.iter().copied().collect();

        prop_assert_eq!(list.index_of(&probe), values.iter().position(|v| *v == probe));
        prop_assert_eq!(list.contains(&probe), values.contains(&probe));
        if let Some(i) = list.index_of(&probe) {
            prop_assert_eq!(list.get(i), Ok(&probe));
        }
    }

    /// Removing by value `n` times empties a list of `n` equal values.
    #[test]
    fn duplicate_removal_drains(value in any::<u8>(), n in 1usize..16) {
        let mut list = LinkedList::new();
        for _ in 0..n {
            list.push_back(value);
        }

        for _ in 0..n {
            prop_assert!(list.remove(&value));
        }
        prop_assert!(list.is_empty());
        prop_assert!(!list.remove(&value));
    }

    /// `insert(len, x)` is `push_back(x)`; `insert(len + 1, x)` fails.
    #[test]
    fn insert_boundary(values in prop::collection::vec(any::<u8>(), 0..16), x in any::<u8>()) {
        let mut inserted: LinkedList<u8> = values.iter().copied().collect();
        let mut pushed = inserted.clone();
        let len = inserted.len();

        prop_assert_eq!(
            inserted.insert(len + 1, x),
            Err(Error::IndexOutOfRange { index: len + 1, len })
        );
        prop_assert!(inserted.insert(len, x).is_ok());
        pushed.push_back(x);
        prop_assert_eq!(inserted, pushed);
    }

    /// `copy_to` writes exactly `offset..offset + len` of a big-enough buffer.
    #[test]
    fn copy_to_touches_only_its_window(
        values in prop::collection::vec(1u8..=255, 0..8),
        offset in 0usize..4,
        spare in 0usize..4,
    ) {
        let list: LinkedList<u8> = values.iter().copied().collect();
        let mut buf = vec![0u8; offset + values.len() + spare];

        prop_assert!(list.copy_to(&mut buf, offset).is_ok());
        prop_assert!(buf[..offset].iter().all(|b| *b == 0));
        prop_assert_eq!(&buf[offset..offset + values.len()], values.as_slice());
        prop_assert!(buf[offset + values.len()..].iter().all(|b| *b == 0));
    }
}

#[test]
fn canonical_rendering() {
    let empty: LinkedList<i32> = LinkedList::new();
    assert_eq!(empty.to_string(), "[]");

    let mut list = LinkedList::new();
    list.push_front(1);
    list.push_front(2);
    list.push_back(3);
    assert_eq!(list.to_string(), "[2, 1, 3]");

    let nullable: LinkedList<Option<String>> =
        [Some("x".to_string()), None].into_iter().collect();
    assert_eq!(nullable.to_string(), "[x, null]");
}

#[test]
fn copy_into_five_slots_at_offset_one() {
    let list: LinkedList<char> = ['a', 'b', 'c'].into_iter().collect();
    let mut buf = ['-'; 5];

    list.copy_to(&mut buf, 1).unwrap();
    assert_eq!(buf, ['-', 'a', 'b', 'c', '-']);
}

#[test]
fn clear_twice_equals_clear_once() {
    let mut once: LinkedList<i32> = (0..8).collect();
    let mut twice = once.clone();

    once.clear();
    twice.clear();
    twice.clear();

    assert_eq!(once, twice);
    assert_eq!(twice.to_string(), "[]");
    assert_eq!(twice.front(), Err(Error::EmptyContainer));
}
