//! Element trait for stored keys and values.
//!
//! The [`Element`] trait answers two questions the collections ask of a
//! stored value: is it the absent ("null") value of its type, and how is it
//! written in the canonical `[a, b, c]` rendering.

use core::fmt;
use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// Trait for types stored in a [`LinkedList`](crate::LinkedList) or a
/// [`SymbolTable`](crate::SymbolTable).
///
/// Plain values are never null. `Option<T>` is the nullable element: `None`
/// is null and renders as the literal text `null`.
///
/// # Example
///
/// ```
/// use linked_scope::Element;
///
/// assert!(!42u32.is_null());
/// assert!(None::<u32>.is_null());
/// assert!(!Some(7u32).is_null());
/// ```
///
/// # Custom Element Types
///
/// ```
/// use core::fmt;
/// use linked_scope::{Element, LinkedList};
///
/// #[derive(PartialEq)]
/// enum Value {
///     Nil,
///     Int(i64),
/// }
///
/// impl Element for Value {
///     fn is_null(&self) -> bool {
///         matches!(self, Value::Nil)
///     }
///
///     fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         match self {
///             Value::Nil => f.write_str("null"),
///             Value::Int(i) => write!(f, "{i}"),
///         }
///     }
/// }
///
/// let list: LinkedList<Value> = [Value::Int(1), Value::Nil].into_iter().collect();
/// assert_eq!(list.to_string(), "[1, null]");
/// ```
pub trait Element {
    /// Returns `true` if this is the absent value of the type.
    #[inline]
    fn is_null(&self) -> bool {
        false
    }

    /// Writes the value's string form.
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

// =============================================================================
// Implementations for std types
// =============================================================================

macro_rules! display_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                #[inline]
                fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )*
    };
}

display_element!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

impl<T: Element> Element for Option<T> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.render(f),
            None => f.write_str("null"),
        }
    }
}

impl<T: Element + ?Sized> Element for &T {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }

    #[inline]
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

impl<T: Element + ?Sized> Element for Box<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }

    #[inline]
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

impl<T: Element + ?Sized> Element for Rc<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }

    #[inline]
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

impl<T: Element + ?Sized> Element for Arc<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }

    #[inline]
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

impl Element for Cow<'_, str> {
    #[inline]
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}
