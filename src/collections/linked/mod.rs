//! Linked collection types. Primarily revolves around [`LinkedList`] and its accompanying
//! [`CursorMut`] type.

pub mod list;

#[doc(inline)]
pub use list::{CursorMut, LinkedList};
