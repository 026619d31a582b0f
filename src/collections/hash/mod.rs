//! Hashed collection types, currently just [`HashSet`].

pub mod set;

#[doc(inline)]
pub use set::HashSet;
