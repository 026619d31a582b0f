use std::cell::Cell;
use std::fmt::{self, Debug, Formatter};

/// Prints the contained string verbatim when formatted with [`Debug`], without quotes.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Formats the items produced by an iterator as a [`Debug`] list. The iterator is consumed the
/// first time this value is formatted.
pub struct DebugIter<I>(pub Cell<Option<I>>);

impl<I> DebugIter<I> {
    pub fn new(iter: I) -> DebugIter<I> {
        DebugIter(Cell::new(Some(iter)))
    }
}

impl<I> Debug for DebugIter<I>
where
    I: Iterator,
    I::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0.take() {
            Some(iter) => f.debug_list().entries(iter).finish(),
            None => f.debug_list().finish(),
        }
    }
}
