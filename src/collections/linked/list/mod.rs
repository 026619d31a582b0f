mod cursor;
mod iter;
mod list;
mod node;
mod sort;
mod tests;

pub use cursor::*;
pub use iter::*;
pub use list::*;
