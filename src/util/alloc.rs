use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZeroSizedType;

#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// A value that panics when cloned once the shared budget of successful clones runs out. Every
/// drop is counted, so that tests can check that partially constructed batches are unwound.
#[derive(Debug)]
pub struct PanicOnClone {
    pub value: usize,
    pub budget: Rc<RefCell<usize>>,
    pub drops: Rc<RefCell<usize>>,
}

impl PanicOnClone {
    pub fn new(value: usize, budget: usize) -> PanicOnClone {
        PanicOnClone {
            value,
            budget: Rc::new(RefCell::new(budget)),
            drops: Rc::new(RefCell::new(0)),
        }
    }

    pub fn drops(&self) -> usize {
        *self.drops.borrow()
    }
}

impl Clone for PanicOnClone {
    fn clone(&self) -> Self {
        let mut budget = self.budget.borrow_mut();
        if *budget == 0 {
            drop(budget);
            panic!("clone budget exhausted");
        }
        *budget -= 1;

        PanicOnClone {
            value: self.value,
            budget: self.budget.clone(),
            drops: self.drops.clone(),
        }
    }
}

impl PartialEq for PanicOnClone {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for PanicOnClone {
    fn drop(&mut self) {
        self.drops.replace_with(|v| *v + 1);
    }
}
