#![cfg(test)]

use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
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

thread_local! {
    static ALLOCS_BEFORE_FAILURE: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Makes the allocation attempt after the next `count` successful ones fail on this thread, until
/// the returned guard is dropped.
pub fn fail_after(count: usize) -> FailureGuard {
    ALLOCS_BEFORE_FAILURE.set(Some(count));
    FailureGuard
}

/// Consumes one allocation from the injected budget, returning true if this allocation should be
/// reported as a failure.
pub fn injected_failure() -> bool {
    match ALLOCS_BEFORE_FAILURE.get() {
        None => false,
        Some(0) => true,
        Some(remaining) => {
            ALLOCS_BEFORE_FAILURE.set(Some(remaining - 1));
            false
        },
    }
}

#[derive(Debug)]
pub struct FailureGuard;

impl Drop for FailureGuard {
    fn drop(&mut self) {
        ALLOCS_BEFORE_FAILURE.set(None);
    }
}
