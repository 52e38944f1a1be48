use std::alloc::Layout;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// The global allocator refused to provide storage for the described layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    pub size: usize,
    pub align: usize,
}

impl AllocError {
    pub const fn for_layout(layout: Layout) -> AllocError {
        AllocError {
            size: layout.size(),
            align: layout.align(),
        }
    }
}

impl Display for AllocError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to allocate {} bytes with alignment {}!",
            self.size, self.align
        )
    }
}

impl Error for AllocError {}

#[derive(Debug, Display, Error, From, TryInto, IsVariant)]
pub enum IndexOrCapOverflow {
    IndexOutOfBounds(IndexOutOfBounds),
    CapacityOverflow(CapacityOverflow),
}

/// The reasons an operation that acquires storage can fail. In both cases the collection is left
/// exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum TryReserveError {
    CapacityOverflow(CapacityOverflow),
    AllocError(AllocError),
}

/// Errors produced by positional insertion, which can fail either because of a bad index or
/// because storage couldn't be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum TryInsertError {
    IndexOutOfBounds(IndexOutOfBounds),
    Reserve(TryReserveError),
}

impl From<CapacityOverflow> for TryInsertError {
    fn from(value: CapacityOverflow) -> Self {
        TryInsertError::Reserve(value.into())
    }
}

impl From<AllocError> for TryInsertError {
    fn from(value: AllocError) -> Self {
        TryInsertError::Reserve(value.into())
    }
}
