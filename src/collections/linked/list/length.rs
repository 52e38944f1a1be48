use std::num::NonZero;

/// The length of a non-empty run of nodes. Empty lists carry no length at all, so a zero length
/// can't be represented.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub(crate) struct Length(NonZero<usize>);

pub(crate) const ONE: Length = Length(NonZero::<usize>::MIN);

impl Length {
    pub const fn new(value: usize) -> Option<Length> {
        match NonZero::new(value) {
            Some(value) => Some(Length(value)),
            None => None,
        }
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }

    pub const fn checked_add(self, other: usize) -> Option<Length> {
        match self.0.checked_add(other) {
            Some(value) => Some(Length(value)),
            None => None,
        }
    }

    /// Subtracts `other`, returning `None` if nothing would be left.
    pub const fn checked_sub(self, other: usize) -> Option<Length> {
        match self.0.get().checked_sub(other) {
            Some(value) => Length::new(value),
            None => None,
        }
    }
}
