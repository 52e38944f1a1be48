use std::fmt::{self, Debug, Formatter};

/// Writes the contained string verbatim when debug formatted, for building structural dumps out of
/// pre-rendered pieces.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Debug formats a clonable iterator as a list, so it can be nested inside `debug_struct` fields.
pub struct DebugIter<I>(pub I);

impl<I> Debug for DebugIter<I>
where
    I: Iterator + Clone,
    I::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}
