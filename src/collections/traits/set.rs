use std::iter::{Chain, FusedIterator};
use std::marker::PhantomData;

/// Set algebra over any collection of unique items that supports membership tests.
///
/// Implemented by both the ordered [`TreeSet`](crate::collections::tree::TreeSet) and the hashed
/// [`HashSet`](crate::collections::hash::HashSet). Every operation is expressed in terms of
/// [`contains`](Set::contains) and [`iter`](Set::iter), so the borrowed iterators yield items in
/// the iteration order of `self` (with `other` following for unions).
pub trait Set<T>: IntoIterator<Item = T> + Sized {
    /// The borrowing iterator returned by [`Set::iter`].
    type Iter<'a>: Iterator<Item = &'a T> where Self: 'a, T: 'a;

    /// Returns true if the set contains an item equal to `item`.
    fn contains(&self, item: &T) -> bool;

    /// Returns an iterator over all items in the set, as references.
    fn iter<'a>(&'a self) -> Self::Iter<'a>;

    /// Creates an owned iterator over all items that are in `self` but not `other`.
    /// (`self \ other`)
    fn into_difference(self, other: Self) -> IntoDifference<Self, T> {
        IntoDifference {
            inner: self.into_iter(),
            other,
            _phantom: PhantomData,
        }
    }

    /// Creates a borrowed iterator over all items that are in `self` but not `other`.
    /// (`self \ other`)
    fn difference<'a>(&'a self, other: &'a Self) -> Difference<'a, Self, T> {
        Difference {
            inner: self.iter(),
            other,
        }
    }

    /// Creates a borrowed iterator over all items that are in `self` or `other` but not both.
    /// (`self △ other`)
    fn symmetric_difference<'a>(&'a self, other: &'a Self) -> SymmetricDifference<'a, Self, T> {
        SymmetricDifference {
            inner: self.difference(other).chain(other.difference(self)),
        }
    }

    /// Creates an owned iterator over all items that are in both `self` and `other`.
    /// (`self ∩ other`)
    fn into_intersection(self, other: Self) -> IntoIntersection<Self, T> {
        IntoIntersection {
            inner: self.into_iter(),
            other,
            _phantom: PhantomData,
        }
    }

    /// Creates a borrowed iterator over all items that are in both `self` and `other`.
    /// (`self ∩ other`)
    fn intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, Self, T> {
        Intersection {
            inner: self.iter(),
            other,
        }
    }

    /// Creates a borrowed iterator over all items that are in either `self` or `other`.
    /// (`self ∪ other`)
    fn union<'a>(&'a self, other: &'a Self) -> Union<'a, Self, T> {
        Union {
            inner: self.iter().chain(other.difference(self)),
        }
    }

    /// Returns true if `other` contains all elements of `self`. (`self ⊆ other`)
    fn is_subset(&self, other: &Self) -> bool {
        other.is_superset(self)
    }

    /// Returns true if `self` contains all elements of `other`. (`self ⊇ other`)
    fn is_superset(&self, other: &Self) -> bool {
        other.iter().all(|item| self.contains(item))
    }

    /// Returns true if `self` and `other` have no elements in common. (`self ∩ other = ∅`)
    fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).next().is_none()
    }
}

/// An owned iterator over the items of one set that are missing from another.
pub struct IntoDifference<S: Set<T>, T> {
    pub(crate) inner: S::IntoIter,
    pub(crate) other: S,
    // The type parameter T is needed for Set, despite not directly owning any T.
    pub(crate) _phantom: PhantomData<T>,
}

impl<S: Set<T>, T> Iterator for IntoDifference<S, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let other = &self.other;
        self.inner.find(|item| !other.contains(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<S: Set<T>, T> FusedIterator for IntoDifference<S, T> where S::IntoIter: FusedIterator {}

/// A borrowed iterator over the items of one set that are missing from another.
pub struct Difference<'a, S: Set<T>, T: 'a> {
    pub(crate) inner: S::Iter<'a>,
    pub(crate) other: &'a S,
}

impl<'a, S: Set<T>, T: 'a> Iterator for Difference<'a, S, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.inner.find(|item| !other.contains(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// A borrowed iterator over the items that are in exactly one of two sets.
pub struct SymmetricDifference<'a, S: Set<T>, T: 'a> {
    pub(crate) inner: Chain<Difference<'a, S, T>, Difference<'a, S, T>>,
}

impl<'a, S: Set<T>, T: 'a> Iterator for SymmetricDifference<'a, S, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An owned iterator over the items of one set that are also in another.
pub struct IntoIntersection<S: Set<T>, T> {
    pub(crate) inner: S::IntoIter,
    pub(crate) other: S,
    pub(crate) _phantom: PhantomData<T>,
}

impl<S: Set<T>, T> Iterator for IntoIntersection<S, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let other = &self.other;
        self.inner.find(|item| other.contains(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<S: Set<T>, T> FusedIterator for IntoIntersection<S, T> where S::IntoIter: FusedIterator {}

/// A borrowed iterator over the items of one set that are also in another.
pub struct Intersection<'a, S: Set<T>, T: 'a> {
    pub(crate) inner: S::Iter<'a>,
    pub(crate) other: &'a S,
}

impl<'a, S: Set<T>, T: 'a> Iterator for Intersection<'a, S, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.inner.find(|item| other.contains(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// A borrowed iterator over the items that are in either of two sets, without repeats.
pub struct Union<'a, S: Set<T>, T: 'a> {
    pub(crate) inner: Chain<S::Iter<'a>, Difference<'a, S, T>>,
}

impl<'a, S: Set<T>, T: 'a> Iterator for Union<'a, S, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
