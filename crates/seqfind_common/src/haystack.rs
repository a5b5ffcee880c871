use std::collections::VecDeque;

/// A finite, randomly-indexable sequence that needles can be searched for in.
///
/// Implementations must answer [`at`](Haystack::at) in constant time for every index below
/// [`len`](Haystack::len), since the scan revisits elements out of order.
///
/// ```
/// # use seqfind_common::Haystack;
/// let haystack = "abc";
/// assert_eq!(haystack.len(), 3);
/// assert_eq!(*haystack.at(1), b'b');
/// ```
#[allow(clippy::len_without_is_empty)]
pub trait Haystack {
    type Item: ?Sized;

    /// The number of elements in the haystack.
    #[must_use]
    fn len(&self) -> usize;

    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index`.
    ///
    /// Panics if `index` is out of bounds, same as slice indexing.
    #[must_use]
    fn at(&self, index: usize) -> &Self::Item;

    /// A contiguous view of the whole haystack, if one exists.
    #[must_use]
    fn as_contiguous(&self) -> Option<&[Self::Item]>
    where
        Self::Item: Sized,
    {
        None
    }
}

impl<T> Haystack for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }

    fn as_contiguous(&self) -> Option<&[T]> {
        Some(self)
    }
}

impl<T, const N: usize> Haystack for [T; N] {
    type Item = T;

    fn len(&self) -> usize {
        N
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }

    fn as_contiguous(&self) -> Option<&[T]> {
        Some(self)
    }
}

impl<T> Haystack for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }

    fn as_contiguous(&self) -> Option<&[T]> {
        Some(self)
    }
}

impl<T> Haystack for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }
}

/// Strings are searched byte-wise.
impl Haystack for str {
    type Item = u8;

    fn len(&self) -> usize {
        str::len(self)
    }

    fn at(&self, index: usize) -> &u8 {
        &self.as_bytes()[index]
    }

    fn as_contiguous(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl<H> Haystack for &H
where
    H: Haystack + ?Sized,
{
    type Item = H::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn at(&self, index: usize) -> &H::Item {
        (**self).at(index)
    }

    fn as_contiguous(&self) -> Option<&[H::Item]>
    where
        H::Item: Sized,
    {
        (**self).as_contiguous()
    }
}
