use crate::{
    DynamicNeedle,
    Error,
    Haystack,
    Needle as _,
    Sealed,
};
use std::{
    borrow::Borrow,
    hash::Hash,
};

/// The view of a prepared needle that the scan loop works against.
pub trait Pattern: Sealed {
    type Item: ?Sized;

    /// The number of elements in the needle, always at least 1.
    #[must_use]
    fn width(&self) -> usize;

    #[must_use]
    fn element(&self, index: usize) -> &Self::Item;

    #[must_use]
    fn shift(&self, element: &Self::Item) -> usize;
}

impl<P> Pattern for &P
where
    P: Pattern + ?Sized,
{
    type Item = P::Item;

    fn width(&self) -> usize {
        (**self).width()
    }

    fn element(&self, index: usize) -> &Self::Item {
        (**self).element(index)
    }

    fn shift(&self, element: &Self::Item) -> usize {
        (**self).shift(element)
    }
}

/// Scans for the first window ending at or after `window_end` that matches `pattern`,
/// returning the index of the window's last element.
///
/// Each window is compared right to left. On a mismatch the window advances by the
/// pattern's shift for the haystack element under its last position.
#[must_use]
pub(crate) fn scan<P, H>(pattern: &P, haystack: &H, mut window_end: usize) -> Option<usize>
where
    P: Pattern + ?Sized,
    P::Item: PartialEq,
    H: Haystack<Item = P::Item> + ?Sized,
{
    let len = pattern.width();
    let haystack_len = haystack.len();
    'windows: while window_end < haystack_len {
        for j in 0..len {
            if haystack.at(window_end - j) != pattern.element(len - 1 - j) {
                window_end += pattern.shift(haystack.at(window_end));
                continue 'windows;
            }
        }
        return Some(window_end);
    }
    None
}

/// Iterates over every match of a needle in a haystack, including overlapping ones.
///
/// Created by [`Needle::find_iter`](crate::Needle::find_iter) and [`iter_find`]. After a
/// match the window advances by a single element, so a match starting one element later
/// is still found.
#[derive(Clone, Debug)]
pub struct FindIter<P, H> {
    pattern: P,
    haystack: H,
    window_end: usize,
}

impl<P, H> FindIter<P, H>
where
    P: Pattern,
{
    #[must_use]
    pub(crate) fn new(pattern: P, haystack: H) -> Self {
        let window_end = pattern.width() - 1;
        Self {
            pattern,
            haystack,
            window_end,
        }
    }
}

impl<P, H> Iterator for FindIter<P, H>
where
    P: Pattern,
    P::Item: PartialEq,
    H: Haystack<Item = P::Item>,
{
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        match scan(&self.pattern, &self.haystack, self.window_end) {
            Some(end) => {
                self.window_end = end + 1;
                Some(end + 1 - self.pattern.width())
            }
            None => {
                self.window_end = self.haystack.len();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.haystack.len().saturating_sub(self.window_end);
        (0, Some(remaining))
    }
}

impl<P, H> std::iter::FusedIterator for FindIter<P, H>
where
    P: Pattern,
    P::Item: PartialEq,
    H: Haystack<Item = P::Item>,
{
}

/// Returns the position of the leftmost occurrence of `needle` in `haystack`.
///
/// The needle's elements only need to [borrow](Borrow) as the haystack's element type, so a
/// needle of `String`s can be found in a haystack of `str`-like elements, and so on.
///
/// ```
/// # use seqfind_common::find;
/// assert_eq!(find(&[1, 2], &[1, 1, 2]), Ok(Some(1)));
/// assert_eq!(find(&[1, 2, 3], &(0..10).collect::<Vec<_>>()), Ok(Some(1)));
/// assert_eq!(find(b"gh", "abcdefghi"), Ok(Some(6)));
/// assert_eq!(find(&[2, 3], &[7, 8, 9]), Ok(None));
/// ```
pub fn find<E, H>(needle: &[E], haystack: &H) -> Result<Option<usize>, Error>
where
    E: Borrow<H::Item>,
    H: Haystack + ?Sized,
    H::Item: Eq + Hash,
{
    let needle = DynamicNeedle::<H::Item>::with_borrowed(needle)?;
    Ok(needle.find(haystack).map(|matched| matched.start()))
}

/// Lazily iterates over the positions of every occurrence of `needle` in `haystack`, in
/// increasing order, including occurrences that overlap one another.
///
/// The skip table is built before this returns, so an empty needle is reported up front
/// rather than on the first call to `next`.
///
/// ```
/// # use seqfind_common::iter_find;
/// let positions: Vec<_> = iter_find(&[1, 1], &[1, 1, 1]).unwrap().collect();
/// assert_eq!(positions, [0, 1]);
///
/// let positions: Vec<_> = iter_find(b"ana", "bananas").unwrap().collect();
/// assert_eq!(positions, [1, 3]);
/// ```
pub fn iter_find<'needle, 'haystack, E, H>(
    needle: &'needle [E],
    haystack: &'haystack H,
) -> Result<FindIter<DynamicNeedle<'needle, H::Item>, &'haystack H>, Error>
where
    E: Borrow<H::Item>,
    H: Haystack + ?Sized,
    H::Item: Eq + Hash,
{
    let needle = DynamicNeedle::<H::Item>::with_borrowed(needle)?;
    Ok(FindIter::new(needle, haystack))
}
