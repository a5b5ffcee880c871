use crate::Error;
use std::{
    borrow::Borrow,
    collections::HashMap,
    hash::Hash,
};

/// The bad-character shift table for a needle of arbitrary hashable elements.
///
/// Every element at needle index `i < len - 1` maps to `len - i - 1`, with the rightmost
/// occurrence winning. The needle's last element is never entered on its own behalf, and
/// any element without an entry shifts by the [fallback](SkipTable::fallback), which is
/// the needle length.
///
/// ```
/// # use seqfind_common::SkipTable;
/// let table = SkipTable::<char>::new(&['a', 'b', 'a', 'c']).unwrap();
/// assert_eq!(table.get(&'a'), Some(1));
/// assert_eq!(table.get(&'b'), Some(2));
/// assert_eq!(table.get(&'c'), None);
/// assert_eq!(table.shift(&'c'), 4);
/// assert_eq!(table.shift(&'z'), table.fallback());
/// ```
#[derive(Clone, Debug)]
pub struct SkipTable<'needle, Q>
where
    Q: ?Sized,
{
    shifts: HashMap<&'needle Q, usize>,
    fallback: usize,
}

impl<'needle, Q> SkipTable<'needle, Q>
where
    Q: Eq + Hash + ?Sized,
{
    /// Builds the table in a single pass over `needle`.
    pub fn new<E>(needle: &'needle [E]) -> Result<Self, Error>
    where
        E: Borrow<Q>,
    {
        let Some((_, body)) = needle.split_last() else {
            return Err(Error::EmptyNeedle);
        };
        let len = needle.len();
        let mut shifts = HashMap::with_capacity(body.len());
        for (i, element) in body.iter().enumerate() {
            shifts.insert(Borrow::<Q>::borrow(element), len - i - 1);
        }
        Ok(Self {
            shifts,
            fallback: len,
        })
    }

    /// The shift stored for `element`, if the needle gave it one.
    #[must_use]
    pub fn get(&self, element: &Q) -> Option<usize> {
        self.shifts.get(element).copied()
    }

    /// The distance to advance the scan window when `element` sits under its last position.
    #[must_use]
    pub fn shift(&self, element: &Q) -> usize {
        self.get(element).unwrap_or(self.fallback)
    }

    /// The shift used for elements absent from the table.
    #[must_use]
    pub fn fallback(&self) -> usize {
        self.fallback
    }
}

/// A dense [`SkipTable`] for byte needles, indexed directly by byte value.
///
/// The table can be built in a `const` context, which lets [`StaticNeedle`](crate::StaticNeedle)
/// be embedded in an executable with no setup at runtime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ByteSkipTable {
    shifts: [usize; 256],
}

impl ByteSkipTable {
    /// Panics if `needle` is empty. Prefer [`ByteSkipTable::try_new`] outside of `const` contexts.
    #[must_use]
    pub const fn new(needle: &[u8]) -> Self {
        assert!(!needle.is_empty(), "a needle must contain at least one byte");
        let len = needle.len();
        let mut shifts = [len; 256];
        let mut i = 0;
        while i + 1 < len {
            shifts[needle[i] as usize] = len - i - 1;
            i += 1;
        }
        Self { shifts }
    }

    pub fn try_new(needle: &[u8]) -> Result<Self, Error> {
        if needle.is_empty() {
            Err(Error::EmptyNeedle)
        } else {
            Ok(Self::new(needle))
        }
    }

    #[must_use]
    pub const fn shift(&self, byte: u8) -> usize {
        self.shifts[byte as usize]
    }
}
