use crate::{
    parsing,
    search::{
        FindIter,
        Pattern,
    },
    ByteSkipTable,
    Error,
    Haystack,
    ParseError,
    Reason,
    Sealed,
    SkipTable,
};
use std::{
    borrow::Borrow,
    hash::Hash,
    ops::Range,
};

/// Represents a matching [`Needle`] found in the haystack.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Match {
    range: (usize, usize),
}

impl Match {
    #[must_use]
    fn new(start: usize, len: usize) -> Self {
        Self {
            range: (start, start + len),
        }
    }

    /// The position of the first element in the matching needle, relative to the haystack.
    ///
    /// ```
    /// # use seqfind_common::{ByteNeedle, Needle as _};
    /// let needle = ByteNeedle::from_hex("63 61 74").unwrap();
    /// let matched = needle.find("a_cat_tries").unwrap();
    /// assert_eq!(matched.start(), 2);
    /// ```
    #[must_use]
    pub fn start(&self) -> usize {
        self.range.0
    }

    /// The position one past the last element of the matching needle, relative to the haystack.
    ///
    /// ```
    /// # use seqfind_common::{ByteNeedle, Needle as _};
    /// let needle = ByteNeedle::from_hex("63 61 74").unwrap();
    /// let matched = needle.find("a_cat_tries").unwrap();
    /// assert_eq!(matched.end(), 5);
    /// ```
    #[must_use]
    pub fn end(&self) -> usize {
        self.range.1
    }

    /// The range of the matching needle, relative to the haystack.
    ///
    /// ```
    /// # use seqfind_common::{DynamicNeedle, Needle as _};
    /// let needle = DynamicNeedle::new(&['c', 'a', 't']).unwrap();
    /// let haystack: Vec<char> = "a_cat_tries".chars().collect();
    /// let matched = needle.find(&haystack).unwrap();
    /// assert_eq!(matched.range(), 2..5);
    /// assert_eq!(haystack[matched.range()], ['c', 'a', 't']);
    /// ```
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

/// The common interface for searching haystacks with prepared needles.
///
/// A successful search will yield a [`Match`] in the haystack, whose length is equal to the
/// [length](Needle::len) of the needle. Matches may overlap.
///
/// ```
/// # use seqfind_common::{DynamicNeedle, Needle as _};
/// let needle = DynamicNeedle::new(&[0x12, 0x23, 0x12]).unwrap();
/// let haystack = [0x32, 0x12, 0x23, 0x12, 0x23, 0x12, 0xCD];
/// let mut iter = needle.find_iter(&haystack);
/// assert_eq!(iter.next().unwrap().start(), 1);
/// assert_eq!(iter.next().unwrap().start(), 3);
/// assert!(iter.next().is_none());
/// ```
#[allow(clippy::len_without_is_empty)]
pub trait Needle: Sealed {
    /// The element type of haystacks this needle can be searched for in.
    type Item: ?Sized;

    /// A convenience method for getting only the first match.
    #[must_use]
    fn find<H>(&self, haystack: &H) -> Option<Match>
    where
        H: Haystack<Item = Self::Item> + ?Sized,
    {
        self.find_iter(haystack).next()
    }

    /// Finds all matching subsequences, iteratively.
    #[must_use]
    fn find_iter<'iter, 'needle: 'iter, 'haystack: 'iter, H>(
        &'needle self,
        haystack: &'haystack H,
    ) -> impl Iterator<Item = Match> + 'iter
    where
        H: Haystack<Item = Self::Item> + ?Sized;

    /// The length of the needle itself, which is never zero.
    #[must_use]
    fn len(&self) -> usize;
}

/// A needle over any hashable element type, borrowed from the caller.
///
/// ```
/// # use seqfind_common::{DynamicNeedle, Needle as _};
/// let needle = DynamicNeedle::new(&[(1, 'b'), (2, 'c')]).unwrap();
/// let haystack = [(0, 'a'), (1, 'b'), (2, 'c')];
/// assert_eq!(needle.find(&haystack).unwrap().start(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct DynamicNeedle<'needle, Q>
where
    Q: ?Sized,
{
    elements: Vec<&'needle Q>,
    table: SkipTable<'needle, Q>,
}

impl<'needle, Q> DynamicNeedle<'needle, Q>
where
    Q: Eq + Hash + ?Sized,
{
    /// Prepares `needle` for searching haystacks of the same element type.
    pub fn new(needle: &'needle [Q]) -> Result<Self, Error>
    where
        Q: Sized,
    {
        Self::with_borrowed(needle)
    }

    /// Prepares `needle` for searching haystacks whose elements the needle's elements
    /// [borrow](Borrow) as.
    ///
    /// ```
    /// # use seqfind_common::{DynamicNeedle, Needle as _};
    /// let words = [String::from("ab"), String::from("cd")];
    /// let needle = DynamicNeedle::<str>::with_borrowed(&words).unwrap();
    /// assert_eq!(needle.len(), 2);
    /// ```
    pub fn with_borrowed<E>(needle: &'needle [E]) -> Result<Self, Error>
    where
        E: Borrow<Q>,
    {
        let table = SkipTable::new(needle)?;
        let elements = needle.iter().map(Borrow::<Q>::borrow).collect();
        Ok(Self { elements, table })
    }

    /// The skip table built for this needle.
    #[must_use]
    pub fn skip_table(&self) -> &SkipTable<'needle, Q> {
        &self.table
    }
}

impl<Q> Sealed for DynamicNeedle<'_, Q> where Q: ?Sized {}

impl<Q> Pattern for DynamicNeedle<'_, Q>
where
    Q: Eq + Hash + ?Sized,
{
    type Item = Q;

    fn width(&self) -> usize {
        self.elements.len()
    }

    fn element(&self, index: usize) -> &Q {
        self.elements[index]
    }

    fn shift(&self, element: &Q) -> usize {
        self.table.shift(element)
    }
}

impl<Q> Needle for DynamicNeedle<'_, Q>
where
    Q: Eq + Hash + ?Sized,
{
    type Item = Q;

    fn find_iter<'iter, 'needle: 'iter, 'haystack: 'iter, H>(
        &'needle self,
        haystack: &'haystack H,
    ) -> impl Iterator<Item = Match> + 'iter
    where
        H: Haystack<Item = Self::Item> + ?Sized,
    {
        let len = self.width();
        FindIter::new(self, haystack).map(move |start| Match::new(start, len))
    }

    fn len(&self) -> usize {
        self.width()
    }
}

/// Iterates over byte matches, with single byte needles handed off to `memchr`.
enum ByteIter<'haystack, P, H>
where
    H: ?Sized,
{
    Single(memchr::Memchr<'haystack>),
    Scan(FindIter<P, &'haystack H>),
}

impl<'haystack, P, H> ByteIter<'haystack, P, H>
where
    P: Pattern<Item = u8>,
    H: Haystack<Item = u8> + ?Sized,
{
    #[must_use]
    fn new(pattern: P, haystack: &'haystack H) -> Self {
        match haystack.as_contiguous() {
            Some(bytes) if pattern.width() == 1 => {
                Self::Single(memchr::memchr_iter(*pattern.element(0), bytes))
            }
            _ => Self::Scan(FindIter::new(pattern, haystack)),
        }
    }
}

impl<P, H> Iterator for ByteIter<'_, P, H>
where
    P: Pattern<Item = u8>,
    H: Haystack<Item = u8> + ?Sized,
{
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Single(iter) => iter.next(),
            Self::Scan(iter) => iter.next(),
        }
    }
}

/// The compile-time variant of a byte [`Needle`].
///
/// [`StaticNeedle`] is intended for embedding into executables at compile-time,
/// such that no allocations or validation is needed to perform a match on a
/// haystack at runtime.
///
/// The `seqfind!` macro parses and validates patterns before producing one of these, but
/// they can also be written out by hand.
///
/// ```
/// # use seqfind_common::{Needle as _, StaticNeedle};
/// const NEEDLE: StaticNeedle<2> = StaticNeedle::new(*b"gh");
/// assert_eq!(NEEDLE.find("abcdefghi").unwrap().start(), 6);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StaticNeedle<const N: usize> {
    bytes: [u8; N],
    table: ByteSkipTable,
}

impl<const N: usize> StaticNeedle<N> {
    /// Panics if `N` is zero, which fails compilation when evaluated in a `const`.
    #[must_use]
    pub const fn new(bytes: [u8; N]) -> Self {
        let table = ByteSkipTable::new(&bytes);
        Self { bytes, table }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> Sealed for StaticNeedle<N> {}

impl<const N: usize> Pattern for StaticNeedle<N> {
    type Item = u8;

    fn width(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }

    fn shift(&self, element: &u8) -> usize {
        self.table.shift(*element)
    }
}

impl<const N: usize> Needle for StaticNeedle<N> {
    type Item = u8;

    fn find_iter<'iter, 'needle: 'iter, 'haystack: 'iter, H>(
        &'needle self,
        haystack: &'haystack H,
    ) -> impl Iterator<Item = Match> + 'iter
    where
        H: Haystack<Item = Self::Item> + ?Sized,
    {
        ByteIter::new(self, haystack).map(|start| Match::new(start, N))
    }

    fn len(&self) -> usize {
        N
    }
}

/// The run-time variant of a byte [`Needle`].
#[derive(Clone, Debug)]
pub struct ByteNeedle {
    bytes: Vec<u8>,
    table: ByteSkipTable,
}

impl ByteNeedle {
    /// Construct a [`ByteNeedle`] using a hex pattern.
    ///
    /// # Syntax
    /// Expects a non-empty sequence of `byte` separated by whitespace, where `byte` is
    /// exactly 2 hexadecimals (uppercase or lowercase).
    ///
    /// # Example
    /// ```
    /// # use seqfind_common::{ByteNeedle, Needle as _};
    /// let needle = ByteNeedle::from_hex("78 9A bc").unwrap();
    /// let haystack = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE];
    /// let matched = needle.find(&haystack).unwrap();
    /// assert_eq!(&haystack[matched.start()..], [0x78, 0x9A, 0xBC, 0xDE]);
    /// ```
    pub fn from_hex(pattern: &str) -> Result<Self, ParseError<'_>> {
        match parsing::parse_hex(pattern) {
            Ok(bytes) => Ok(Self::from_parsed(bytes)),
            Err(errors) => {
                let error = &errors[0];
                Err(ParseError {
                    source: pattern,
                    span: error.span(),
                    reason: Reason::from(error.reason()),
                })
            }
        }
    }

    /// Construct a [`ByteNeedle`] using raw bytes, in plain Rust.
    ///
    /// # Example
    /// ```
    /// # use seqfind_common::{ByteNeedle, Error, Needle as _};
    /// let needle = ByteNeedle::from_bytes(b"ana").unwrap();
    /// let starts: Vec<_> = needle.find_iter("bananas").map(|x| x.start()).collect();
    /// assert_eq!(starts, [1, 3]);
    /// assert_eq!(ByteNeedle::from_bytes(b"").unwrap_err(), Error::EmptyNeedle);
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let table = ByteSkipTable::try_new(bytes)?;
        Ok(Self {
            bytes: bytes.to_vec(),
            table,
        })
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    fn from_parsed(bytes: Vec<u8>) -> Self {
        // the parser never produces an empty pattern
        let table = ByteSkipTable::new(&bytes);
        Self { bytes, table }
    }
}

impl Sealed for ByteNeedle {}

impl Pattern for ByteNeedle {
    type Item = u8;

    fn width(&self) -> usize {
        self.bytes.len()
    }

    fn element(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }

    fn shift(&self, element: &u8) -> usize {
        self.table.shift(*element)
    }
}

impl Needle for ByteNeedle {
    type Item = u8;

    fn find_iter<'iter, 'needle: 'iter, 'haystack: 'iter, H>(
        &'needle self,
        haystack: &'haystack H,
    ) -> impl Iterator<Item = Match> + 'iter
    where
        H: Haystack<Item = Self::Item> + ?Sized,
    {
        let len = self.width();
        ByteIter::new(self, haystack).map(move |start| Match::new(start, len))
    }

    fn len(&self) -> usize {
        self.width()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ByteNeedle,
        DynamicNeedle,
        Needle as _,
        StaticNeedle,
    };
    use std::collections::VecDeque;

    const HAYSTACK: &str = "\
>seq_01 promoter region, forward strand
TTGACAATTAATCATCGGCTCGTATAATGTGTGGAATTGTGAGCGGATAACAATTTCACACAGGAAACAGCT
ATGACCATGATTACGGATTCACTGGCCGTCGTTTTACAACGTCGTGACTGGGAAAACCCTGGCGTTACCCAA
CTTAATCGCCTTGCAGCACATCCCCCTTTCGCCAGCTGGCGTAATAGCGAAGAGGCCCGCACCGATCGCCCT
>seq_02 TATA box variants
GGGCTATAAAAGGGGGTATAAATGGGGCTATATAAGGGTATAAAAGGGCTATAAATAGGGGTATATATGGGG
>seq_03 repeats
ACACACACACACACACACACGTGTGTGTGTGTGTAAAAAAAAAATTTTTTTTTTCGCGCGCGCGCG
";

    #[test]
    fn test_from_hex() {
        assert!(ByteNeedle::from_hex("4_ 42 41 43").is_err());
        assert!(ByteNeedle::from_hex("11 ? 22").is_err());
        assert!(ByteNeedle::from_hex("").is_err());
        assert!(ByteNeedle::from_hex("   ").is_err());

        macro_rules! test_success {
            ($pattern:literal, $length:literal) => {
                let needle = ByteNeedle::from_hex($pattern);
                assert!(needle.is_ok(), "\"{}\"", $pattern);
                let needle = needle.unwrap();
                assert_eq!(needle.len(), $length, "\"{}\"", $pattern);
            };
        }

        test_success!("41 42 41 43 41 42 41 42 43", 9);
        test_success!("54 41 54 41", 4);
        test_success!("aA Bb 1d", 3);
        test_success!("  00  ", 1);
    }

    #[test]
    fn test_parse_error() {
        let error = ByteNeedle::from_hex("AA Bx").unwrap_err();
        assert_eq!(error.source(), "AA Bx");
        assert!(error.span().start >= 2);
        assert!(!error.to_string().is_empty());
    }

    #[test]
    fn test_matches() {
        macro_rules! do_test {
            ($pattern:literal, $count:literal) => {
                let needle = ByteNeedle::from_bytes($pattern.as_bytes()).unwrap();
                let matches = needle.find_iter(HAYSTACK).count();
                assert_eq!(matches, $count, "bytes: {}", $pattern);

                let elements: Vec<char> = $pattern.chars().collect();
                let chars: Vec<char> = HAYSTACK.chars().collect();
                let needle = DynamicNeedle::new(&elements).unwrap();
                let matches = needle.find_iter(&chars).count();
                assert_eq!(matches, $count, "chars: {}", $pattern);
            };
        }

        do_test!("TATA", 10);
        do_test!("TATAAA", 4);
        do_test!("ACAC", 10);
        do_test!("GTGTGTGTGTGTG", 1);
        do_test!("A", 104);
        do_test!(">", 3);
        do_test!("GAATTC", 0);
        do_test!("AAAAAAAA", 3);
    }

    #[test]
    fn test_single_byte() {
        // memchr and the scan loop must agree
        let needle = ByteNeedle::from_bytes(b"C").unwrap();
        let contiguous: Vec<_> = needle.find_iter(HAYSTACK).map(|x| x.start()).collect();
        let deque: VecDeque<u8> = HAYSTACK.bytes().collect();
        let scanned: Vec<_> = needle.find_iter(&deque).map(|x| x.start()).collect();
        assert!(!contiguous.is_empty());
        assert_eq!(contiguous, scanned);
    }

    #[test]
    fn test_static() {
        const TATA: StaticNeedle<4> = StaticNeedle::new(*b"TATA");
        let dynamic = ByteNeedle::from_bytes(b"TATA").unwrap();
        assert!(TATA.find_iter(HAYSTACK).eq(dynamic.find_iter(HAYSTACK)));
        assert_eq!(TATA.as_bytes(), dynamic.as_bytes());

        const DOT: StaticNeedle<1> = StaticNeedle::new(*b".");
        assert!(DOT.find(HAYSTACK).is_none());
    }

    #[test]
    fn test_match() {
        let needle = DynamicNeedle::new(&[2, 3]).unwrap();
        let matched = needle.find(&[1, 2, 3, 4]).unwrap();
        assert_eq!(matched.start(), 1);
        assert_eq!(matched.end(), 3);
        assert_eq!(matched.range(), 1..3);
        assert!(needle.find(&[3, 2]).is_none());
    }

    #[test]
    fn test_skip_table() {
        let needle = DynamicNeedle::new(&['g', 'h']).unwrap();
        assert_eq!(needle.skip_table().shift(&'g'), 1);
        assert_eq!(needle.skip_table().shift(&'h'), 2);
    }

    #[test]
    fn test_threads() {
        let elements: Vec<u32> = vec![4, 5, 4];
        let needle = &DynamicNeedle::new(&elements).unwrap();
        let haystack = &(0..64).map(|x| [4, 5][x % 2]).collect::<Vec<u32>>();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(move || needle.find_iter(haystack).count()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), 31);
            }
        });
    }
}
