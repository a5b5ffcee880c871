#![warn(clippy::pedantic)]

extern crate self as seqfind;

pub use seqfind_common::{
    find,
    iter_find,
    ByteNeedle,
    ByteSkipTable,
    DynamicNeedle,
    Error,
    FindIter,
    Haystack,
    Match,
    Needle,
    ParseError,
    Reason,
    ScannedSite,
    SiteSummary,
    SkipTable,
    StaticNeedle,
    Strand,
};
pub use seqfind_macros::seqfind;

#[cfg(test)]
mod tests {
    use crate::{
        find,
        iter_find,
        seqfind,
        ByteNeedle,
        DynamicNeedle,
        Needle as _,
    };

    const HAYSTACK: &str = "\
GCGCATGCGATCGTTATAAAAGGCTCGATCGATCGGGTATAATCGATCGATAGCTAGCTTATATAAGGCGC
ATCGATCGTTGACATTTTTTTTGACAATCGATCGATGGGCCCGGGCCCAAATTTAAATTTGAATTCGAATTC
";

    #[test]
    fn test_seqfind() {
        seqfind! {
            const _1 = hex("11 22");
            pub const _2 = hex("11 22");
            pub(crate) const _3 = hex("11 22");
            pub(super) const _4 = hex("11 22");
            const _5 = hex("11");
            const _6 = text("?");
        }
        assert_eq!(_1.as_bytes(), [0x11, 0x22]);
        assert_eq!(_5.len(), 1);
        assert_eq!(_6.as_bytes(), b"?");
    }

    #[test]
    fn test_matches() {
        macro_rules! do_test {
            ($pattern:literal, $count:literal) => {{
                let needle = ByteNeedle::from_hex($pattern).unwrap();
                let matches = needle.find_iter(HAYSTACK).count();
                assert_eq!(matches, $count, "dyn: {}", $pattern);

                seqfind! { const NEEDLE = hex($pattern); }
                let matches = NEEDLE.find_iter(HAYSTACK).count();
                assert_eq!(matches, $count, "const: {}", $pattern);

                let matches = iter_find(needle.as_bytes(), HAYSTACK).unwrap().count();
                assert_eq!(matches, $count, "generic: {}", $pattern);
            }};
        }

        do_test!("54 41 54 41", 4);
        do_test!("47 41 41 54 54 43", 2);
        do_test!("41 54 43 47", 9);
        do_test!("54 54", 16);
        do_test!("0a", 2);
        do_test!("47 47 47 43 43 43", 2);
        do_test!("4e", 0);
    }

    #[test]
    fn test_text() {
        seqfind! {
            const ECORI = text("GAATTC");
            const TATA = text("TATA");
        }
        let starts: Vec<_> = ECORI.find_iter(HAYSTACK).map(|x| x.start()).collect();
        let expected: Vec<_> = iter_find(b"GAATTC", HAYSTACK).unwrap().collect();
        assert_eq!(starts, expected);
        assert_eq!(
            TATA.find(HAYSTACK).map(|x| x.start()),
            find(b"TATA", HAYSTACK).unwrap()
        );
    }

    #[test]
    fn test_generic_agrees() {
        let codons: Vec<&str> = HAYSTACK
            .as_bytes()
            .chunks(3)
            .filter_map(|codon| std::str::from_utf8(codon).ok())
            .collect();
        let needle = DynamicNeedle::new(&["GGG", "CCC"]).unwrap();
        let positions: Vec<_> = needle.find_iter(&codons).map(|x| x.start()).collect();
        assert_eq!(positions, [36, 38]);
        assert_eq!(
            positions,
            iter_find(&["GGG", "CCC"], &codons).unwrap().collect::<Vec<_>>()
        );
        assert_eq!(find(&["GTT", "ATA"], &codons), Ok(Some(4)));
    }
}
