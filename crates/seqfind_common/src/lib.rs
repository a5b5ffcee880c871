#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

mod error;
mod haystack;
mod needle;
mod parsing;
mod search;
mod site;
mod skip;

#[doc(hidden)]
pub use chumsky::error::Simple;
pub use error::{
    Error,
    ParseError,
    Reason,
};
pub use haystack::Haystack;
pub use needle::{
    ByteNeedle,
    DynamicNeedle,
    Match,
    Needle,
    StaticNeedle,
};
#[doc(hidden)]
pub use parsing::{
    hex_pattern,
    parse_hex,
};
pub use search::{
    find,
    iter_find,
    FindIter,
};
pub use site::{
    ScannedSite,
    SiteSummary,
    Strand,
};
pub use skip::{
    ByteSkipTable,
    SkipTable,
};

mod private {
    pub trait Sealed {}

    impl<T> Sealed for &T where T: Sealed + ?Sized {}
}

pub(crate) use private::Sealed;
