use chumsky::error::SimpleReason;
use std::{
    fmt::{
        self,
        Display,
        Formatter,
    },
    ops::Range,
};

/// Describes invalid arguments passed to a search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The needle had no elements, so neither a skip table nor a scan window exists for it.
    ///
    /// ```
    /// # use seqfind_common::{find, Error};
    /// let needle: [u8; 0] = [];
    /// assert_eq!(find(&needle, "abc"), Err(Error::EmptyNeedle));
    /// ```
    EmptyNeedle,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNeedle => write!(
                f,
                "invalid argument: a needle must contain at least one element"
            ),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reason {
    Unexpected,
    Unclosed,
    Custom(String),
}

impl<I, S> From<&SimpleReason<I, S>> for Reason {
    fn from(reason: &SimpleReason<I, S>) -> Self {
        match reason {
            SimpleReason::Unexpected => Self::Unexpected,
            SimpleReason::Unclosed {
                span: _,
                delimiter: _,
            } => Self::Unclosed,
            SimpleReason::Custom(custom) => Self::Custom(custom.clone()),
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::Unexpected => "unexpected input",
            Self::Unclosed => "unclosed delimiter",
            Self::Custom(custom) => custom,
        };
        write!(f, "{what}")
    }
}

/// Describes errors encountered when parsing hex pattern syntax
#[derive(Clone, Debug)]
pub struct ParseError<'a> {
    pub(crate) source: &'a str,
    pub(crate) span: Range<usize>,
    pub(crate) reason: Reason,
}

impl<'a> ParseError<'a> {
    /// The pattern text that failed to parse.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    #[must_use]
    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

impl Display for ParseError<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let reason = &self.reason;
        let start = self.span.start.min(self.source.len());
        let end = self.span.end.min(self.source.len());
        let pattern = self.source.get(start..end).unwrap_or_default();
        write!(
            f,
            "'{reason}' while parsing pattern \"{pattern}\" in range [{start}, {end})",
        )
    }
}

impl std::error::Error for ParseError<'_> {}

#[cfg(test)]
mod tests {
    use super::{
        Error,
        ParseError,
        Reason,
    };

    #[test]
    fn test_display() {
        assert_eq!(
            Error::EmptyNeedle.to_string(),
            "invalid argument: a needle must contain at least one element"
        );

        let error = ParseError {
            source: "AA Bx",
            span: 4..5,
            reason: Reason::Custom("'x' is not a hexdigit".into()),
        };
        assert_eq!(
            error.to_string(),
            "''x' is not a hexdigit' while parsing pattern \"x\" in range [4, 5)"
        );

        // spans at the end of input point one past the source
        let error = ParseError {
            source: "AA",
            span: 2..3,
            reason: Reason::Unexpected,
        };
        assert_eq!(
            error.to_string(),
            "'unexpected input' while parsing pattern \"\" in range [2, 2)"
        );
    }
}
