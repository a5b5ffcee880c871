use crate::{
    find,
    iter_find,
    Error,
};
use std::{
    fmt::{
        self,
        Display,
        Formatter,
    },
    str::FromStr,
};

/// The strand a motif was scanned on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strand {
    Plus,
    Minus,
    None,
}

impl Strand {
    /// The opposite strand. Unstranded hits stay unstranded.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
            Self::None => Self::None,
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::None => "none",
        };
        write!(f, "{what}")
    }
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plus" => Ok(Self::Plus),
            "minus" => Ok(Self::Minus),
            "none" => Ok(Self::None),
            _ => Err(format!("'{s}' is not a strand")),
        }
    }
}

/// A single motif hit reported for a sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannedSite {
    pub motif_id: String,
    pub strand: Strand,
    pub position: usize,
    pub pvalue: f64,
}

impl ScannedSite {
    /// A compact symbol naming the motif and its strand, suitable as a search element.
    ///
    /// `motif_` is dropped from the id and the strand becomes a `+` or `-` suffix.
    /// Unstranded hits keep a `_none` suffix. With `reverse`, the symbol describes the hit
    /// as seen from the opposite strand.
    ///
    /// ```
    /// # use seqfind_common::{ScannedSite, Strand};
    /// let site = ScannedSite {
    ///     motif_id: "motif_3".into(),
    ///     strand: Strand::Plus,
    ///     position: 17,
    ///     pvalue: 1.2e-5,
    /// };
    /// assert_eq!(site.symbol(false), "3+");
    /// assert_eq!(site.symbol(true), "3-");
    /// ```
    #[must_use]
    pub fn symbol(&self, reverse: bool) -> String {
        let strand = if reverse {
            self.strand.flip()
        } else {
            self.strand
        };
        format!("{}_{strand}", self.motif_id)
            .replace("motif_", "")
            .replace("_plus", "+")
            .replace("_minus", "-")
    }
}

/// The motif hits reported for one sequence, in the order they occur along it.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteSummary {
    pub sequence_id: String,
    pub pvalue: f64,
    pub sites: Vec<ScannedSite>,
}

impl SiteSummary {
    #[must_use]
    pub fn symbols(&self, reverse: bool) -> Vec<String> {
        self.sites.iter().map(|site| site.symbol(reverse)).collect()
    }

    /// Finds the first run of consecutive sites whose symbols spell out `arrangement`,
    /// returning the index of the run's first site.
    ///
    /// ```
    /// # use seqfind_common::{ScannedSite, SiteSummary, Strand};
    /// let site = |id: &str, strand| ScannedSite {
    ///     motif_id: id.into(),
    ///     strand,
    ///     position: 0,
    ///     pvalue: 0.0,
    /// };
    /// let summary = SiteSummary {
    ///     sequence_id: "seq_1".into(),
    ///     pvalue: 1e-3,
    ///     sites: vec![
    ///         site("motif_1", Strand::Plus),
    ///         site("motif_2", Strand::Minus),
    ///         site("motif_1", Strand::Plus),
    ///     ],
    /// };
    /// assert_eq!(summary.find_arrangement(&["2-", "1+"], false), Ok(Some(1)));
    /// assert_eq!(summary.find_arrangement(&["1-"], true), Ok(Some(0)));
    /// ```
    pub fn find_arrangement<S>(
        &self,
        arrangement: &[S],
        reverse: bool,
    ) -> Result<Option<usize>, Error>
    where
        S: AsRef<str>,
    {
        let needle: Vec<&str> = arrangement.iter().map(AsRef::as_ref).collect();
        let haystack = self.symbols(reverse);
        let haystack: Vec<&str> = haystack.iter().map(String::as_str).collect();
        find(&needle, &haystack)
    }

    /// Every (possibly overlapping) run of consecutive sites spelling out `arrangement`.
    pub fn arrangements<S>(&self, arrangement: &[S], reverse: bool) -> Result<Vec<usize>, Error>
    where
        S: AsRef<str>,
    {
        let needle: Vec<&str> = arrangement.iter().map(AsRef::as_ref).collect();
        let haystack = self.symbols(reverse);
        let haystack: Vec<&str> = haystack.iter().map(String::as_str).collect();
        Ok(iter_find(&needle, &haystack)?.collect())
    }
}
