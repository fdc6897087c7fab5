use crate::{Error, ErrorKind};

use super::Entry;

/// An ordered collection of entries, in the order they were parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Biblio {
    entries: Vec<Entry>,
}

impl Biblio {
    /// Create a new [`Biblio`] from a list of bibliography entries.
    #[must_use]
    pub const fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in parse order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Consumes the [`Biblio`] returning the entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl From<Entry> for Biblio {
    fn from(entry: Entry) -> Self {
        Self::new(vec![entry])
    }
}

/// The shape of a single DBLP record.
///
/// A lookup by key returns either one entry (e.g. a journal article) or a conference paper
/// followed by the proceedings it cross references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    /// A record made of one entry.
    Single(Entry),
    /// A paper with the proceedings entry that its `crossref` field points at.
    Paper {
        /// The `inproceedings` entry.
        paper: Entry,
        /// The parent `proceedings` entry.
        proceedings: Entry,
    },
}

impl TryFrom<Biblio> for Record {
    type Error = Error;

    fn try_from(biblio: Biblio) -> Result<Self, Self::Error> {
        let mut entries = biblio.into_entries().into_iter();
        match (entries.next(), entries.next(), entries.next()) {
            (None, ..) => Err(Error::new(
                ErrorKind::NoValue,
                "DBLP did not return any entries",
            )),
            (Some(entry), None, _) => Ok(Self::Single(entry)),
            (Some(paper), Some(proceedings), None) => Ok(Self::Paper { paper, proceedings }),
            (Some(_), Some(_), Some(_)) => Err(Error::new(
                ErrorKind::Contract,
                format!(
                    "expected at most 2 entries but DBLP returned {}",
                    3 + entries.count()
                ),
            )),
        }
    }
}

impl From<Record> for Biblio {
    fn from(record: Record) -> Self {
        match record {
            Record::Single(entry) => Self::from(entry),
            Record::Paper { paper, proceedings } => Self::new(vec![paper, proceedings]),
        }
    }
}
