//! Search results from the DBLP publication search API.

use std::fmt;

use serde::Deserialize;

/// Prefix of every canonical record url, stripped when a [`Hit`] is displayed.
pub const RECORD_URL_PREFIX: &str = "https://dblp.org/rec/";

/// A single publication found by a keyword search.
///
/// Displays as a two line summary:
///
/// ```text
/// - "Counterexample-Guided Synthesis of Reactive Systems." by Bernd Finkbeiner, Leander Tentrup
///   conf/focs/FinkbeinerT15
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Hit {
    /// Title of the publication.
    pub title: String,
    /// Names of the authors, in order.
    #[serde(default, deserialize_with = "authors::deserialize")]
    pub authors: Vec<String>,
    /// Canonical record url.
    pub url: String,
}

impl Hit {
    /// The record url without [`RECORD_URL_PREFIX`], which for DBLP is the key accepted by a
    /// lookup.
    #[must_use]
    pub fn key(&self) -> &str {
        self.url
            .strip_prefix(RECORD_URL_PREFIX)
            .unwrap_or(&self.url)
    }
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- \"{}\" by {}\n  {}",
            self.title,
            self.authors.join(", "),
            self.key()
        )
    }
}

/// Renders every hit on its own lines.
#[must_use]
pub fn format_hits(hits: &[Hit]) -> String {
    hits.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

mod authors {
    use serde::{Deserialize, Deserializer};

    /// `{"author": ...}` where a single author is not wrapped in a list.
    #[derive(Deserialize)]
    struct Authors {
        author: OneOrMany,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Author>),
        One(Author),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Author {
        Name(String),
        Person { text: String },
    }

    impl From<Author> for String {
        fn from(author: Author) -> Self {
            match author {
                Author::Name(name) | Author::Person { text: name } => name,
            }
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = match Authors::deserialize(deserializer)?.author {
            OneOrMany::Many(authors) => authors.into_iter().map(String::from).collect(),
            OneOrMany::One(author) => vec![author.into()],
        };
        Ok(names)
    }
}
