//! Rewrite rules that turn a DBLP record into a tidier BibTeX entry.
//!
//! [`normalize`] applies the rules in a fixed order. Each rule is also public so it can be
//! applied on its own.

use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    ast::{Entry, Record},
    Error, ErrorKind,
};

/// Prefix DBLP puts in front of every citation key.
pub const CITE_PREFIX: &str = "DBLP:";

/// Fields copied from a proceedings entry into the paper that cross references it.
pub const PROCEEDINGS_FIELDS: [&str; 3] = ["volume", "series", "publisher"];

const LNCS: &str = "Lecture Notes in Computer Science";

/// Brace protected, all uppercase words such as `{FOCS}`.
static UPPERCASE_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Z]+)\}").expect("uppercase group regex is valid"));

/// Switches for the optional rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Leave the `booktitle` of a paper as DBLP wrote it.
    pub keep_booktitle: bool,
    /// Drop the `month` field.
    pub remove_month: bool,
}

/// Normalizes a record into a single entry.
///
/// For a [`Record::Paper`] the citation prefix is stripped, the booktitle shortened (unless
/// [`Options::keep_booktitle`]), the proceedings fields merged into the paper, DOI links
/// removed and the LNCS series abbreviated. The proceedings entry is dropped.
///
/// A [`Record::Single`] only has the citation prefix stripped and DOI links removed.
///
/// # Errors
///
/// Returns an [`ErrorKind::Contract`] error when the citation key does not start with
/// [`CITE_PREFIX`].
pub fn normalize(record: Record, options: Options) -> Result<Entry, Error> {
    let mut entry = match record {
        Record::Paper {
            mut paper,
            proceedings,
        } => {
            trace!("Normalizing paper '{}'", paper.cite());
            strip_cite_prefix(&mut paper)?;
            if options.keep_booktitle {
                debug!("Keeping booktitle as is");
            } else {
                shorten_booktitle(&mut paper);
            }
            merge_proceedings(&mut paper, &proceedings);
            remove_doi_links(&mut paper);
            shorten_series(&mut paper);
            paper
        }
        Record::Single(mut entry) => {
            trace!("Normalizing {} '{}'", entry.kind(), entry.cite());
            strip_cite_prefix(&mut entry)?;
            remove_doi_links(&mut entry);
            entry
        }
    };

    if options.remove_month {
        remove_month(&mut entry);
    }

    Ok(entry)
}

/// Removes [`CITE_PREFIX`] from the citation key.
///
/// # Errors
///
/// Returns an [`ErrorKind::Contract`] error, leaving the entry untouched, when the key does not
/// start with the prefix.
pub fn strip_cite_prefix(entry: &mut Entry) -> Result<(), Error> {
    let cite = entry
        .cite()
        .strip_prefix(CITE_PREFIX)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::Contract,
                format!(
                    "citation key '{}' does not start with '{CITE_PREFIX}'",
                    entry.cite()
                ),
            )
        })?;

    entry.set_cite(cite);
    Ok(())
}

/// Finds the short conference name in a DBLP booktitle.
///
/// DBLP protects acronyms with braces, so the first `{UPPERCASE}` group is taken as the
/// conference name. `{IEEE}` and `{ACM}` name a publisher, in which case the second group is
/// used unless it is missing or `{USA}`.
#[must_use]
pub fn short_proceedings_name(booktitle: &str) -> Option<&str> {
    let mut names = UPPERCASE_GROUP
        .captures_iter(booktitle)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str());

    match names.next()? {
        "IEEE" | "ACM" => names.next().filter(|&name| name != "USA"),
        name => Some(name),
    }
}

/// Rewrites the `booktitle` to `Proceedings of {NAME}` using [`short_proceedings_name`].
///
/// A warning is logged and the entry is left untouched when no name can be found. Returns
/// whether the booktitle was rewritten.
pub fn shorten_booktitle(entry: &mut Entry) -> bool {
    let short = entry
        .get_field("booktitle")
        .and_then(short_proceedings_name)
        .map(|name| format!("Proceedings of {{{name}}}"));

    if let Some(booktitle) = short {
        debug!("Shortened booktitle to '{booktitle}'");
        entry.set_field("booktitle", booktitle);
        true
    } else {
        warn!("Could not determine short proceedings name");
        false
    }
}

/// Copies the [`PROCEEDINGS_FIELDS`] present in `proceedings` into `paper`, replacing any
/// existing values, and removes the `crossref` of `paper`.
pub fn merge_proceedings(paper: &mut Entry, proceedings: &Entry) {
    for name in PROCEEDINGS_FIELDS {
        if let Some(value) = proceedings.get_field(name) {
            trace!("Copying {name} from '{}'", proceedings.cite());
            paper.set_field(name, value);
        }
    }

    paper.remove_field("crossref");
}

/// Removes the `link` and `url` fields when they point at a DOI.
pub fn remove_doi_links(entry: &mut Entry) {
    for name in ["link", "url"] {
        if entry.get_field(name).is_some_and(|v| v.contains("doi")) {
            trace!("Removing DOI {name}");
            entry.remove_field(name);
        }
    }
}

/// Abbreviates the `Lecture Notes in Computer Science` series to `LNCS`.
pub fn shorten_series(entry: &mut Entry) {
    if entry.get_field("series") == Some(LNCS) {
        entry.set_field("series", "LNCS");
    }
}

/// Removes the `month` field.
pub fn remove_month(entry: &mut Entry) {
    entry.remove_field("month");
}
