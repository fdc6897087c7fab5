#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # dblp
//!
//! dblp fetches bibliographic records from the [DBLP](https://dblp.org) computer science
//! bibliography and tidies them into shorter BibTeX entries: the `DBLP:` citation prefix is
//! dropped, conference booktitles are shortened to `Proceedings of {NAME}`, proceedings
//! metadata is merged into the paper and well known series names are abbreviated. See
//! [`normalize`] for the rules.
//!
//! Keyword search over the same database is available through [`search_by_keywords`].

mod api;
pub mod ast;
mod error;
pub mod format;
pub mod normalize;
pub mod search;

use ast::{Biblio, Record};
pub use error::{Error, ErrorKind};
use format::{BibTex, Format};
use normalize::Options;
use search::Hit;

use log::{info, trace};

type Client = reqwest::blocking::Client;

/// The text of a search that found nothing.
pub const NO_RESULTS: &str = "No results found";

/// Fetch the raw BibTeX record with the DBLP `key`, e.g. `journals/corr/FinkbeinerT15`.
///
/// # Errors
///
/// An `Err` is returned when the request fails or no entry is found for the `key`.
/// An `Err` of [`ErrorKind::Contract`] is returned when the response holds more than two
/// entries.
#[inline]
pub fn biblio_by_key(key: &str) -> Result<Biblio, Error> {
    fetch_biblio::<Client>(key)
}

/// Fetch the record with the DBLP `key` in its [`Record`] shape, ready for
/// [`normalize::normalize`].
///
/// # Errors
///
/// Same as [`biblio_by_key`].
#[inline]
pub fn record_by_key(key: &str) -> Result<Record, Error> {
    biblio_by_key(key).and_then(Record::try_from)
}

/// Fetch the record with the DBLP `key` and write it as BibTeX.
///
/// With `raw` the entries are written as DBLP sent them, otherwise the record is normalized
/// with `options` first.
///
/// # Errors
///
/// Same as [`biblio_by_key`], plus the errors of [`normalize::normalize`] when not `raw`.
#[inline]
pub fn bibtex_by_key(key: &str, raw: bool, options: Options) -> Result<String, Error> {
    compose_record::<Client>(key, raw, options)
}

/// Search publications matching `keywords`, returning at most 100 hits.
///
/// An empty [`Vec`] means DBLP found nothing, which is not an error.
///
/// # Errors
///
/// An `Err` is returned when the request fails or the response cannot be deserialized.
#[inline]
pub fn search_by_keywords(keywords: &str) -> Result<Vec<Hit>, Error> {
    trace!("Search publications with keywords '{keywords}'");
    api::dblp::search_hits_by_keywords::<Client>(keywords)
}

/// Search publications matching `keywords` and list them as text, or [`NO_RESULTS`].
///
/// # Errors
///
/// Same as [`search_by_keywords`].
#[inline]
pub fn search_summary(keywords: &str) -> Result<String, Error> {
    summarize_search::<Client>(keywords)
}

fn fetch_biblio<C: api::Client>(key: &str) -> Result<Biblio, Error> {
    trace!("Fetch record by key of '{key}'");
    let biblio = api::dblp::get_biblio_by_key::<C>(key)?;
    check_entry_count(&biblio)?;
    Ok(biblio)
}

fn compose_record<C: api::Client>(key: &str, raw: bool, options: Options) -> Result<String, Error> {
    let biblio = fetch_biblio::<C>(key)?;

    if raw {
        trace!("Writing the {} entries as parsed", biblio.len());
        return Ok(BibTex::compose(&biblio).raw());
    }

    let entry = Record::try_from(biblio).and_then(|record| normalize::normalize(record, options))?;
    Ok(BibTex::compose(&Biblio::from(entry)).raw())
}

fn summarize_search<C: api::Client>(keywords: &str) -> Result<String, Error> {
    trace!("Search publications with keywords '{keywords}'");
    let hits = api::dblp::search_hits_by_keywords::<C>(keywords)?;

    if hits.is_empty() {
        Ok(NO_RESULTS.to_owned())
    } else {
        info!("Found {} entries", hits.len());
        Ok(search::format_hits(&hits))
    }
}

fn check_entry_count(biblio: &Biblio) -> Result<(), Error> {
    if biblio.len() > 2 {
        Err(Error::new(
            ErrorKind::Contract,
            format!(
                "expected at most 2 entries but DBLP returned {}",
                biblio.len()
            ),
        ))
    } else {
        Ok(())
    }
}
