use log::{debug, trace};
use serde::Deserialize;

use crate::{ast::Biblio, format::BibTex, search::Hit, Error, ErrorKind};

use super::{format_api, Client};

/// Page size requested from the search API.
pub(crate) const MAX_HITS: usize = 100;

const SEARCH_URL: &str = "http://dblp.uni-trier.de/search/publ/api";

macro_rules! bib_url {
    ($key: expr) => {
        format!("http://dblp.uni-trier.de/rec/bib2/{}.bib", $key)
    };
}

#[inline]
pub(crate) fn get_biblio_by_key<C: Client>(key: &str) -> Result<Biblio, Error> {
    format_api::get_biblio_by_url::<C, BibTex>(&bib_url!(key))
}

#[derive(Deserialize)]
struct QueryResult {
    result: SearchResult,
}

#[derive(Deserialize)]
struct SearchResult {
    hits: Hits,
}

#[derive(Deserialize)]
struct Hits {
    #[serde(rename = "@total")]
    total: String,
    #[serde(default)]
    hit: Vec<HitInfo>,
}

#[derive(Deserialize)]
struct HitInfo {
    info: Hit,
}

fn search_url(keywords: &str) -> Result<String, Error> {
    let max_hits = MAX_HITS.to_string();
    reqwest::Url::parse_with_params(
        SEARCH_URL,
        &[("q", keywords), ("h", max_hits.as_str()), ("format", "json")],
    )
    .map(String::from)
    .map_err(|e| Error::wrap(ErrorKind::IO, e))
}

/// An empty [`Vec`] is returned when DBLP reports no hits at all.
pub(crate) fn search_hits_by_keywords<C: Client>(keywords: &str) -> Result<Vec<Hit>, Error> {
    let url = search_url(keywords)?;
    let client = C::default();

    let query_result: QueryResult = client.get_json(&url)?;
    let hits = query_result.result.hits;

    let total = hits.total.trim().parse::<usize>().map_err(|e| {
        Error::new(
            ErrorKind::Deserialize,
            format!("'@total' of '{}' is not a number: {e}", hits.total),
        )
    })?;
    debug!("DBLP reports {total} hits, {} sent", hits.hit.len());

    if total == 0 {
        trace!("No hits for '{keywords}'");
        Ok(Vec::new())
    } else {
        Ok(hits.hit.into_iter().map(|h| h.info).collect())
    }
}
