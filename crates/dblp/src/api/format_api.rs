use log::trace;

use crate::{ast::Biblio, format::Format, Error, ErrorKind};

use super::Client;

/// Fetches `url` and parses the body as `F`. A body without entries is [`ErrorKind::NoValue`].
pub(crate) fn get_biblio_by_url<C: Client, F: Format>(url: &str) -> Result<Biblio, Error> {
    let client = C::default();

    let biblio = client
        .get_text(url)
        .and_then(|text| {
            if text.is_empty() {
                Err(Error::new(
                    ErrorKind::NoValue,
                    "Request did not find any results",
                ))
            } else {
                Ok(F::new(text))
            }
        })
        .and_then(Format::parse)?;

    trace!("Parsed {} entries as {}", biblio.len(), F::name());
    if biblio.is_empty() {
        Err(Error::new(
            ErrorKind::NoValue,
            format!("Response holds no {} entries", F::name()),
        ))
    } else {
        Ok(biblio)
    }
}
