use log::trace;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;

use crate::{Error, ErrorKind};

pub(crate) mod dblp;
pub(crate) mod format_api;
#[cfg(test)]
pub(crate) mod mock;

/// The HTTP seam: one blocking GET per call, answered as text or as JSON.
pub trait Client
where
    Self: Default,
{
    fn get_text(&self, url: &str) -> Result<String, Error>;
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_text(&self, url: &str) -> Result<String, Error> {
        let text = send(self, url)?
            .text()
            .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;

        if text.is_empty() {
            Err(Error::new(ErrorKind::NoValue, "Response text is empty"))
        } else {
            Ok(text)
        }
    }

    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        send(self, url)?
            .json()
            .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
    }
}

/// Non-success statuses are errors here so an error page is never parsed as a record.
fn send(client: &reqwest::blocking::Client, url: &str) -> Result<Response, Error> {
    trace!("GET {url}");
    client
        .get(url)
        .send()
        .and_then(Response::error_for_status)
        .map_err(|e| Error::wrap(ErrorKind::IO, e))
}
