//! A [`Client`] that never touches the network. Each [`MockClient`] is parameterised by a
//! [`Fixture`] type that supplies the response body, and it remembers the last URL it was
//! asked for so tests can check what would have been requested.

use std::{cell::RefCell, marker::PhantomData};

use serde::de::DeserializeOwned;

use super::Client;
use crate::{Error, ErrorKind};

thread_local! {
    pub(crate) static LAST_URL: RefCell<Option<String>> = RefCell::new(None);
}

/// Asserts that `$expected` is the URL last handed to a [`MockClient`] on this thread.
macro_rules! assert_requested_url {
    ($expected: expr) => {
        let url = $crate::api::mock::LAST_URL.with(|url| url.borrow().clone().unwrap_or_default());
        assert_eq!($expected, url);
    };
}

/// The canned response body of a [`MockClient`].
pub(crate) trait Fixture
where
    Self: Default,
{
    fn body() -> Result<String, Error>;
}

/// Declares unit types implementing [`Fixture`], one per `Name => body` pair.
macro_rules! fixtures {
    ($($fixture:ident => $body:expr,)*) => {
        $(
            #[derive(Default)]
            pub(crate) struct $fixture;

            impl $crate::api::mock::Fixture for $fixture {
                fn body() -> Result<String, $crate::Error> {
                    $body
                }
            }
        )*
    };
}

fixtures! {
    EmptyBody => Ok(String::new()),
    NetworkError => Err(Error::new(ErrorKind::IO, "Network error")),
}

#[derive(Default)]
pub(crate) struct MockClient<F: Fixture = EmptyBody> {
    _fixture: PhantomData<F>,
}

impl<F: Fixture> MockClient<F> {
    fn answer(url: &str) -> Result<String, Error> {
        LAST_URL.with(|last| *last.borrow_mut() = Some(url.to_owned()));
        F::body()
    }
}

impl<F: Fixture> Client for MockClient<F> {
    fn get_text(&self, url: &str) -> Result<String, Error> {
        Self::answer(url)
    }

    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        Self::answer(url).and_then(|json| {
            serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
        })
    }
}

pub(crate) use assert_requested_url;
pub(crate) use fixtures;
