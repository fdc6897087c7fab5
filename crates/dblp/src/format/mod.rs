//! Contains the [`Format`] trait and its implementations.

mod bibtex;

use crate::{
    ast::{Biblio, Entry},
    Error,
};
pub use bibtex::BibTex;

/// A textual representation that can be parsed into and composed from a [`Biblio`].
///
/// Formats are promises at the type level about what a [`String`] (or similar) represents.
pub trait Format {
    /// Construct a new type using a [`String`] input.
    ///
    /// This function should not panic or fail as creating a [`Format`] is a type promise about
    /// what the [`String`] represents.
    fn new(val: String) -> Self;

    /// Parses this [`Format`] into a [`Biblio`].
    ///
    /// # Errors
    ///
    /// Will return [`Err`] if it's not possible to parse this [`Format`] to [`Biblio`].
    fn parse(self) -> Result<Biblio, Error>;

    /// Composes a [`Biblio`] to this [`Format`].
    ///
    /// This function should not fail as every [`Biblio`] instance must be valid and every
    /// [`Format`] must correctly represent every valid [`Biblio`].
    fn compose(biblio: &Biblio) -> Self;

    /// Composes a single [`Entry`] to a [`String`].
    fn compose_entry(entry: &Entry) -> String;

    /// The current [`Format`] in a raw [`String`].
    fn raw(self) -> String;

    /// The display name of the format.
    fn name() -> &'static str;
}
