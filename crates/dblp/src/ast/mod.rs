//! In-memory model of the BibTeX records served by DBLP.
//!
//! Entries have no fixed schema: every field is an optional, lower-case name mapped to its
//! value in BibTeX source form.

mod biblio;
mod entry;

pub use biblio::{Biblio, Record};
pub use entry::Entry;
