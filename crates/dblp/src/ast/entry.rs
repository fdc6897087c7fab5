use std::collections::BTreeMap;

/// A single bibliographic entry, such as an `article` or an `inproceedings`.
///
/// Field values are kept in BibTeX source form, so a brace protected group like `{IEEE}` in a
/// booktitle keeps its braces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    kind: String,
    cite: String,
    fields: BTreeMap<String, String>,
}

impl Entry {
    /// Create a new [`Entry`] without any fields.
    ///
    /// The `kind` is normalized to lowercase.
    #[must_use]
    pub fn new<K, C>(kind: K, cite: C) -> Self
    where
        K: Into<String>,
        C: Into<String>,
    {
        Self {
            kind: kind.into().to_lowercase(),
            cite: cite.into(),
            fields: BTreeMap::new(),
        }
    }

    /// The kind of the entry, e.g. `article` or `inproceedings`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the citation key of this entry.
    #[must_use]
    pub fn cite(&self) -> &str {
        &self.cite
    }

    /// Sets the citation key of this entry to a new value and returns the existing.
    pub fn set_cite(&mut self, cite: String) -> String {
        std::mem::replace(&mut self.cite, cite)
    }

    /// Searches for a field value that matches the `name` given.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns true when the entry has a field called `name`.
    #[must_use]
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Sets the field `name` to `value` and returns the previous value, if there was one.
    ///
    /// Field names are case insensitive in BibTeX so `name` is stored in lowercase.
    pub fn set_field<N, V>(&mut self, name: N, value: V) -> Option<String>
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.fields
            .insert(name.into().to_lowercase(), value.into())
    }

    /// Removes the field `name` and returns its value, if there was one.
    pub fn remove_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Iterate over the fields in alphabetical order of their names.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<N, V> Extend<(N, V)> for Entry
where
    N: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (N, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.set_field(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_lowercase() {
        let mut entry = Entry::new("Article", "DBLP:journals/corr/FinkbeinerT15");
        entry.set_field("Title", "Counterexample-Guided Synthesis");

        assert_eq!("article", entry.kind());
        assert_eq!(
            Some("Counterexample-Guided Synthesis"),
            entry.get_field("title")
        );
        assert!(entry.get_field("Title").is_none());
    }

    #[test]
    fn fields_iterate_in_alphabetical_order() {
        let mut entry = Entry::new("misc", "cite");
        entry.extend([("year", "2015"), ("author", "Me"), ("title", "T")]);

        let names = entry.fields().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(vec!["author", "title", "year"], names);
    }

    #[test]
    fn set_cite_returns_previous_key() {
        let mut entry = Entry::new("misc", "old");
        assert_eq!("old", entry.set_cite("new".to_owned()));
        assert_eq!("new", entry.cite());
    }

    #[test]
    fn remove_field_returns_value() {
        let mut entry = Entry::new("misc", "cite");
        entry.set_field("month", "oct");

        assert_eq!(Some("oct".to_owned()), entry.remove_field("month"));
        assert!(!entry.contains_field("month"));
        assert_eq!(None, entry.remove_field("month"));
    }
}
