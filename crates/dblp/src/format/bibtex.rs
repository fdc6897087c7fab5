use std::collections::HashMap;

use crate::{
    ast::{Biblio, Entry},
    Error,
};

use super::Format;

use biblatex::{RawBibliography, RawEntry};
use log::trace;

/// Indent used in front of every field when composing.
const INDENT: &str = " ";

/// The BibTeX month macros, which stay undelimited when written out.
const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// How deep `@string` macros may refer to one another before expansion gives up.
const MAX_MACRO_DEPTH: usize = 16;

/// A type wrapper around [`String`] to represent a `BibTex` format string.
///
/// Field values are kept as they appear in the source, TeX markup included, so an author
/// like `J{\"{u}}rgen` or a title holding `$\omega$` is written back unchanged. Only the
/// outer delimiters are dropped, `#` concatenations and `@string` macros are expanded and
/// runs of whitespace are collapsed into one space.
#[derive(Debug)]
pub struct BibTex(String);

impl Format for BibTex {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn parse(self) -> Result<Biblio, Error> {
        let raw = RawBibliography::parse(&self.0);
        trace!(
            "Read {} entries and {} string macros",
            raw.entries.len(),
            raw.abbreviations.len()
        );

        let entries = raw
            .entries
            .iter()
            .map(|entry| entry_from_raw(entry, &raw.abbreviations))
            .collect();

        Ok(Biblio::new(entries))
    }

    fn compose(biblio: &Biblio) -> Self {
        let mut entries = biblio.entries().collect::<Vec<_>>();
        entries.sort_by(|a, b| a.cite().cmp(b.cite()));

        let bib = entries
            .into_iter()
            .map(|entry| format!("{}\n", Self::compose_entry(entry)))
            .collect();

        Self(bib)
    }

    fn compose_entry(entry: &Entry) -> String {
        let fields = entry
            .fields()
            .map(|(name, value)| {
                if name == "month" && MONTHS.contains(&value) {
                    format!(",\n{INDENT}{name} = {value}")
                } else {
                    format!(",\n{INDENT}{name} = {{{value}}}")
                }
            })
            .collect::<String>();

        format!("@{}{{{}{fields}\n}}\n", entry.kind(), entry.cite())
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "BibTex"
    }
}

fn entry_from_raw(raw: &RawEntry<'_>, abbreviations: &HashMap<&str, &str>) -> Entry {
    let mut entry = Entry::new(raw.entry_type.trim(), raw.key.trim());

    for (name, value) in &raw.fields {
        let value = expand_value(value, abbreviations, 0);
        entry.set_field(name.trim(), collapse_whitespace(&value));
    }

    entry
}

/// Expands a raw field value into its text without the outer delimiters.
fn expand_value(raw: &str, abbreviations: &HashMap<&str, &str>, depth: usize) -> String {
    concatenated_parts(raw.trim())
        .into_iter()
        .map(|part| expand_part(part.trim(), abbreviations, depth))
        .collect()
}

fn expand_part(part: &str, abbreviations: &HashMap<&str, &str>, depth: usize) -> String {
    if let Some(inner) = strip_delimiters(part, '{', '}') {
        return inner.to_owned();
    }
    if let Some(inner) = strip_delimiters(part, '"', '"') {
        return inner.to_owned();
    }

    let macro_value = abbreviations
        .iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(part))
        .map(|(_, value)| *value);

    match macro_value {
        Some(value) if depth < MAX_MACRO_DEPTH => expand_value(value, abbreviations, depth + 1),
        _ => {
            let lower = part.to_ascii_lowercase();
            if MONTHS.contains(&lower.as_str()) {
                lower
            } else {
                part.to_owned()
            }
        }
    }
}

fn strip_delimiters(part: &str, open: char, close: char) -> Option<&str> {
    part.strip_prefix(open)?.strip_suffix(close)
}

/// Splits a raw value at the `#` operators that sit outside of braces and quotes.
fn concatenated_parts(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut quoted = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '"' if depth == 0 => quoted = !quoted,
            '#' if depth == 0 && !quoted => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);

    parts
}

/// DBLP wraps long values over several indented lines.
fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAPER_BIB: &str = include_str!("../../tests/data/focs_paper.bib");
    const ACCENTED_BIB: &str = include_str!("../../tests/data/accented_article.bib");

    fn parse(raw: &str) -> Biblio {
        BibTex::new(raw.to_owned())
            .parse()
            .expect("BibTeX parsing does not fail")
    }

    fn single(raw: &str) -> Entry {
        parse(raw).into_entries().remove(0)
    }

    #[test]
    fn parsing_an_empty_string_returns_an_empty_biblio() {
        assert!(parse("").is_empty());
        assert!(parse("\n  \n").is_empty());
        assert!(parse("No entries in here").is_empty());
    }

    #[test]
    fn dblp_paper_parses_into_paper_then_proceedings() {
        let biblio = parse(PAPER_BIB);
        let entries = biblio.into_entries();

        assert_eq!(2, entries.len());
        assert_eq!("inproceedings", entries[0].kind());
        assert_eq!("DBLP:conf/focs/FinkbeinerT15", entries[0].cite());
        assert_eq!(Some("DBLP:conf/focs/2015"), entries[0].get_field("crossref"));
        assert_eq!("proceedings", entries[1].kind());
        assert_eq!("DBLP:conf/focs/2015", entries[1].cite());
    }

    #[test]
    fn brace_groups_keep_their_braces() {
        let entry =
            single("@inproceedings{DBLP:x, booktitle = {56th {IEEE} Symposium, {FOCS} 2015},}");

        assert_eq!(
            Some("56th {IEEE} Symposium, {FOCS} 2015"),
            entry.get_field("booktitle")
        );
    }

    #[test]
    fn url_fields_do_not_gain_braces() {
        let entry = single("@article{DBLP:x, url = {https://doi.org/10.1/x},}");

        assert_eq!(Some("https://doi.org/10.1/x"), entry.get_field("url"));
    }

    #[test]
    fn tex_markup_is_kept_verbatim() {
        let entry = single(ACCENTED_BIB);

        assert_eq!(
            Some(r#"J{\"{u}}rgen M{\"{o}}ller and Ana Mar{\'{\i}}a Garc{\'{\i}}a"#),
            entry.get_field("author")
        );
        assert_eq!(
            Some(r#"Deciding $\omega$-Regular Properties of {B}{\"u}chi Automata with {\#}P Oracles"#),
            entry.get_field("title")
        );
        assert_eq!(Some(r"10.48550/arXiv.1709\_01234"), entry.get_field("doi"));
    }

    #[test]
    fn line_continuations_collapse_to_one_space() {
        let entry = single("@article{DBLP:x, author = {Bernd Finkbeiner and\n               Leander Tentrup},}");

        assert_eq!(
            Some("Bernd Finkbeiner and Leander Tentrup"),
            entry.get_field("author")
        );
    }

    #[test]
    fn month_macro_stays_an_abbreviation() {
        assert_eq!(Some("sep"), single(ACCENTED_BIB).get_field("month"));
        assert_eq!(
            Some("sep"),
            single("@article{DBLP:x, month = SEP,}").get_field("month")
        );
    }

    #[test]
    fn string_macros_and_concatenation_are_expanded() {
        let entry = single(
            r#"@string{tcs = "Theoretical Computer Science"}
@article{DBLP:x, journal = tcs, note = "Part " # {II} # " of " # tcs, year = 2015,}"#,
        );

        assert_eq!(Some("Theoretical Computer Science"), entry.get_field("journal"));
        assert_eq!(
            Some("Part II of Theoretical Computer Science"),
            entry.get_field("note")
        );
        assert_eq!(Some("2015"), entry.get_field("year"));
    }

    #[test]
    fn self_referencing_macro_stops_expanding() {
        let entry = single("@string{loop = loop}\n@misc{DBLP:x, note = loop,}");

        assert_eq!(Some("loop"), entry.get_field("note"));
    }

    #[test]
    fn compose_entry_sorts_fields_and_indents() {
        let mut entry = Entry::new("article", "FinkbeinerT15");
        entry.set_field("year", "2015");
        entry.set_field("author", "Bernd Finkbeiner and Leander Tentrup");
        entry.set_field("month", "sep");

        // indents and newlines are important in this string so don't format!
        let expected = "@article{FinkbeinerT15,
 author = {Bernd Finkbeiner and Leander Tentrup},
 month = sep,
 year = {2015}
}
";
        assert_eq!(expected, BibTex::compose_entry(&entry));
    }

    #[test]
    fn compose_orders_entries_by_cite_and_separates_them() {
        let biblio = Biblio::new(vec![
            Entry::new("proceedings", "b"),
            Entry::new("inproceedings", "a"),
        ]);

        assert_eq!(
            "@inproceedings{a\n}\n\n@proceedings{b\n}\n\n",
            BibTex::compose(&biblio).raw()
        );
    }

    #[test]
    fn compose_then_parse_keeps_fields() {
        for bib in [PAPER_BIB, ACCENTED_BIB] {
            let original = parse(bib);
            let reparsed = parse(&BibTex::compose(&original).raw());

            assert_eq!(original.len(), reparsed.len());
            for entry in original.entries() {
                let again = reparsed
                    .entries()
                    .find(|e| e.cite() == entry.cite())
                    .expect("every entry is composed");
                assert_eq!(entry, again);
            }
        }
    }
}
