//! Domain types for certificate generation.
//!
//! A [`Person`] is parsed once from a roster row and never mutated. A
//! [`FieldSet`] is built fresh for every person and consumed by a single
//! template fill, so values can never leak from one certificate to the next.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::CertificateOptions;

/// Textual date format used for completion dates and the default `{{DATE}}`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Names used when neither a roster nor an explicit list is available.
pub const EXAMPLE_NAMES: &[&str] = &["Lincoln,Abraham", "King,Martin Luther", "Mandela,Nelson"];

/// Stem used for files whose sanitized name came out empty.
const UNNAMED_STEM: &str = "unnamed";

// ---------------------------------------------------------------------------
// Person
// ---------------------------------------------------------------------------

/// One participant, as read from a roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Display name: `"<last> <first>"`, trimmed.
    pub name: String,
    pub completion_date: NaiveDate,
}

impl Person {
    /// Build a person from separate name parts.
    pub fn from_parts(last: &str, first: &str, completion_date: NaiveDate) -> Self {
        Self {
            name: display_name(last, first),
            completion_date,
        }
    }

    /// Completion date rendered as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.completion_date.format(DATE_FORMAT).to_string()
    }
}

/// Join trimmed last and first name with exactly one space.
///
/// Either part may be empty; the result never has leading or trailing spaces.
pub fn display_name(last: &str, first: &str) -> String {
    format!("{} {}", last.trim(), first.trim()).trim().to_string()
}

/// Filesystem-safe stem derived from a display name.
///
/// Keeps ASCII letters, digits, space, hyphen and underscore, then maps spaces
/// to underscores. Names with nothing usable fall back to `unnamed`.
pub fn safe_file_stem(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let stem = kept.trim().replace(' ', "_");
    if stem.is_empty() {
        UNNAMED_STEM.to_string()
    } else {
        stem
    }
}

// ---------------------------------------------------------------------------
// CertificateId
// ---------------------------------------------------------------------------

/// Deterministic certificate identifier: `<prefix>-<year>-<index:04>`.
///
/// Stable for the same input order within the same calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateId {
    pub prefix: String,
    pub year: i32,
    /// 1-based position in the input.
    pub index: usize,
}

impl CertificateId {
    pub fn new(prefix: impl Into<String>, year: i32, index: usize) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            index,
        }
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:04}", self.prefix, self.year, self.index)
    }
}

// ---------------------------------------------------------------------------
// FieldKey / FieldSet
// ---------------------------------------------------------------------------

/// The placeholder keys every certificate is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    Subtitle,
    Workshop,
    Date,
    DateRange,
    Tutors,
    Duration,
    Contents,
    Signatory1,
    Signatory2,
    Location,
    CertId,
}

impl FieldKey {
    /// Keys whose value differs from one person to the next.
    pub const PER_PERSON: [FieldKey; 3] = [FieldKey::Name, FieldKey::Date, FieldKey::CertId];

    /// All keys in the order they are inserted into a [`FieldSet`].
    pub fn all() -> &'static [FieldKey] {
        &[
            FieldKey::Name,
            FieldKey::Subtitle,
            FieldKey::Workshop,
            FieldKey::Date,
            FieldKey::DateRange,
            FieldKey::Tutors,
            FieldKey::Duration,
            FieldKey::Contents,
            FieldKey::Signatory1,
            FieldKey::Signatory2,
            FieldKey::Location,
            FieldKey::CertId,
        ]
    }

    /// Token name as it appears between `{{` and `}}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "NAME",
            FieldKey::Subtitle => "SUBTITLE",
            FieldKey::Workshop => "WORKSHOP",
            FieldKey::Date => "DATE",
            FieldKey::DateRange => "DATE_RANGE",
            FieldKey::Tutors => "TUTORS",
            FieldKey::Duration => "DURATION",
            FieldKey::Contents => "CONTENTS",
            FieldKey::Signatory1 => "SIGNATORY1",
            FieldKey::Signatory2 => "SIGNATORY2",
            FieldKey::Location => "LOCATION",
            FieldKey::CertId => "CERT_ID",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered placeholder → value mapping for one certificate.
///
/// Iteration follows insertion order; re-inserting a key replaces its value
/// but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(String, String)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value under an arbitrary key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert or replace a value under one of the well-known keys.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        self.insert(key.as_str(), value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy without the per-person keys (see [`FieldKey::PER_PERSON`]).
    ///
    /// Used for text shared by every certificate of a run, such as the
    /// combined document's preamble.
    pub fn run_wide(&self) -> FieldSet {
        self.iter()
            .filter(|(key, _)| !FieldKey::PER_PERSON.iter().any(|k| k.as_str() == *key))
            .collect()
    }

    /// Fields for one certificate: the person's name, date and id, the run's
    /// date range, plus the shared course values from `options`.
    pub fn for_certificate(
        name: &str,
        date: &str,
        date_range: &str,
        id: &CertificateId,
        options: &CertificateOptions,
    ) -> Self {
        let mut fields = FieldSet::new();
        fields.set(FieldKey::Name, name);
        fields.set(FieldKey::Subtitle, options.subtitle.as_str());
        fields.set(FieldKey::Workshop, options.workshop_title.as_str());
        fields.set(FieldKey::Date, date);
        fields.set(FieldKey::DateRange, date_range);
        fields.set(FieldKey::Tutors, options.tutors.as_str());
        fields.set(FieldKey::Duration, options.duration.as_str());
        fields.set(FieldKey::Contents, contents_list(&options.contents));
        fields.set(FieldKey::Signatory1, options.signatory1.as_str());
        fields.set(FieldKey::Signatory2, options.signatory2.as_str());
        fields.set(FieldKey::Location, options.location.as_str());
        fields.set(FieldKey::CertId, id.to_string());
        fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FieldSet::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// Render content items as LaTeX `\item` lines.
fn contents_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\\item {item}"))
        .collect::<Vec<_>>()
        .join("\n        ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn display_name_joins_with_single_space() {
        assert_eq!(display_name("  Lincoln ", " Abraham  "), "Lincoln Abraham");
        assert_eq!(display_name("Lincoln", ""), "Lincoln");
        assert_eq!(display_name("", "Abraham"), "Abraham");
        assert_eq!(display_name("  ", " "), "");
    }

    #[test]
    fn person_date_string_is_iso() {
        let p = Person::from_parts("Lincoln", "Abraham", date(1809, 2, 12));
        assert_eq!(p.name, "Lincoln Abraham");
        assert_eq!(p.date_string(), "1809-02-12");
    }

    #[test]
    fn certificate_id_is_zero_padded() {
        assert_eq!(CertificateId::new("CERT", 2025, 7).to_string(), "CERT-2025-0007");
        assert_eq!(CertificateId::new("BPCN", 2026, 12345).to_string(), "BPCN-2026-12345");
    }

    #[test]
    fn field_set_keeps_insertion_order_on_replace() {
        let mut fields = FieldSet::new();
        fields.insert("A", "1");
        fields.insert("B", "2");
        fields.insert("A", "3");
        let keys: Vec<_> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(fields.get("A"), Some("3"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn certificate_fields_cover_every_key() {
        let options = CertificateOptions::default();
        let id = CertificateId::new("CERT", 2025, 1);
        let fields =
            FieldSet::for_certificate("Doe John", "2025-01-15", "2025-01-15", &id, &options);
        for key in FieldKey::all() {
            assert!(fields.get(key.as_str()).is_some(), "missing {key}");
        }
        assert_eq!(fields.get("DATE_RANGE"), Some("2025-01-15"));
        assert_eq!(fields.get("CERT_ID"), Some("CERT-2025-0001"));
    }

    #[test]
    fn run_wide_fields_drop_per_person_values() {
        let options = CertificateOptions::default();
        let id = CertificateId::new("CERT", 2025, 1);
        let fields =
            FieldSet::for_certificate("Doe John", "2025-01-15", "2025-01-15", &id, &options);
        let shared = fields.run_wide();
        assert_eq!(shared.get("NAME"), None);
        assert_eq!(shared.get("DATE"), None);
        assert_eq!(shared.get("CERT_ID"), None);
        assert_eq!(shared.get("WORKSHOP"), Some("Workshop Title"));
        assert_eq!(shared.get("DATE_RANGE"), Some("2025-01-15"));
        assert_eq!(shared.len(), FieldKey::all().len() - FieldKey::PER_PERSON.len());
    }

    #[test]
    fn contents_are_latex_items() {
        let items = vec!["One".to_string(), "Two".to_string()];
        assert_eq!(contents_list(&items), "\\item One\n        \\item Two");
    }

    #[test]
    fn safe_stem_strips_unsafe_characters() {
        assert_eq!(safe_file_stem("Lincoln Abraham"), "Lincoln_Abraham");
        assert_eq!(safe_file_stem("King,Martin Luther"), "KingMartin_Luther");
        assert_eq!(safe_file_stem("../../etc/passwd"), "etcpasswd");
        assert_eq!(safe_file_stem("!!!"), "unnamed");
    }
}
