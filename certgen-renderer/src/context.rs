//! Certificate context: one [`Certificate`] (name, id, fields) per person.

use chrono::{Datelike, NaiveDate};

use certgen_core::{CertificateId, CertificateOptions, FieldSet, Person};

/// Everything needed to render one person's certificate.
#[derive(Debug, Clone)]
pub struct Certificate {
    pub name: String,
    pub id: CertificateId,
    pub fields: FieldSet,
}

/// Per-run values shared by every certificate.
struct RunDefaults<'a> {
    options: &'a CertificateOptions,
    date: String,
    date_range: String,
    year: i32,
}

impl<'a> RunDefaults<'a> {
    fn new(options: &'a CertificateOptions, today: NaiveDate) -> Self {
        let date = options.resolved_date(today);
        RunDefaults {
            options,
            date_range: options.resolved_date_range(&date),
            date,
            year: today.year(),
        }
    }
}

impl Certificate {
    fn new(index: usize, name: &str, date: &str, run: &RunDefaults<'_>) -> Self {
        let id = CertificateId::new(run.options.id_prefix.as_str(), run.year, index);
        let fields = FieldSet::for_certificate(name, date, &run.date_range, &id, run.options);
        Certificate {
            name: name.to_string(),
            id,
            fields,
        }
    }
}

/// Certificates for a plain name list; everyone gets the caller-wide date.
pub fn from_names(
    names: &[String],
    options: &CertificateOptions,
    today: NaiveDate,
) -> Vec<Certificate> {
    let run = RunDefaults::new(options, today);
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Certificate::new(i + 1, name, &run.date, &run))
        .collect()
}

/// Certificates for roster rows; each person keeps their own completion date.
pub fn from_people(
    people: &[Person],
    options: &CertificateOptions,
    today: NaiveDate,
) -> Vec<Certificate> {
    let run = RunDefaults::new(options, today);
    people
        .iter()
        .enumerate()
        .map(|(i, p)| Certificate::new(i + 1, &p.name, &p.date_string(), &run))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn names_share_the_default_date() {
        let options = CertificateOptions {
            date: Some("2025-07-17".to_string()),
            ..CertificateOptions::default()
        };
        let names = vec!["A".to_string(), "B".to_string()];
        let certs = from_names(&names, &options, today());
        assert_eq!(certs.len(), 2);
        for cert in &certs {
            assert_eq!(cert.fields.get("DATE"), Some("2025-07-17"));
        }
        assert_eq!(certs[1].id.to_string(), "CERT-2026-0002");
    }

    #[test]
    fn people_keep_their_own_date() {
        let people = vec![
            Person::from_parts("Lincoln", "Abraham", NaiveDate::from_ymd_opt(1809, 2, 12).unwrap()),
            Person::from_parts("Doe", "John", today()),
        ];
        let certs = from_people(&people, &CertificateOptions::default(), today());
        assert_eq!(certs[0].fields.get("DATE"), Some("1809-02-12"));
        assert_eq!(certs[0].fields.get("NAME"), Some("Lincoln Abraham"));
        assert_eq!(certs[1].fields.get("DATE"), Some("2026-10-18"));
        assert_eq!(certs[0].fields.get("DATE_RANGE"), Some("2026-10-18"));
    }

    #[test]
    fn field_sets_are_independent() {
        let names = vec!["First".to_string(), "Second".to_string()];
        let certs = from_names(&names, &CertificateOptions::default(), today());
        assert_eq!(certs[0].fields.get("NAME"), Some("First"));
        assert_eq!(certs[1].fields.get("NAME"), Some("Second"));
        assert_ne!(certs[0].fields.get("CERT_ID"), certs[1].fields.get("CERT_ID"));
    }
}
