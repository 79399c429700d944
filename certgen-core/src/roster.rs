//! Roster parsing: one [`Person`] per CSV row.
//!
//! Columns are looked up by header name. A header written with a leading
//! space (`Lastname, Name`) is accepted as a fallback for the plain name.
//! Completion dates that are absent or not `YYYY-MM-DD` become `today`.
//!
//! Loaders take "today" explicitly; callers pass the local date.

use std::io;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::config::Columns;
use crate::error::{io_err, CoreError};
use crate::types::{Person, DATE_FORMAT};

/// Parse a completion date, falling back to `today` when absent or malformed.
pub fn parse_completion_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return today;
    };
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!("invalid completion date '{raw}' ({e}); using {today}");
            today
        }
    }
}

/// Header lookup for one roster.
struct Header<'a> {
    names: &'a StringRecord,
}

impl<'a> Header<'a> {
    fn position(&self, column: &str) -> Option<usize> {
        self.names.iter().position(|h| h == column)
    }

    /// Trimmed, non-empty value of `column`, trying the leading-space variant
    /// when the plain column is missing or blank.
    fn value<'r>(&self, row: &'r StringRecord, column: &str) -> Option<&'r str> {
        let lookup = |col: &str| {
            self.position(col)
                .and_then(|idx| row.get(idx))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };
        lookup(column).or_else(|| lookup(&format!(" {column}")))
    }
}

fn person_from_row(
    header: &Header<'_>,
    row: &StringRecord,
    columns: &Columns,
    today: NaiveDate,
) -> Person {
    let last = header.value(row, &columns.lastname).unwrap_or_default();
    let first = header.value(row, &columns.name).unwrap_or_default();
    let date = parse_completion_date(header.value(row, &columns.completion_date), today);
    Person::from_parts(last, first, date)
}

/// Read every row of a CSV stream into people, in input order.
pub fn read_roster_at<R: io::Read>(
    reader: R,
    columns: &Columns,
    today: NaiveDate,
) -> Result<Vec<Person>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let names = reader.headers()?.clone();
    let header = Header { names: &names };

    let mut people = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let row = record?;
        let person = person_from_row(&header, &row, columns, today);
        tracing::debug!("row {}: '{}' ({})", idx + 1, person.name, person.completion_date);
        people.push(person);
    }
    Ok(people)
}

/// Load a roster file with an explicit "today".
pub fn load_roster_at(
    path: &Path,
    columns: &Columns,
    today: NaiveDate,
) -> Result<Vec<Person>, CoreError> {
    let file = std::fs::File::open(path).map_err(|e| io_err(path, e))?;
    read_roster_at(file, columns, today).map_err(|source| CoreError::Roster {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
