//! Renderable record fields
//!
//! The set of fields a record can be rendered with is closed, so it is an
//! enum rather than a string-keyed lookup. Names are still accepted as text
//! (from config files and the command line) and parsed into [`Field`].

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// A field that can appear in a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Date,
    Time,
    Command,
    Dir,
    Branch,
    Status,
}

impl Field {
    /// Every field, in display order
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::Date,
        Field::Time,
        Field::Command,
        Field::Dir,
        Field::Branch,
        Field::Status,
    ];

    /// The canonical name of the field
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Date => "Date",
            Field::Time => "Time",
            Field::Command => "Command",
            Field::Dir => "Dir",
            Field::Branch => "Branch",
            Field::Status => "Status",
        }
    }

    /// Parse a list of names, failing on the first unknown one
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Field>> {
        names.iter().map(|name| name.as_ref().parse()).collect()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    /// Accepts `Command` as well as the placeholder form `{{.Command}}`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let name = trimmed
            .strip_prefix("{{")
            .and_then(|rest| rest.strip_suffix("}}"))
            .map(|inner| inner.trim())
            .and_then(|inner| inner.strip_prefix('.'))
            .unwrap_or(trimmed);

        Field::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| Error::render(s))
    }
}

const SECOND: i64 = 1;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;
const LONG_TIME: i64 = 37 * YEAR;

/// (upper bound, label, divisor); a divisor of 0 means the label has no count
const MAGNITUDES: [(i64, &str, i64); 17] = [
    (SECOND, "now", 0),
    (2 * SECOND, "1 second", 0),
    (MINUTE, "seconds", SECOND),
    (2 * MINUTE, "1 minute", 0),
    (HOUR, "minutes", MINUTE),
    (2 * HOUR, "1 hour", 0),
    (DAY, "hours", HOUR),
    (2 * DAY, "1 day", 0),
    (WEEK, "days", DAY),
    (2 * WEEK, "1 week", 0),
    (MONTH, "weeks", WEEK),
    (2 * MONTH, "1 month", 0),
    (YEAR, "months", MONTH),
    (18 * MONTH, "1 year", 0),
    (2 * YEAR, "2 years", 0),
    (LONG_TIME, "years", YEAR),
    (i64::MAX, "a long while", 0),
];

/// Describe `then` relative to `now`, e.g. "3 hours ago" or "2 days from now"
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then).num_seconds();
    let suffix = if delta >= 0 { "ago" } else { "from now" };
    let diff = delta.saturating_abs();

    let (_, label, divisor) = MAGNITUDES
        .iter()
        .copied()
        .find(|(bound, _, _)| diff < *bound)
        .unwrap_or(MAGNITUDES[MAGNITUDES.len() - 1]);

    match (label, divisor) {
        ("now", _) => "now".to_string(),
        (label, 0) => format!("{} {}", label, suffix),
        (label, divisor) => format!("{} {} {}", diff / divisor, label, suffix),
    }
}
