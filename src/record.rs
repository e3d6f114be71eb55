//! A single shell-history record
//!
//! A [`Record`] is created once (which fixes its id and timestamp), filled
//! in through the setters, and then either rendered for display or encoded
//! as one line of tab-separated `key:value` tokens for storage.

use crate::error::{Error, Result};
use crate::field::{Field, relative_time};
use crate::types::{IdGenerator, RecordId, UuidIdGenerator};
use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use std::fmt::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Separator between tokens of an encoded line
pub const TOKEN_SEPARATOR: char = '\t';

/// Separator between key and value inside a token
pub const KEY_SEPARATOR: char = ':';

const KEY_ID: &str = "ID";
const KEY_DATE: &str = "Date";
const KEY_COMMAND: &str = "Command";
const KEY_DIR: &str = "Dir";
const KEY_BRANCH: &str = "Branch";
const KEY_STATUS: &str = "Status";

/// How decoding reacts to malformed tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Any malformed token fails the whole line
    #[default]
    Strict,
    /// Malformed tokens are logged and skipped
    Tolerant,
}

/// One shell-history entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    id: RecordId,
    timestamp: DateTime<Utc>,
    command: String,
    dir: String,
    branch: String,
    status: i32,
}

impl Default for Record {
    /// An empty record with id 0 at the Unix epoch, the target for decoding
    fn default() -> Self {
        Self::with_timestamp(RecordId::default(), DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Record {
    /// Create a record with an id from `generator`, timestamped now
    pub fn new(generator: &dyn IdGenerator) -> Self {
        Self::with_timestamp(generator.next_id(), Utc::now())
    }

    /// Create a record using the process-wide UUID-based id source
    pub fn new_record() -> Self {
        Self::new(&UuidIdGenerator)
    }

    /// Create a record with an explicit id and timestamp
    pub fn with_timestamp(id: RecordId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp,
            command: String::new(),
            dir: String::new(),
            branch: String::new(),
            status: 0,
        }
    }

    /// Decode a record from a single encoded line
    pub fn from_line(line: &str) -> Result<Self> {
        let mut record = Self::default();
        record.unmarshal(line)?;
        Ok(record)
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn set_command<S: Into<String>>(&mut self, command: S) -> &mut Self {
        self.command = command.into();
        self
    }

    pub fn set_dir<S: Into<String>>(&mut self, dir: S) -> &mut Self {
        self.dir = dir.into();
        self
    }

    pub fn set_branch<S: Into<String>>(&mut self, branch: S) -> &mut Self {
        self.branch = branch.into();
        self
    }

    pub fn set_status(&mut self, status: i32) -> &mut Self {
        self.status = status;
        self
    }

    /// Format a single field for display, with `Time` relative to `now`
    ///
    /// `Date` is the calendar date in `tz`.
    pub fn field_value<Tz>(&self, field: Field, now: DateTime<Utc>, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match field {
            Field::Id => self.id.to_string(),
            Field::Date => self
                .timestamp
                .with_timezone(tz)
                .format("%Y-%m-%d")
                .to_string(),
            Field::Time => relative_time(self.timestamp, now),
            Field::Command => self.command.clone(),
            Field::Dir => self.dir.clone(),
            Field::Branch => self.branch.clone(),
            Field::Status => self.status.to_string(),
        }
    }

    /// Render a tab-separated display line: the id, then each visible field
    pub fn render(&self, visible: &[Field]) -> String {
        self.render_at(visible, Utc::now())
    }

    /// Like [`Record::render`], with relative times measured from `now`
    pub fn render_at(&self, visible: &[Field], now: DateTime<Utc>) -> String {
        self.render_in(visible, now, &Local)
    }

    /// Render with dates shown in the time zone `tz`
    pub fn render_in<Tz>(&self, visible: &[Field], now: DateTime<Utc>, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut line = self.id.to_string();
        for field in visible {
            line.push(TOKEN_SEPARATOR);
            line.push_str(&self.field_value(*field, now, tz));
        }
        line
    }

    /// Render from field names, failing with [`Error::Render`] on an unknown name
    pub fn try_render<S: AsRef<str>>(&self, visible: &[S]) -> Result<String> {
        let fields = Field::parse_list(visible)?;
        Ok(self.render(&fields))
    }

    /// Render from field names; any unknown name blanks the whole line
    ///
    /// An empty result means the field list was invalid, not that no fields
    /// were requested (that case still yields the id). Prefer
    /// [`Record::try_render`] where the caller can handle an error.
    pub fn render_names<S: AsRef<str>>(&self, visible: &[S]) -> String {
        match self.try_render(visible) {
            Ok(line) => line,
            Err(e) => {
                debug!(record = %self.id, error = %e, "render failed, emitting empty line");
                String::new()
            }
        }
    }

    /// Decode `line` into this record, strictly
    ///
    /// Unknown keys are ignored and missing keys keep their current values.
    /// On error the receiver is left untouched.
    pub fn unmarshal(&mut self, line: &str) -> Result<Record> {
        self.unmarshal_with(line, DecodeMode::Strict)
    }

    /// Decode `line` into this record using the given mode
    pub fn unmarshal_with(&mut self, line: &str, mode: DecodeMode) -> Result<Record> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut decoded = self.clone();

        for token in line.split(TOKEN_SEPARATOR).filter(|t| !t.is_empty()) {
            let applied = split_token(token).and_then(|(key, value)| decoded.apply(key, value));
            if let Err(e) = applied {
                match mode {
                    DecodeMode::Strict => return Err(e),
                    DecodeMode::Tolerant => {
                        warn!(error = %e, "skipping malformed token");
                    }
                }
            }
        }

        *self = decoded.clone();
        Ok(decoded)
    }

    /// Encode this record as one line of `key:value` tokens
    pub fn marshal(&self) -> Result<Vec<u8>> {
        self.to_line().map(String::into_bytes)
    }

    /// Encode this record as a `String` (no trailing newline)
    pub fn to_line(&self) -> Result<String> {
        for (key, value) in [
            (KEY_COMMAND, &self.command),
            (KEY_DIR, &self.dir),
            (KEY_BRANCH, &self.branch),
        ] {
            if value.contains(['\t', '\n', '\r']) {
                return Err(Error::encoding(format!(
                    "{} of record {} contains a tab or line break",
                    key, self.id
                )));
            }
        }

        let tokens = [
            format!("{}:{}", KEY_ID, self.id),
            format!(
                "{}:{}",
                KEY_DATE,
                self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
            ),
            format!("{}:{}", KEY_COMMAND, self.command),
            format!("{}:{}", KEY_DIR, self.dir),
            format!("{}:{}", KEY_BRANCH, self.branch),
            format!("{}:{}", KEY_STATUS, self.status),
        ];

        Ok(tokens.join("\t"))
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            KEY_ID => {
                self.id = value
                    .parse()
                    .map_err(|_| Error::parse(format!("invalid ID value '{}'", value)))?;
            }
            KEY_DATE => {
                self.timestamp = DateTime::parse_from_rfc3339(value)
                    .map_err(|_| Error::parse(format!("invalid Date value '{}'", value)))?
                    .with_timezone(&Utc);
            }
            KEY_COMMAND => self.command = value.to_string(),
            KEY_DIR => self.dir = value.to_string(),
            KEY_BRANCH => self.branch = value.to_string(),
            KEY_STATUS => {
                self.status = value
                    .parse()
                    .map_err(|_| Error::parse(format!("invalid Status value '{}'", value)))?;
            }
            other => trace!(key = other, "ignoring unknown key"),
        }
        Ok(())
    }
}

/// Split a token on its first `:`
fn split_token(token: &str) -> Result<(&str, &str)> {
    match token.split_once(KEY_SEPARATOR) {
        Some(("", _)) => Err(Error::parse(format!("token '{}' has an empty key", token))),
        Some(pair) => Ok(pair),
        None => Err(Error::parse(format!(
            "token '{}' has no '{}' separator",
            token, KEY_SEPARATOR
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SequentialIdGenerator;
    use chrono::{Duration, FixedOffset};

    fn sample() -> Record {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap();
        let mut record = Record::with_timestamp(RecordId(42), timestamp);
        record
            .set_command("ls -la")
            .set_dir("/home/user/project")
            .set_branch("main")
            .set_status(0);
        record
    }

    #[test]
    fn test_new_record_defaults() {
        let before = Utc::now();
        let record = Record::new(&SequentialIdGenerator::starting_at(7));
        let after = Utc::now();

        assert_eq!(record.id(), RecordId(7));
        assert!(record.timestamp() >= before && record.timestamp() <= after);
        assert_eq!(record.command(), "");
        assert_eq!(record.dir(), "");
        assert_eq!(record.branch(), "");
        assert_eq!(record.status(), 0);
    }

    #[test]
    fn test_new_record_uses_uuid_source() {
        let a = Record::new_record();
        let b = Record::new_record();
        // 32-bit ids can collide, but two in a row practically never do
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_setters() {
        let mut record = Record::new(&SequentialIdGenerator::default());
        record.set_command("git status");
        record.set_dir("/repo");
        record.set_branch("feature/x");
        record.set_status(-1);

        assert_eq!(record.command(), "git status");
        assert_eq!(record.dir(), "/repo");
        assert_eq!(record.branch(), "feature/x");
        assert_eq!(record.status(), -1);
    }

    #[test]
    fn test_render_command_and_status() {
        let line = sample().render(&[Field::Command, Field::Status]);
        assert_eq!(line, "42\tls -la\t0");
    }

    #[test]
    fn test_render_no_fields_is_just_id() {
        assert_eq!(sample().render(&[]), "42");
    }

    #[test]
    fn test_render_all_fields() {
        let record = sample();
        let now = record.timestamp() + Duration::hours(3);
        let line = record.render_in(&Field::ALL, now, &Utc);
        assert_eq!(
            line,
            "42\t42\t2024-03-09\t3 hours ago\tls -la\t/home/user/project\tmain\t0"
        );
    }

    #[test]
    fn test_render_date_uses_local_calendar_day() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 10, 2, 0, 0).unwrap();
        let record = Record::with_timestamp(RecordId(1), timestamp);

        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(
            record.render_in(&[Field::Date], timestamp, &pacific),
            "1\t2024-03-09"
        );

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            record.render_in(&[Field::Date], timestamp, &tokyo),
            "1\t2024-03-10"
        );

        let expected = timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string();
        assert_eq!(record.render(&[Field::Date]), format!("1\t{}", expected));

        // the stored form stays in UTC
        assert!(record.to_line().unwrap().contains("Date:2024-03-10T02:00:00.000000000Z"));
    }

    #[test]
    fn test_try_render_names() {
        let record = sample();
        assert_eq!(
            record.try_render(&["Command", "Status"]).unwrap(),
            "42\tls -la\t0"
        );
        assert_eq!(
            record.try_render(&["{{.Dir}}", "{{.Branch}}"]).unwrap(),
            "42\t/home/user/project\tmain"
        );
        assert!(matches!(
            record.try_render(&["Bogus"]),
            Err(Error::Render { .. })
        ));
    }

    #[test]
    fn test_render_names_blanks_on_unknown_field() {
        let record = sample();
        assert_eq!(record.render_names(&["Bogus"]), "");
        assert_eq!(record.render_names(&["Command", "Bogus"]), "");
        assert_eq!(record.render_names(&["Command"]), "42\tls -la");
    }

    #[test]
    fn test_marshal_format() {
        let line = String::from_utf8(sample().marshal().unwrap()).unwrap();
        assert_eq!(
            line,
            "ID:42\tDate:2024-03-09T14:30:05.000000000Z\tCommand:ls -la\tDir:/home/user/project\tBranch:main\tStatus:0"
        );
    }

    #[test]
    fn test_round_trip() {
        let mut original = Record::new(&SequentialIdGenerator::starting_at(99));
        original
            .set_command("cargo build --release")
            .set_dir("/src/app")
            .set_branch("")
            .set_status(101);

        let line = original.to_line().unwrap();
        let decoded = Record::from_line(&line).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_marshal_rejects_tabs_and_newlines() {
        let mut record = sample();
        record.set_command("echo\tx");
        assert!(matches!(record.marshal(), Err(Error::Encoding { .. })));

        let mut record = sample();
        record.set_dir("/tmp\nfoo");
        assert!(matches!(record.marshal(), Err(Error::Encoding { .. })));
    }

    #[test]
    fn test_unmarshal_ignores_unknown_and_keeps_missing() {
        let mut record = sample();
        let decoded = record
            .unmarshal("Command:make test\tHost:laptop\tStatus:2")
            .unwrap();

        assert_eq!(decoded.command(), "make test");
        assert_eq!(decoded.status(), 2);
        assert_eq!(decoded.id(), RecordId(42));
        assert_eq!(decoded.dir(), "/home/user/project");
        assert_eq!(record, decoded);
    }

    #[test]
    fn test_unmarshal_value_may_contain_colons() {
        let record = Record::from_line("ID:1\tCommand:echo a:b:c\tDir:C:/tmp").unwrap();
        assert_eq!(record.command(), "echo a:b:c");
        assert_eq!(record.dir(), "C:/tmp");
    }

    #[test]
    fn test_unmarshal_strips_line_ending() {
        let record = Record::from_line("ID:5\tCommand:pwd\r\n").unwrap();
        assert_eq!(record.command(), "pwd");
    }

    #[test]
    fn test_unmarshal_accepts_offsets() {
        let record = Record::from_line("Date:2024-03-09T16:30:05+02:00").unwrap();
        assert_eq!(
            record.timestamp(),
            Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap()
        );
    }

    #[test]
    fn test_unmarshal_malformed_is_error_and_leaves_receiver() {
        let mut record = sample();
        let err = record.unmarshal("Command:rm -rf\tgarbage").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert_eq!(record.command(), "ls -la");

        assert!(Record::from_line("ID:not-a-number").is_err());
        assert!(Record::from_line("ID:-3").is_err());
        assert!(Record::from_line("Status:abc").is_err());
        assert!(Record::from_line("Date:yesterday").is_err());
        assert!(Record::from_line(":value").is_err());
    }

    #[test]
    fn test_unmarshal_tolerant_skips_bad_tokens() {
        let mut record = Record::default();
        let decoded = record
            .unmarshal_with("ID:8\tgarbage\tStatus:abc\tCommand:ls", DecodeMode::Tolerant)
            .unwrap();

        assert_eq!(decoded.id(), RecordId(8));
        assert_eq!(decoded.command(), "ls");
        assert_eq!(decoded.status(), 0);
    }

    #[test]
    fn test_unmarshal_empty_line() {
        let record = Record::from_line("").unwrap();
        assert_eq!(record, Record::default());
    }
}
