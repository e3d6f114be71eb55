//! Ordered collections of records
//!
//! Order is the display order. It starts as append order (the order lines
//! were read) and is only changed by the explicit list operations.
//!
//! Each operation comes in two forms: an in-place one (`unique`, `reverse`,
//! `grep`, `sort`) and a pure one returning a new collection
//! (`deduplicated`, `reversed`, `grepped`, `sorted`). `filter` is always pure.

use crate::error::{Error, Result};
use crate::field::Field;
use crate::record::{DecodeMode, Record};
use chrono::Utc;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::ops::Deref;
use tracing::{debug, warn};

/// An ordered sequence of records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Records(Vec<Record>);

impl Records {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    /// Records matching `predicate`, in their original order
    pub fn filter<F>(&self, mut predicate: F) -> Records
    where
        F: FnMut(&Record) -> bool,
    {
        self.0.iter().filter(|record| predicate(*record)).cloned().collect()
    }

    /// Keep only the first record for each distinct command
    pub fn unique(&mut self) {
        let mut seen = HashSet::new();
        self.0.retain(|record| seen.insert(record.command().to_string()));
    }

    pub fn deduplicated(&self) -> Records {
        let mut copy = self.clone();
        copy.unique();
        copy
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    pub fn reversed(&self) -> Records {
        self.0.iter().rev().cloned().collect()
    }

    /// Narrow to records whose command starts with every word, in turn
    ///
    /// Words are ANDed: with two different prefixes such as `["git", "cargo"]`
    /// nothing survives. Matching is case-sensitive.
    pub fn grep<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            let word = word.as_ref();
            self.0.retain(|record| record.command().starts_with(word));
        }
    }

    pub fn grepped<S: AsRef<str>>(&self, words: &[S]) -> Records {
        let mut copy = self.clone();
        copy.grep(words);
        copy
    }

    /// Order by timestamp, earliest first
    pub fn sort(&mut self) {
        self.0.sort_by_key(|record| record.timestamp());
    }

    pub fn sorted(&self) -> Records {
        let mut copy = self.clone();
        copy.sort();
        copy
    }

    /// Render every record with the same visible fields
    pub fn render_all(&self, visible: &[Field]) -> Vec<String> {
        let now = Utc::now();
        self.0
            .iter()
            .map(|record| record.render_at(visible, now))
            .collect()
    }

    /// Decode one record per line, skipping blank lines
    ///
    /// In strict mode the first malformed line fails the read and the error
    /// names its 1-based line number. In tolerant mode a line that is not
    /// valid UTF-8 is decoded lossily.
    pub fn read_from<R: BufRead>(mut reader: R, mode: DecodeMode) -> Result<Self> {
        let mut records = Records::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;

            let line = match std::str::from_utf8(&buf) {
                Ok(text) => Cow::Borrowed(text),
                Err(e) => match mode {
                    DecodeMode::Strict => {
                        return Err(Error::parse(format!("invalid UTF-8: {}", e)).at_line(line_number));
                    }
                    DecodeMode::Tolerant => {
                        warn!(line = line_number, error = %e, "decoding line lossily");
                        String::from_utf8_lossy(&buf)
                    }
                },
            };

            if line.trim().is_empty() {
                continue;
            }

            let mut record = Record::default();
            record
                .unmarshal_with(&line, mode)
                .map_err(|e| e.at_line(line_number))?;
            records.push(record);
        }

        debug!(count = records.len(), "decoded records");
        Ok(records)
    }

    /// Encode one record per line
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for record in &self.0 {
            writeln!(writer, "{}", record.to_line()?)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Deref for Records {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Record>> for Records {
    fn from(records: Vec<Record>) -> Self {
        Self(records)
    }
}

impl FromIterator<Record> for Records {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Records {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Records {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
