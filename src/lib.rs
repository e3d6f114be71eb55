//! cmdhist - shell history records
//!
//! This library provides:
//! - A [`Record`] type for one shell-history entry, with a tab-separated
//!   `key:value` line encoding and a tab-separated display rendering
//! - A [`Records`] collection with filtering, de-duplication, reversal,
//!   prefix search and chronological sorting
//! - Pluggable record id generation through [`IdGenerator`]
//!
//! # Examples
//!
//! ```rust
//! use cmdhist::{Field, Record, Records};
//!
//! let mut record = Record::new_record();
//! record.set_command("ls -la").set_dir("/tmp");
//!
//! let line = record.to_line()?;
//! let decoded = Record::from_line(&line)?;
//! assert_eq!(decoded, record);
//!
//! let mut records = Records::from(vec![decoded]);
//! records.grep(&["ls"]);
//! assert_eq!(records.len(), 1);
//! assert!(records[0].render(&[Field::Command]).ends_with("\tls -la"));
//! # Ok::<(), cmdhist::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod field;
pub mod prelude;
pub mod record;
pub mod records;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use field::Field;
pub use record::{DecodeMode, Record};
pub use records::Records;
pub use types::{IdGenerator, RecordId, SequentialIdGenerator, UuidIdGenerator};

/// Create a record with a fresh UUID-derived id, timestamped now
pub fn new_record() -> Record {
    Record::new_record()
}
