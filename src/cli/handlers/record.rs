//! Handler for creating new records

use crate::cli::CliApp;
use crate::cli::args::NewArgs;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::types::{IdGenerator, UuidIdGenerator};
use chrono::DateTime;
use std::env;
use std::path::PathBuf;

pub fn handle_new(_app: &mut CliApp, args: &NewArgs) -> Result<()> {
    let record = build_record(args, &UuidIdGenerator)?;
    tracing::debug!(id = %record.id(), "created record");
    println!("{}", record.to_line()?);
    Ok(())
}

/// Assemble a record from the command-line arguments
pub fn build_record(args: &NewArgs, generator: &dyn IdGenerator) -> Result<Record> {
    let mut record = match args.timestamp {
        Some(ts) => {
            let timestamp = DateTime::from_timestamp(ts, 0).ok_or_else(|| {
                Error::InvalidTimestamp {
                    timestamp: ts.to_string(),
                }
            })?;
            Record::with_timestamp(generator.next_id(), timestamp)
        }
        None => Record::new(generator),
    };

    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("<unknown>"))
            .to_string_lossy()
            .to_string(),
    };

    record
        .set_command(args.command.as_str())
        .set_dir(dir)
        .set_branch(args.branch.as_str())
        .set_status(args.status);

    Ok(record)
}
