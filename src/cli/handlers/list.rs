//! Handler for listing history records

use crate::cli::CliApp;
use crate::cli::args::{ListArgs, resolve_toggle};
use crate::config::Config;
use crate::error::Result;
use crate::field::Field;
use crate::record::DecodeMode;
use crate::records::Records;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

pub fn handle_list(app: &mut CliApp, args: &ListArgs) -> Result<()> {
    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let lines = list_lines(&app.config, args, reader)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}

/// Decode, transform and render history according to config and arguments
///
/// Operations run in a fixed order: sort, reverse, unique, grep, limit.
/// Reversing before de-duplication keeps the newest copy of a command.
pub fn list_lines<R: BufRead>(config: &Config, args: &ListArgs, reader: R) -> Result<Vec<String>> {
    let fields = match &args.fields {
        Some(names) => Field::parse_list(names)?,
        None => config.visible_fields()?,
    };

    let mode = if args.tolerant {
        DecodeMode::Tolerant
    } else {
        config.decode_mode
    };

    let mut records = Records::read_from(reader, mode)?;

    if args.sort || config.list.sort {
        records.sort();
    }
    if resolve_toggle(args.reverse, args.no_reverse, config.list.reverse) {
        records.reverse();
    }
    if resolve_toggle(args.unique, args.no_unique, config.list.unique) {
        records.unique();
    }
    records.grep(&args.grep);

    if let Some(limit) = args.limit {
        records = records.into_iter().take(limit).collect();
    }

    tracing::debug!(count = records.len(), "listing records");

    if args.json {
        return Ok(vec![serde_json::to_string_pretty(&records)?]);
    }

    Ok(records.render_all(&fields))
}
