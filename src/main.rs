//! cmdhist - shell history records
//!
//! Entry point for the command-line application.

use cmdhist::cli;
use std::process;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
