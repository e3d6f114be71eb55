//! Command handler implementations for cmdhist CLI
//!
//! - `record`: creating new records
//! - `list`: decoding, transforming and rendering history
//! - `config`: configuration handlers

mod config;
mod list;
mod record;

pub use config::*;
pub use list::*;
pub use record::*;
