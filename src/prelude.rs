//! Prelude module for cmdhist
//!
//! Re-exports commonly used types and traits.
//!
//! ```rust
//! use cmdhist::prelude::*;
//! ```

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::field::Field;
pub use crate::record::{DecodeMode, Record};
pub use crate::records::Records;
pub use crate::types::{IdGenerator, RecordId};

pub use chrono::{DateTime, Utc};
