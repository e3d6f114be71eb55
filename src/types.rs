//! Type definitions for cmdhist
//!
//! Provides the [`RecordId`] wrapper and the id-generation capability that
//! record construction depends on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

/// A type-safe wrapper for record IDs
///
/// IDs are 32 bits wide, so collisions are possible in principle. Callers
/// that need stronger guarantees must not rely on the id alone.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub u32);

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<RecordId> for u32 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(RecordId)
    }
}

/// Source of fresh record ids
///
/// Implementations must be callable from several threads at once.
pub trait IdGenerator: Send + Sync {
    /// Produce the next id
    fn next_id(&self) -> RecordId;
}

/// Default generator: the leading 32 bits of a random (v4) UUID
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> RecordId {
        uuid_low_bits(&Uuid::new_v4())
    }
}

/// Interpret the first four bytes of a UUID as a big-endian u32
pub fn uuid_low_bits(uuid: &Uuid) -> RecordId {
    let bytes = uuid.as_bytes();
    RecordId(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Deterministic generator handing out consecutive ids
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU32,
}

impl SequentialIdGenerator {
    /// Start counting at `start`
    pub fn starting_at(start: u32) -> Self {
        Self {
            next: AtomicU32::new(start),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> RecordId {
        RecordId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
