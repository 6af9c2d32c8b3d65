//! Domain entities for the Scheduler subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single key/value write waiting to be routed to a shard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// Key to write.
    pub key: Vec<u8>,
    /// Value to store at `key`.
    pub value: Vec<u8>,
}

impl Transaction {
    /// Creates a new transaction.
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> 0x{}",
            String::from_utf8_lossy(&self.key),
            hex::encode(&self.value)
        )
    }
}
