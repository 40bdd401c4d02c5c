//! Twelve-byte document identifiers.
//!
//! Layout: 4-byte big-endian unix seconds, 5 bytes chosen once per process,
//! 3-byte big-endian counter. Ids cross the HTTP boundary and are stored as
//! their 24-character lowercase hex form.

use lazy_static::lazy_static;
use rand::Rng;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

lazy_static! {
    static ref PROCESS_UNIQUE: [u8; 5] = rand::rng().random();
    static ref COUNTER: AtomicU32 = AtomicU32::new(rand::rng().random_range(0..0x00ff_ffff));
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("'{0}' is not a valid ObjectId, it must be a 12-byte input or a 24-character hex string")]
pub struct ObjectIdError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generate a fresh id from the current time, the process bytes and the counter.
    pub fn generate() -> Self {
        let secs = chrono::Utc::now().timestamp() as u32;
        let count = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        Self(bytes)
    }

    /// Parse the 24-character hex form.
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        if s.len() != 24 {
            return Err(ObjectIdError(s.to_string()));
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ObjectIdError(s.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
