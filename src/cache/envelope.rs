use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::error::CacheError;

/// Persisted form of one cache unit. The payload is base64-wrapped so the
/// stored file stays plain text regardless of the feed's content, and the
/// creation time travels with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    /// Creation time in Unix milliseconds.
    pub created_at: i64,
    /// Base64-encoded feed text.
    pub payload: String,
}

/// Decoded cache unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub created_at: DateTime<Utc>,
    pub payload: String,
}

impl CacheEnvelope {
    pub fn seal(payload: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at: created_at.timestamp_millis(),
            payload: STANDARD.encode(payload.as_bytes()),
        }
    }

    pub fn open(&self) -> Result<CacheEntry, CacheError> {
        let bytes = STANDARD
            .decode(&self.payload)
            .map_err(|e| CacheError::Decode(e.to_string()))?;
        let payload = String::from_utf8(bytes).map_err(|e| CacheError::Decode(e.to_string()))?;
        let created_at = DateTime::from_timestamp_millis(self.created_at)
            .ok_or_else(|| CacheError::Decode(format!("bad timestamp {}", self.created_at)))?;
        Ok(CacheEntry {
            created_at,
            payload,
        })
    }
}
