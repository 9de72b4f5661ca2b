mod envelope;
mod error;
mod store;

pub use envelope::{CacheEntry, CacheEnvelope};
pub use error::CacheError;
pub use store::{is_stale, CacheStore, FetchOutcome};
