//! Satellite catalog tracking: TTL-bounded caching of remote TLE feeds,
//! concurrent batch refresh with per-feed failure isolation, strict catalog
//! parsing, and pass-prediction formatting.
//!
//! Orbit propagation and HTTP transport sit behind collaborator traits
//! ([`predict::TransitProvider`] and [`fetch::RemoteSource`]); this crate
//! owns the cache, the refresh run, the parser, and the display shaping.

pub mod cache;
pub mod catalog;
pub mod fetch;
pub mod predict;
pub mod refresh;
