use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use log::{debug, info};
use tokio::fs;

use crate::cache::envelope::{CacheEntry, CacheEnvelope};
use crate::cache::error::CacheError;
use crate::catalog::CatalogSection;
use crate::fetch::RemoteSource;
use crate::refresh::RefreshReport;

const REPORT_FILE: &str = "report.json";

/// `now - created_at > ttl`. Staleness is monotonic: once an entry's age
/// exceeds the TTL it stays stale until the entry is overwritten.
pub fn is_stale(entry: &CacheEntry, ttl: Duration, now: DateTime<Utc>) -> bool {
    let age_ms = i128::from(now.signed_duration_since(entry.created_at).num_milliseconds());
    age_ms > ttl.as_millis() as i128
}

/// Outcome of [`CacheStore::fetch_if_needed`]: whether the entry came from
/// the cache or from a fresh fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Cached(CacheEntry),
    Refreshed(CacheEntry),
}

impl FetchOutcome {
    pub fn entry(&self) -> &CacheEntry {
        match self {
            FetchOutcome::Cached(entry) | FetchOutcome::Refreshed(entry) => entry,
        }
    }

    pub fn into_entry(self) -> CacheEntry {
        match self {
            FetchOutcome::Cached(entry) | FetchOutcome::Refreshed(entry) => entry,
        }
    }

    pub fn was_refreshed(&self) -> bool {
        matches!(self, FetchOutcome::Refreshed(_))
    }
}

/// Durable per-section cache. Each section owns one file under the store
/// root, named by a URL-safe base64 encoding of the section name so that
/// names with spaces or slashes stay filesystem-safe and the mapping stays
/// bijective. One extra file holds the latest refresh report.
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_ready(&self) -> bool {
        self.root.is_dir()
    }

    fn entry_path(&self, section: &CatalogSection) -> PathBuf {
        let key = URL_SAFE_NO_PAD.encode(section.name.as_bytes());
        self.root.join(format!("{key}.json"))
    }

    /// Read the persisted entry for a section. An absent unit is `None`,
    /// not an error.
    pub async fn read(&self, section: &CatalogSection) -> Result<Option<CacheEntry>, CacheError> {
        let path = self.entry_path(section);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let envelope: CacheEnvelope = serde_json::from_str(&raw)?;
        envelope.open().map(Some)
    }

    /// Overwrite a section's unit with a new payload stamped `now`.
    pub async fn write(
        &self,
        section: &CatalogSection,
        payload: &str,
    ) -> Result<CacheEntry, CacheError> {
        let envelope = CacheEnvelope::seal(payload, Utc::now());
        let json = serde_json::to_string(&envelope)?;
        self.write_atomic(&self.entry_path(section), &json).await?;
        debug!(
            "cached {} bytes for section '{}'",
            payload.len(),
            section.name
        );
        envelope.open()
    }

    /// Return the cached entry if present and fresh, otherwise fetch the
    /// section's feed, overwrite the unit, and return the new entry. A fetch
    /// failure surfaces as a refresh error; stale data is never substituted
    /// silently.
    pub async fn fetch_if_needed(
        &self,
        section: &CatalogSection,
        ttl: Duration,
        source: &dyn RemoteSource,
    ) -> Result<FetchOutcome, CacheError> {
        if let Some(entry) = self.read(section).await? {
            if !is_stale(&entry, ttl, Utc::now()) {
                return Ok(FetchOutcome::Cached(entry));
            }
            debug!("cache for section '{}' is stale", section.name);
        }
        let entry = self.refresh(section, source).await?;
        Ok(FetchOutcome::Refreshed(entry))
    }

    /// Unconditionally fetch the section's feed and overwrite its unit.
    pub async fn refresh(
        &self,
        section: &CatalogSection,
        source: &dyn RemoteSource,
    ) -> Result<CacheEntry, CacheError> {
        info!(
            "fetching catalog for section '{}' from {}",
            section.name, section.url
        );
        let body = source
            .fetch(&section.url)
            .await
            .map_err(|e| CacheError::Refresh {
                section: section.name.clone(),
                source: e,
            })?;
        self.write(section, &body).await
    }

    /// Overwrite the single latest-report unit.
    pub async fn save_report(&self, report: &RefreshReport) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(report)?;
        self.write_atomic(&self.root.join(REPORT_FILE), &json).await
    }

    pub async fn load_report(&self) -> Result<Option<RefreshReport>, CacheError> {
        match fs::read_to_string(self.root.join(REPORT_FILE)).await {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // Write to a sibling temp file, then rename over the live unit so a
    // concurrent reader never observes a partial write.
    async fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), CacheError> {
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, contents).await?;
        if let Err(e) = fs::rename(&temp, path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }
}
