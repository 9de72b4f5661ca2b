use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::debug;

use crate::cache::{is_stale, CacheEntry, CacheError, CacheStore};
use crate::catalog::error::CatalogError;
use crate::catalog::parser::parse_catalog;
use crate::catalog::sections::{CatalogSection, SectionList};
use crate::catalog::types::ElementSet;
use crate::fetch::RemoteSource;

/// State of the cache unit backing a [`SectionView`]. Staleness is
/// advisory; the caller decides whether to act on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatus {
    pub is_stale: bool,
    pub has_problem: bool,
}

/// Opt-in handle that forces a re-fetch of one section's feed, regardless
/// of TTL.
pub struct RefreshHandle {
    store: Arc<CacheStore>,
    source: Arc<dyn RemoteSource>,
    section: CatalogSection,
}

impl std::fmt::Debug for RefreshHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshHandle")
            .field("section", &self.section)
            .finish_non_exhaustive()
    }
}

impl RefreshHandle {
    pub async fn refresh(&self) -> Result<CacheEntry, CacheError> {
        self.store.refresh(&self.section, self.source.as_ref()).await
    }
}

/// One section's current element list plus the state of its cache unit and
/// a refresh handle.
#[derive(Debug)]
pub struct SectionView {
    pub section: String,
    pub elements: Vec<ElementSet>,
    pub cache: CacheStatus,
    pub refresh: RefreshHandle,
}

/// Public entry point for catalog reads: resolves a section, guarantees its
/// cache unit exists, and parses the payload into element sets.
pub struct CatalogService {
    sections: SectionList,
    store: Arc<CacheStore>,
    source: Arc<dyn RemoteSource>,
    ttl: Duration,
}

impl CatalogService {
    pub fn new(
        sections: SectionList,
        store: Arc<CacheStore>,
        source: Arc<dyn RemoteSource>,
        ttl: Duration,
    ) -> Self {
        Self {
            sections,
            store,
            source,
            ttl,
        }
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    /// Fetch the element list for a section, by name or the configured
    /// default. A never-cached section is fetched synchronously before
    /// returning, so the first call either succeeds or fails loudly. A
    /// stale entry is still served; refresh is opt-in via the returned
    /// handle, never implicit.
    pub async fn get_section(&self, name: Option<&str>) -> Result<SectionView, CatalogError> {
        let section = self.sections.resolve(name)?.clone();

        let entry = match self.store.read(&section).await? {
            Some(entry) => entry,
            None => self.store.refresh(&section, self.source.as_ref()).await?,
        };

        let elements = parse_catalog(&entry.payload)?;
        let cache = CacheStatus {
            is_stale: is_stale(&entry, self.ttl, Utc::now()),
            has_problem: section.url.is_empty() || !self.store.is_ready(),
        };
        debug!(
            "section '{}': {} elements (stale: {})",
            section.name,
            elements.len(),
            cache.is_stale
        );

        Ok(SectionView {
            section: section.name.clone(),
            elements,
            cache,
            refresh: RefreshHandle {
                store: Arc::clone(&self.store),
                source: Arc::clone(&self.source),
                section,
            },
        })
    }
}
