use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheError, CacheStore};
use crate::catalog::CatalogSection;
use crate::fetch::RemoteSource;

/// Summary of one refresh run. A run always produces a report, even when
/// every section failed; the persisted copy overwrites the previous run's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshReport {
    pub last_updated: DateTime<Utc>,
    pub succeeded: usize,
    pub failed: usize,
    pub refreshed: usize,
    pub elapsed_seconds: f64,
    pub failures: Vec<SectionFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFailure {
    pub section: String,
    pub error: String,
}

enum Outcome {
    UpToDate,
    Refreshed,
    Failed(SectionFailure),
}

/// Drives one concurrent fetch-and-cache pass over all tracked sections.
/// Holds no state between runs beyond what the store persists.
pub struct RefreshCoordinator {
    store: Arc<CacheStore>,
    source: Arc<dyn RemoteSource>,
}

impl RefreshCoordinator {
    pub fn new(store: Arc<CacheStore>, source: Arc<dyn RemoteSource>) -> Self {
        Self { store, source }
    }

    /// Refresh every section's cache concurrently. A failure is confined to
    /// its own section and recorded with the section identity; the report
    /// is assembled only after every section has settled, then persisted
    /// and returned. Only the report write itself can fail this call.
    pub async fn refresh_all(
        &self,
        sections: &[CatalogSection],
        ttl: Duration,
    ) -> Result<RefreshReport, CacheError> {
        let started = Instant::now();
        let outcomes = join_all(
            sections
                .iter()
                .map(|section| self.refresh_section(section, ttl)),
        )
        .await;

        let mut report = RefreshReport {
            last_updated: Utc::now(),
            succeeded: 0,
            failed: 0,
            refreshed: 0,
            elapsed_seconds: 0.0,
            failures: Vec::new(),
        };
        for outcome in outcomes {
            match outcome {
                Outcome::UpToDate => report.succeeded += 1,
                Outcome::Refreshed => {
                    report.succeeded += 1;
                    report.refreshed += 1;
                }
                Outcome::Failed(failure) => {
                    report.failed += 1;
                    report.failures.push(failure);
                }
            }
        }
        report.elapsed_seconds = started.elapsed().as_secs_f64();

        info!(
            "refresh run finished: {} succeeded, {} failed, {} refreshed in {:.2}s",
            report.succeeded, report.failed, report.refreshed, report.elapsed_seconds
        );
        self.store.save_report(&report).await?;
        Ok(report)
    }

    async fn refresh_section(&self, section: &CatalogSection, ttl: Duration) -> Outcome {
        match self
            .store
            .fetch_if_needed(section, ttl, self.source.as_ref())
            .await
        {
            Ok(outcome) if outcome.was_refreshed() => Outcome::Refreshed,
            Ok(_) => Outcome::UpToDate,
            Err(e) => {
                warn!("refresh of section '{}' failed: {}", section.name, e);
                Outcome::Failed(SectionFailure {
                    section: section.name.clone(),
                    error: e.to_string(),
                })
            }
        }
    }
}
