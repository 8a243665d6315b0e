//! Enrichment passes over the index
//!
//! Each pass re-runs naming and the metadata/analytics merges for every
//! vault of a chain and swaps the updated record into the index. A
//! background loop repeats the pass on an interval, reloading the source
//! files first so curated edits and new analytics show up.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::analytics::AnalyticsStore;
use crate::config::DataConfig;
use crate::meta::MetaStore;
use crate::vault::{AnalyticsLookup, MetaLookup, VaultIndex, VaultRecord};

/// Outcome of one pass over a chain
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub chain_id: u64,
    pub vaults: usize,
    pub with_meta: usize,
    pub with_apy: usize,
    pub refreshed_at: DateTime<Utc>,
}

/// Apply naming and every merge to one record.
///
/// Each collaborator is queried once per call. Returns (metadata found,
/// analytics found).
pub fn enrich_vault<M, A>(
    record: &mut VaultRecord,
    chain_id: u64,
    meta: &M,
    analytics: &A,
) -> (bool, bool)
where
    M: MetaLookup + ?Sized,
    A: AnalyticsLookup + ?Sized,
{
    let entry = meta.vault_meta(chain_id, &record.address);
    let apy = analytics.legacy_apy(chain_id, &record.address);
    let found = (entry.is_some(), apy.is_some());

    let (display_name, display_symbol) = entry
        .as_ref()
        .map(|e| (e.display_name.as_str(), e.display_symbol.as_str()))
        .unwrap_or(("", ""));

    record.normalize_name(display_name);
    record.normalize_symbol(display_symbol);
    record.apply_migration(entry.as_ref());
    record.apply_details(entry.as_ref());
    record.apply_apy(apy);

    found
}

/// Runs enrichment passes against shared stores
pub struct Enricher {
    index: Arc<VaultIndex>,
    meta: Arc<MetaStore>,
    analytics: Arc<AnalyticsStore>,
    /// Files reloaded before each background pass
    sources: DataConfig,
}

impl Enricher {
    pub fn new(index: Arc<VaultIndex>, meta: Arc<MetaStore>, analytics: Arc<AnalyticsStore>) -> Self {
        Self {
            index,
            meta,
            analytics,
            sources: DataConfig::default(),
        }
    }

    /// Reload metadata and analytics from these files before each background pass
    pub fn with_sources(mut self, sources: DataConfig) -> Self {
        self.sources = sources;
        self
    }

    /// Enrich every vault of one chain
    pub fn refresh_chain(&self, chain_id: u64) -> RefreshReport {
        let mut with_meta = 0;
        let mut with_apy = 0;
        let mut vaults = 0;

        for address in self.index.list_addresses(chain_id) {
            let updated = self.index.update(chain_id, &address, |record| {
                let (meta_found, apy_found) =
                    enrich_vault(record, chain_id, self.meta.as_ref(), self.analytics.as_ref());
                if !meta_found {
                    debug!(chain_id, address = %address, "No curated metadata for vault");
                }
                with_meta += usize::from(meta_found);
                with_apy += usize::from(apy_found);
            });
            vaults += usize::from(updated);
        }

        let report = RefreshReport {
            chain_id,
            vaults,
            with_meta,
            with_apy,
            refreshed_at: Utc::now(),
        };
        info!(
            chain_id,
            vaults = report.vaults,
            with_meta = report.with_meta,
            with_apy = report.with_apy,
            "Refreshed vaults"
        );
        report
    }

    /// Enrich every vault of each chain
    pub fn refresh_all(&self, chains: &[u64]) -> Vec<RefreshReport> {
        chains.iter().map(|&chain_id| self.refresh_chain(chain_id)).collect()
    }

    /// Reload the configured source files; failures keep the previous data
    pub fn reload_sources(&self) {
        if let Some(path) = &self.sources.meta_path {
            reload("metadata", path, |p| self.meta.reload_from_file(p));
        }
        if let Some(path) = &self.sources.analytics_path {
            reload("analytics", path, |p| self.analytics.reload_from_file(p));
        }
    }

    /// Start the background refresh loop
    pub fn spawn(self: Arc<Self>, chains: Vec<u64>, period: Duration) -> RefreshHandle {
        let (shutdown, mut shutdown_rx) = broadcast::channel(1);

        info!(
            chains = ?chains,
            interval_secs = period.as_secs(),
            "Starting vault refresh loop"
        );

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.reload_sources();
                        self.refresh_all(&chains);
                    }
                    _ = shutdown_rx.recv() => {
                        info!("Vault refresh loop shutting down");
                        break;
                    }
                }
            }
        });

        RefreshHandle { shutdown, task }
    }
}

fn reload<F>(kind: &str, path: &Path, load: F)
where
    F: FnOnce(&Path) -> crate::Result<usize>,
{
    match load(path) {
        Ok(count) => debug!(kind, path = %path.display(), entries = count, "Reloaded source"),
        Err(e) => warn!(kind, path = %path.display(), error = %e, "Failed to reload source, keeping previous data"),
    }
}

/// Handle to a running refresh loop
pub struct RefreshHandle {
    shutdown: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Signal the loop to stop and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            warn!(error = %e, "Refresh loop ended abnormally");
        }
    }
}
