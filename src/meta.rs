//! Curated vault metadata
//!
//! Hand-maintained display names, migration targets and administrative
//! overrides, keyed by (chain id, address). Loaded from a JSON file and
//! refreshed in place.

use alloy_primitives::Address;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::vault::{MetaEntry, MetaLookup, VaultDetails};

/// One entry of the metadata file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultMeta {
    pub chain_id: u64,
    pub address: Address,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub display_symbol: String,
    #[serde(default)]
    pub migration_available: bool,
    #[serde(default)]
    pub migration_target_vault: Address,
    #[serde(default)]
    pub details: Option<VaultDetails>,
}

impl From<VaultMeta> for MetaEntry {
    fn from(meta: VaultMeta) -> Self {
        Self {
            display_name: meta.display_name,
            display_symbol: meta.display_symbol,
            migration_available: meta.migration_available,
            migration_target_vault: meta.migration_target_vault,
            details: meta.details,
        }
    }
}

/// Concurrent metadata store
#[derive(Default)]
pub struct MetaStore {
    entries: DashMap<(u64, Address), MetaEntry>,
}

impl MetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load entries from a JSON array file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::new();
        let count = store.reload_from_file(path.as_ref())?;
        info!(path = %path.as_ref().display(), entries = count, "Loaded vault metadata");
        Ok(store)
    }

    /// Replace all entries with the contents of a JSON array file.
    ///
    /// The store is left untouched if the file cannot be read or parsed.
    /// Keys present in both the old and new contents stay readable
    /// throughout the swap.
    pub fn reload_from_file(&self, path: &Path) -> Result<usize> {
        let data = std::fs::read_to_string(path)?;
        let metas: Vec<VaultMeta> = serde_json::from_str(&data)?;

        let fresh: HashMap<(u64, Address), MetaEntry> = metas
            .into_iter()
            .map(|meta| ((meta.chain_id, meta.address), MetaEntry::from(meta)))
            .collect();
        let count = fresh.len();

        self.entries.retain(|key, _| fresh.contains_key(key));
        for (key, entry) in fresh {
            self.entries.insert(key, entry);
        }
        Ok(count)
    }

    /// Add or replace one entry
    pub fn upsert(&self, meta: VaultMeta) {
        self.entries
            .insert((meta.chain_id, meta.address), MetaEntry::from(meta));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetaLookup for MetaStore {
    fn vault_meta(&self, chain_id: u64, address: &Address) -> Option<MetaEntry> {
        self.entries
            .get(&(chain_id, *address))
            .map(|entry| entry.value().clone())
    }
}
