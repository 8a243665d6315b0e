//! Aggregated vault analytics
//!
//! APY/APR snapshots computed elsewhere, keyed by (chain id, address).

use alloy_primitives::Address;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::vault::{AnalyticsLookup, ApySnapshot};

/// One entry of the analytics file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedVault {
    pub chain_id: u64,
    pub address: Address,
    #[serde(default)]
    pub legacy_apy: ApySnapshot,
}

/// Concurrent analytics store
#[derive(Default)]
pub struct AnalyticsStore {
    vaults: DashMap<(u64, Address), ApySnapshot>,
}

impl AnalyticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load entries from a JSON array file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::new();
        let count = store.reload_from_file(path.as_ref())?;
        info!(path = %path.as_ref().display(), entries = count, "Loaded vault analytics");
        Ok(store)
    }

    /// Replace all entries; untouched on read or parse failure
    pub fn reload_from_file(&self, path: &Path) -> Result<usize> {
        let data = std::fs::read_to_string(path)?;
        let aggregated: Vec<AggregatedVault> = serde_json::from_str(&data)?;

        let fresh: HashMap<(u64, Address), ApySnapshot> = aggregated
            .into_iter()
            .map(|vault| ((vault.chain_id, vault.address), vault.legacy_apy))
            .collect();
        let count = fresh.len();

        // Drop stale keys only; shared keys are overwritten below
        self.vaults.retain(|key, _| fresh.contains_key(key));
        for (key, apy) in fresh {
            self.vaults.insert(key, apy);
        }
        Ok(count)
    }

    pub fn upsert(&self, vault: AggregatedVault) {
        self.vaults
            .insert((vault.chain_id, vault.address), vault.legacy_apy);
    }

    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }
}

impl AnalyticsLookup for AnalyticsStore {
    fn legacy_apy(&self, chain_id: u64, address: &Address) -> Option<ApySnapshot> {
        self.vaults
            .get(&(chain_id, *address))
            .map(|apy| apy.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::{ApyComposite, ApyFees};
    use std::io::Write;

    #[test]
    fn test_load_and_lookup() {
        let json = r#"[{
            "chain_id": 1,
            "address": "0xabababababababababababababababababababab",
            "legacy_apy": {
                "type": "v2:averaged",
                "gross_apr": 0.05,
                "net_apy": 0.04,
                "fees": { "performance": 0.2, "withdrawal": 0.0, "management": 0.0, "keep_crv": 0.0, "cvx_keep_crv": 0.0 },
                "points": { "week_ago": 0.03, "month_ago": 0.04, "inception": 0.05 },
                "composite": { "boost": 0.0, "pool_apy": 0.0, "boosted_apr": 0.0, "base_apr": 0.0, "cvx_apr": 0.0, "rewards_apr": 0.0 }
            }
        }]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let store = AnalyticsStore::load_from_file(file.path()).unwrap();
        let apy = store.legacy_apy(1, &Address::repeat_byte(0xab)).unwrap();
        assert_eq!(apy.apy_type, "v2:averaged");
        assert_eq!(apy.net_apy, 0.04);
        assert_eq!(apy.points.month_ago, 0.04);
        assert_eq!(apy.fees.performance, 0.2);

        assert!(store.legacy_apy(1, &Address::repeat_byte(0x01)).is_none());
    }

    #[test]
    fn test_partial_apy_entry() {
        let json = r#"[{
            "chain_id": 1,
            "address": "0xabababababababababababababababababababab",
            "legacy_apy": { "type": "v2:averaged", "net_apy": 0.04 }
        }]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let store = AnalyticsStore::load_from_file(file.path()).unwrap();
        let apy = store.legacy_apy(1, &Address::repeat_byte(0xab)).unwrap();
        assert_eq!(apy.apy_type, "v2:averaged");
        assert_eq!(apy.net_apy, 0.04);
        assert_eq!(apy.gross_apr, 0.0);
        assert_eq!(apy.fees, ApyFees::default());
        assert_eq!(apy.composite, ApyComposite::default());
    }

    #[test]
    fn test_reload_drops_stale_entries() {
        let store = AnalyticsStore::new();
        for byte in [1u8, 2] {
            store.upsert(AggregatedVault {
                chain_id: 1,
                address: Address::repeat_byte(byte),
                legacy_apy: ApySnapshot::default(),
            });
        }

        let json = r#"[{
            "chain_id": 1,
            "address": "0x0101010101010101010101010101010101010101",
            "legacy_apy": { "net_apy": 0.09 }
        }]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert_eq!(store.reload_from_file(file.path()).unwrap(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.legacy_apy(1, &Address::repeat_byte(1)).unwrap().net_apy, 0.09);
        assert!(store.legacy_apy(1, &Address::repeat_byte(2)).is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AnalyticsStore::load_from_file(dir.path().join("missing.json")).is_err());
    }
}
