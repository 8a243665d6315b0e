//! Seeding the index from discovered vaults
//!
//! Chain discovery lives outside this crate; it hands over raw vaults as a
//! JSON array, each entry tagged with its chain id.

use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::vault::{RawVault, VaultIndex, VaultRecord};

/// One discovered vault
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveredVault {
    pub chain_id: u64,
    #[serde(flatten)]
    pub vault: RawVault,
}

/// Read discovered vaults from a JSON array file
pub fn load_vaults<P: AsRef<Path>>(path: P) -> Result<Vec<DiscoveredVault>> {
    let data = std::fs::read_to_string(path.as_ref())?;
    let vaults: Vec<DiscoveredVault> = serde_json::from_str(&data)?;
    Ok(vaults)
}

/// Insert discovered vaults for the given chains, returning how many were indexed.
///
/// Vaults on other chains are skipped.
pub fn ingest(index: &VaultIndex, chains: &[u64], vaults: Vec<DiscoveredVault>) -> usize {
    let mut indexed = 0;
    let mut skipped = 0;

    for discovered in vaults {
        if !chains.contains(&discovered.chain_id) {
            skipped += 1;
            continue;
        }
        let chain_id = discovered.chain_id;
        index.insert(chain_id, VaultRecord::from_raw(chain_id, discovered.vault));
        indexed += 1;
    }

    if skipped > 0 {
        warn!(skipped, "Skipped vaults on unconfigured chains");
    }
    info!(indexed, "Ingested vaults");
    indexed
}
