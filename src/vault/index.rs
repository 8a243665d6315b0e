//! Per-chain in-memory vault index
//!
//! Two-level registry: chain id -> address -> record. Each chain's map sits
//! behind its own `DashMap` shard lock, held only for the duration of a
//! single call. Readers get `Arc<VaultRecord>` snapshots that never change;
//! writers build a new record and swap it in whole.

use alloy_primitives::Address;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::types::VaultRecord;

type ChainVaults = HashMap<Address, Arc<VaultRecord>>;

/// Process-wide vault registry
#[derive(Default)]
pub struct VaultIndex {
    chains: DashMap<u64, ChainVaults>,
}

impl VaultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the record stored at (chain id, record address).
    ///
    /// The record's `chain_id` is set to the key it is stored under.
    /// Returns the record that was replaced, if any.
    pub fn insert(&self, chain_id: u64, mut record: VaultRecord) -> Option<Arc<VaultRecord>> {
        record.chain_id = chain_id;
        let address = record.address;
        let previous = self
            .chains
            .entry(chain_id)
            .or_default()
            .insert(address, Arc::new(record));

        debug!(
            chain_id,
            address = %address,
            replaced = previous.is_some(),
            "Indexed vault"
        );
        previous
    }

    /// All records of a chain, in no particular order
    pub fn list(&self, chain_id: u64) -> Vec<Arc<VaultRecord>> {
        self.chains
            .get(&chain_id)
            .map(|vaults| vaults.values().cloned().collect())
            .unwrap_or_default()
    }

    /// All addresses of a chain, in no particular order
    pub fn list_addresses(&self, chain_id: u64) -> Vec<Address> {
        self.chains
            .get(&chain_id)
            .map(|vaults| vaults.keys().copied().collect())
            .unwrap_or_default()
    }

    /// All records of a chain, sorted by address
    pub fn list_sorted(&self, chain_id: u64) -> Vec<Arc<VaultRecord>> {
        let mut vaults = self.list(chain_id);
        vaults.sort_by_key(|v| v.address);
        vaults
    }

    /// Look up a single vault; `None` when it was never inserted on that chain
    pub fn find(&self, chain_id: u64, address: &Address) -> Option<Arc<VaultRecord>> {
        self.chains
            .get(&chain_id)
            .and_then(|vaults| vaults.get(address).cloned())
    }

    /// Replace a record with a modified copy.
    ///
    /// The chain's lock is held while `apply` runs, so `apply` must not call
    /// back into the index. Returns false when the vault is unknown.
    pub fn update<F>(&self, chain_id: u64, address: &Address, apply: F) -> bool
    where
        F: FnOnce(&mut VaultRecord),
    {
        let Some(mut vaults) = self.chains.get_mut(&chain_id) else {
            return false;
        };
        let Some(slot) = vaults.get_mut(address) else {
            return false;
        };

        let mut next = (**slot).clone();
        apply(&mut next);
        *slot = Arc::new(next);
        true
    }

    /// Number of vaults indexed for a chain
    pub fn len(&self, chain_id: u64) -> usize {
        self.chains.get(&chain_id).map(|v| v.len()).unwrap_or(0)
    }

    /// Check if no vault is indexed on any chain
    pub fn is_empty(&self) -> bool {
        self.chains.iter().all(|entry| entry.value().is_empty())
    }

    /// Chain ids with at least one vault, ascending
    pub fn chains(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .chains
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| *entry.key())
            .collect();
        ids.sort_unstable();
        ids
    }
}
