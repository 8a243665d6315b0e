//! Merging curated metadata and analytics into vault records
//!
//! Enrichment is best effort: a missing entry resets the snapshot to its
//! zero value and is never reported as an error, so a vault stays servable
//! while its analytics are still being computed.

use alloy_primitives::Address;

use super::types::{ApySnapshot, MigrationStatus, VaultDetails, VaultRecord};

/// Curated metadata for one vault, as read by enrichment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaEntry {
    pub display_name: String,
    pub display_symbol: String,
    pub migration_available: bool,
    pub migration_target_vault: Address,
    pub details: Option<VaultDetails>,
}

/// Curated-metadata collaborator keyed by (chain id, address)
pub trait MetaLookup {
    fn vault_meta(&self, chain_id: u64, address: &Address) -> Option<MetaEntry>;
}

/// Analytics collaborator keyed by (chain id, address)
pub trait AnalyticsLookup {
    fn legacy_apy(&self, chain_id: u64, address: &Address) -> Option<ApySnapshot>;
}

impl VaultRecord {
    /// Set `migration` from curated metadata.
    ///
    /// Without metadata the status is the zero value. When migration is not
    /// available the status points at the vault itself.
    pub fn merge_migration<M: MetaLookup + ?Sized>(&mut self, chain_id: u64, meta: &M) {
        let entry = meta.vault_meta(chain_id, &self.address);
        self.apply_migration(entry.as_ref());
    }

    /// Copy the precomputed APY snapshot, or zero it when none exists
    pub fn merge_apy<A: AnalyticsLookup + ?Sized>(&mut self, chain_id: u64, analytics: &A) {
        self.apply_apy(analytics.legacy_apy(chain_id, &self.address));
    }

    /// Set `details` from curated metadata; cleared when nothing is curated
    pub fn merge_details<M: MetaLookup + ?Sized>(&mut self, chain_id: u64, meta: &M) {
        let entry = meta.vault_meta(chain_id, &self.address);
        self.apply_details(entry.as_ref());
    }

    /// `merge_migration` with the metadata entry already looked up
    pub fn apply_migration(&mut self, entry: Option<&MetaEntry>) {
        self.migration = match entry {
            Some(entry) if entry.migration_available => MigrationStatus {
                available: true,
                address: entry.migration_target_vault,
            },
            Some(_) => MigrationStatus {
                available: false,
                address: self.address,
            },
            None => MigrationStatus::default(),
        };
    }

    pub fn apply_apy(&mut self, apy: Option<ApySnapshot>) {
        self.apy = apy.unwrap_or_default();
    }

    pub fn apply_details(&mut self, entry: Option<&MetaEntry>) {
        self.details = entry.and_then(|entry| entry.details.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::types::{ApyComposite, ApyFees, ApyPoints, RawVault};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapMeta(HashMap<(u64, Address), MetaEntry>);

    impl MetaLookup for MapMeta {
        fn vault_meta(&self, chain_id: u64, address: &Address) -> Option<MetaEntry> {
            self.0.get(&(chain_id, *address)).cloned()
        }
    }

    #[derive(Default)]
    struct MapAnalytics(HashMap<(u64, Address), ApySnapshot>);

    impl AnalyticsLookup for MapAnalytics {
        fn legacy_apy(&self, chain_id: u64, address: &Address) -> Option<ApySnapshot> {
            self.0.get(&(chain_id, *address)).cloned()
        }
    }

    fn abc() -> Address {
        Address::repeat_byte(0xab)
    }

    fn def() -> Address {
        Address::repeat_byte(0xde)
    }

    fn vault() -> VaultRecord {
        VaultRecord::from_raw(1, RawVault {
            address: abc(),
            ..Default::default()
        })
    }

    fn sample_apy() -> ApySnapshot {
        ApySnapshot {
            apy_type: "crv".to_string(),
            gross_apr: 0.12,
            net_apy: 0.1,
            fees: ApyFees {
                performance: 0.2,
                management: 0.02,
                keep_crv: 0.1,
                ..Default::default()
            },
            points: ApyPoints {
                week_ago: 0.09,
                month_ago: 0.08,
                inception: 0.07,
            },
            composite: ApyComposite {
                boost: 2.5,
                pool_apy: 0.01,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_migration_missing_meta() {
        let mut v = vault();
        v.migration = MigrationStatus {
            available: true,
            address: def(),
        };
        v.merge_migration(1, &MapMeta::default());

        assert!(!v.migration.available);
        assert_eq!(v.migration.address, Address::ZERO);
    }

    #[test]
    fn test_migration_available() {
        let mut meta = MapMeta::default();
        meta.0.insert(
            (1, abc()),
            MetaEntry {
                migration_available: true,
                migration_target_vault: def(),
                ..Default::default()
            },
        );

        let mut v = vault();
        v.merge_migration(1, &meta);
        assert_eq!(
            v.migration,
            MigrationStatus {
                available: true,
                address: def()
            }
        );

        // Same address on another chain has no metadata
        v.merge_migration(250, &meta);
        assert_eq!(v.migration, MigrationStatus::default());
    }

    #[test]
    fn test_migration_unavailable_points_to_self() {
        let mut meta = MapMeta::default();
        meta.0.insert(
            (1, abc()),
            MetaEntry {
                migration_available: false,
                migration_target_vault: def(),
                ..Default::default()
            },
        );

        let mut v = vault();
        v.merge_migration(1, &meta);
        assert!(!v.migration.available);
        assert_eq!(v.migration.address, abc());
    }

    #[test]
    fn test_apy_copied_verbatim() {
        let mut analytics = MapAnalytics::default();
        analytics.0.insert((1, abc()), sample_apy());

        let mut v = vault();
        v.merge_apy(1, &analytics);
        assert_eq!(v.apy, sample_apy());
    }

    #[test]
    fn test_apy_missing_resets_to_zero() {
        let mut v = vault();
        v.apy = sample_apy();
        v.merge_apy(1, &MapAnalytics::default());
        assert!(v.apy.is_zero());
    }

    #[test]
    fn test_details_follow_meta() {
        let mut meta = MapMeta::default();
        meta.0.insert(
            (1, abc()),
            MetaEntry {
                details: Some(VaultDetails {
                    retired: true,
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        let mut v = vault();
        v.merge_details(1, &meta);
        assert!(v.is_retired());

        v.merge_details(10, &meta);
        assert!(v.details.is_none());
    }

    #[test]
    fn test_apply_matches_merge() {
        let entry = MetaEntry {
            migration_available: true,
            migration_target_vault: def(),
            details: Some(VaultDetails {
                comment: "moved".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut meta = MapMeta::default();
        meta.0.insert((1, abc()), entry.clone());
        let mut analytics = MapAnalytics::default();
        analytics.0.insert((1, abc()), sample_apy());

        let mut merged = vault();
        merged.merge_migration(1, &meta);
        merged.merge_details(1, &meta);
        merged.merge_apy(1, &analytics);

        let mut applied = vault();
        applied.apply_migration(Some(&entry));
        applied.apply_details(Some(&entry));
        applied.apply_apy(Some(sample_apy()));
        assert_eq!(applied, merged);

        applied.apply_migration(None);
        applied.apply_details(None);
        applied.apply_apy(None);
        assert_eq!(applied.migration, MigrationStatus::default());
        assert!(applied.details.is_none());
        assert!(applied.apy.is_zero());
    }
}
