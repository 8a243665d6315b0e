//! Vault records and the per-chain index that serves them
//!
//! Ingestion inserts a `VaultRecord` built from chain data; naming and
//! enrichment then fill in derived fields, repeatedly, as curated metadata
//! and analytics refresh.

pub mod enrichment;
pub mod index;
pub mod naming;
pub mod types;

pub use enrichment::{AnalyticsLookup, MetaEntry, MetaLookup};
pub use index::VaultIndex;
pub use types::{
    ApyComposite, ApyFees, ApyPoints, ApySnapshot, MigrationStatus, RawVault, TvlSnapshot,
    VaultDetails, VaultRecord,
};
