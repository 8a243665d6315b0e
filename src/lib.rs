//! Vault Index Library
//!
//! In-memory, per-chain index of yield vaults. Raw on-chain facts are merged
//! with curated metadata and precomputed analytics into one record per
//! (chain id, address), served to API handlers as immutable snapshots.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod meta;
pub mod refresh;
pub mod token;
pub mod vault;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use vault::{VaultIndex, VaultRecord};
