//! Vault record data model
//!
//! A `VaultRecord` is one entry per (chain id, address). Ingestion builds it
//! from a `RawVault`; naming and enrichment then fill in the derived fields.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::token::{Erc20Token, Strategy};

/// Value locked in a vault
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvlSnapshot {
    pub total_assets: U256,
    pub total_delegated_assets: U256,
    pub tvl_deposited: f64,
    pub tvl_delegated: f64,
    pub tvl: f64,
    pub price: f64,
}

/// Fees applied to the vault yield
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApyFees {
    pub performance: f64,
    pub withdrawal: f64,
    pub management: f64,
    pub keep_crv: f64,
    pub cvx_keep_crv: f64,
}

/// Historical APY points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApyPoints {
    pub week_ago: f64,
    pub month_ago: f64,
    pub inception: f64,
}

/// Breakdown of a composite (curve/convex style) yield
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApyComposite {
    pub boost: f64,
    pub pool_apy: f64,
    pub boosted_apr: f64,
    pub base_apr: f64,
    pub cvx_apr: f64,
    pub rewards_apr: f64,
}

/// APY, APR, fees and breakdown as computed by the analytics pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApySnapshot {
    #[serde(rename = "type")]
    pub apy_type: String,
    pub gross_apr: f64,
    pub net_apy: f64,
    pub fees: ApyFees,
    pub points: ApyPoints,
    pub composite: ApyComposite,
}

impl ApySnapshot {
    /// True when no analytics have been merged (or they are all zero)
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Whether the vault is being migrated, and where to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStatus {
    pub available: bool,
    /// Target vault, or the zero address when no metadata exists
    pub address: Address,
}

/// Administrative overrides curated for a vault
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultDetails {
    #[serde(default)]
    pub management: Address,
    #[serde(default)]
    pub governance: Address,
    #[serde(default)]
    pub guardian: Address,
    #[serde(default)]
    pub rewards: Address,
    #[serde(default)]
    pub deposit_limit: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_deposit_limit: Option<U256>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub apy_type_override: String,
    #[serde(default)]
    pub apy_override: f64,
    /// Sort order in listings; never sent to API clients
    #[serde(default, skip_serializing)]
    pub order: f32,
    #[serde(default)]
    pub performance_fee: u64,
    #[serde(default)]
    pub management_fee: u64,
    #[serde(default)]
    pub deposits_disabled: bool,
    #[serde(default)]
    pub withdrawals_disabled: bool,
    #[serde(default)]
    pub allow_zap_in: bool,
    #[serde(default)]
    pub allow_zap_out: bool,
    #[serde(default)]
    pub retired: bool,
}

/// Vault as discovered on chain, before any normalization or enrichment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVault {
    pub address: Address,
    #[serde(default)]
    pub registry: Address,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "type")]
    pub vault_type: String,
    #[serde(default)]
    pub inception: u64,
    #[serde(default)]
    pub decimals: u64,
    #[serde(default)]
    pub endorsed: bool,
    #[serde(default)]
    pub emergency_shutdown: bool,
    #[serde(default)]
    pub price_per_share: U256,
    #[serde(default)]
    pub token: Erc20Token,
    #[serde(default)]
    pub strategies: Vec<Strategy>,
    #[serde(default)]
    pub tvl: TvlSnapshot,
}

/// Enriched vault record served by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultRecord {
    pub chain_id: u64,
    pub address: Address,
    pub registry: Address,

    /// Symbol and name exactly as reported by the contract
    #[serde(skip)]
    pub raw_symbol: String,
    #[serde(skip)]
    pub raw_name: String,

    pub symbol: String,
    pub display_symbol: String,
    pub formatted_symbol: String,
    pub name: String,
    pub display_name: String,
    pub formatted_name: String,

    pub icon: String,
    pub version: String,
    #[serde(rename = "type")]
    pub vault_type: String,
    pub inception: u64,
    pub decimals: u64,
    pub endorsed: bool,
    pub emergency_shutdown: bool,
    #[serde(rename = "pricePerShare")]
    pub price_per_share: U256,

    pub token: Erc20Token,
    pub tvl: TvlSnapshot,
    pub apy: ApySnapshot,
    pub strategies: Vec<Strategy>,
    pub migration: MigrationStatus,
    pub details: Option<VaultDetails>,
}

impl VaultRecord {
    /// Build a record from freshly discovered chain data.
    ///
    /// Derived naming starts as the raw values; APY and migration start zeroed.
    pub fn from_raw(chain_id: u64, raw: RawVault) -> Self {
        Self {
            chain_id,
            address: raw.address,
            registry: raw.registry,
            raw_symbol: raw.symbol.clone(),
            raw_name: raw.name.clone(),
            symbol: raw.symbol,
            display_symbol: String::new(),
            formatted_symbol: String::new(),
            name: raw.name,
            display_name: String::new(),
            formatted_name: String::new(),
            icon: raw.icon,
            version: raw.version,
            vault_type: raw.vault_type,
            inception: raw.inception,
            decimals: raw.decimals,
            endorsed: raw.endorsed,
            emergency_shutdown: raw.emergency_shutdown,
            price_per_share: raw.price_per_share,
            token: raw.token,
            tvl: raw.tvl,
            apy: ApySnapshot::default(),
            strategies: raw.strategies,
            migration: MigrationStatus::default(),
            details: None,
        }
    }

    /// Check if the vault was retired by curators
    pub fn is_retired(&self) -> bool {
        self.details.as_ref().is_some_and(|d| d.retired)
    }
}
