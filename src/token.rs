//! Token and strategy descriptors attached to a vault
//!
//! Both are supplied fully formed by ingestion. The index only reads the
//! token's name and symbol while normalizing vault naming.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// ERC20 token deposited into a vault
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Erc20Token {
    pub address: Address,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub decimals: u64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub display_symbol: String,
    #[serde(default)]
    pub icon: String,
}

/// Strategy a vault allocates its assets to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub address: Address,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Anything else ingestion attaches; passed through untouched
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}
