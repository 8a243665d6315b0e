//! CLI command implementations

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::analytics::AnalyticsStore;
use crate::config::Config;
use crate::error::{parse_address, Error};
use crate::ingest;
use crate::meta::MetaStore;
use crate::refresh::Enricher;
use crate::vault::{VaultIndex, VaultRecord};

/// Index and stores after loading every configured source
pub struct LoadedState {
    pub index: Arc<VaultIndex>,
    pub enricher: Arc<Enricher>,
}

/// Load vaults, metadata and analytics, then run one enrichment pass
pub fn load_state(config: &Config) -> Result<LoadedState> {
    let index = Arc::new(VaultIndex::new());

    let meta = match &config.data.meta_path {
        Some(path) => MetaStore::load_from_file(path)
            .with_context(|| format!("Failed to load metadata from {}", path.display()))?,
        None => {
            warn!("No metadata file configured, migrations and display names stay empty");
            MetaStore::new()
        }
    };

    let analytics = match &config.data.analytics_path {
        Some(path) => AnalyticsStore::load_from_file(path)
            .with_context(|| format!("Failed to load analytics from {}", path.display()))?,
        None => {
            warn!("No analytics file configured, APY snapshots stay zero");
            AnalyticsStore::new()
        }
    };

    match &config.data.vaults_path {
        Some(path) => {
            let vaults = ingest::load_vaults(path)
                .with_context(|| format!("Failed to load vaults from {}", path.display()))?;
            ingest::ingest(&index, &config.chains, vaults);
        }
        None => warn!("No vaults file configured, index is empty"),
    }

    let enricher = Arc::new(
        Enricher::new(index.clone(), Arc::new(meta), Arc::new(analytics))
            .with_sources(config.data.clone()),
    );
    enricher.refresh_all(&config.chains);

    Ok(LoadedState { index, enricher })
}

/// Show current configuration
pub fn show_config(config: &Config) -> Result<()> {
    print!("{}", config);
    Ok(())
}

/// List every vault of a chain, sorted by address
pub fn list(config: &Config, chain_id: u64, json: bool) -> Result<()> {
    let state = load_state(config)?;
    let vaults = state.index.list_sorted(chain_id);

    if json {
        let records: Vec<&VaultRecord> = vaults.iter().map(|v| v.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("\n=== VAULTS ON CHAIN {} ({}) ===\n", chain_id, vaults.len());
    for vault in &vaults {
        println!(
            "{}  {:<14} {:<40} net APY {:>7.2}%{}",
            vault.address,
            vault.display_symbol,
            vault.formatted_name,
            vault.apy.net_apy * 100.0,
            if vault.migration.available {
                format!("  -> migrate to {}", vault.migration.address)
            } else {
                String::new()
            }
        );
    }

    Ok(())
}

/// Print one vault as JSON
pub fn find(config: &Config, chain_id: u64, address: &str) -> Result<()> {
    let address = parse_address(address)?;
    let state = load_state(config)?;

    let vault = state
        .index
        .find(chain_id, &address)
        .ok_or_else(|| Error::VaultNotFound {
            chain_id,
            address: address.to_string(),
        })?;

    println!("{}", serde_json::to_string_pretty(vault.as_ref())?);
    Ok(())
}

/// Keep the index refreshed until Ctrl-C
pub async fn run(config: &Config) -> Result<()> {
    let state = load_state(config)?;

    for chain_id in &config.chains {
        info!(chain_id, vaults = state.index.len(*chain_id), "Index ready");
    }

    if !config.refresh.enabled {
        info!("Refresh disabled, exiting after initial load");
        return Ok(());
    }

    let handle = state.enricher.clone().spawn(
        config.chains.clone(),
        Duration::from_secs(config.refresh.interval_secs),
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown requested");
    handle.shutdown().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use std::io::Write;

    fn write_json(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_state_enriches() {
        let dir = tempfile::tempdir().unwrap();
        let vaults = write_json(
            &dir,
            "vaults.json",
            r#"[{
                "chain_id": 1,
                "address": "0x0101010101010101010101010101010101010101",
                "name": "",
                "symbol": "",
                "token": { "address": "0x0202020202020202020202020202020202020202", "name": "Dai Stablecoin", "symbol": "DAI" }
            }]"#,
        );
        let meta = write_json(
            &dir,
            "meta.json",
            r#"[{
                "chain_id": 1,
                "address": "0x0101010101010101010101010101010101010101",
                "migration_available": false
            }]"#,
        );

        let mut config = Config::default();
        config.data.vaults_path = Some(vaults);
        config.data.meta_path = Some(meta);

        let state = load_state(&config).unwrap();
        let vault = state.index.find(1, &Address::repeat_byte(1)).unwrap();
        assert_eq!(vault.formatted_name, "Dai Stablecoin yVault");
        assert_eq!(vault.symbol, "yvDAI");
        assert!(!vault.migration.available);
        assert_eq!(vault.migration.address, Address::repeat_byte(1));
        assert!(vault.apy.is_zero());
    }

    #[test]
    fn test_load_state_without_sources() {
        let state = load_state(&Config::default()).unwrap();
        assert!(state.index.is_empty());
    }

    #[test]
    fn test_run_without_refresh_returns() {
        let mut config = Config::default();
        config.refresh.enabled = false;
        assert!(tokio_test::block_on(run(&config)).is_ok());
    }

    #[test]
    fn test_find_rejects_bad_address() {
        let err = find(&Config::default(), 1, "0x1234").unwrap_err();
        assert!(err.to_string().contains("Invalid address"));
    }
}
