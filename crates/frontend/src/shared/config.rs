use anyhow::Context;
use contracts::shared::data_select::ITEMS_PER_PAGE;
use serde::Deserialize;

use crate::shared::namespace::ALL_NAMESPACES_KEY;

/// localStorage key holding an optional TOML override of the embedded config
const STORAGE_KEY: &str = "dashboard_config";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data_select: DataSelectConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataSelectConfig {
    /// Rows per page of every list widget
    pub items_per_page: usize,
    /// Namespace value meaning "all namespaces"
    pub all_namespaces_key: String,
}

impl Default for DataSelectConfig {
    fn default() -> Self {
        Self {
            items_per_page: ITEMS_PER_PAGE,
            all_namespaces_key: ALL_NAMESPACES_KEY.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[data_select]
items_per_page = 10
all_namespaces_key = "_all"

[api]
port = 3000
"#;

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    toml::from_str(contents).context("invalid dashboard config")
}

/// Load the dashboard configuration
///
/// Search order:
/// 1. TOML document stored in localStorage under `dashboard_config`
/// 2. Falls back to the embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(raw) = stored_override() {
        match parse_config(&raw) {
            Ok(config) => {
                log::info!("Loaded dashboard config from localStorage");
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring stored dashboard config: {:#}", e),
        }
    }

    log::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn stored_override() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok().flatten()?;
    storage.get_item(STORAGE_KEY).ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.data_select.items_per_page, 10);
        assert_eq!(config.data_select.all_namespaces_key, "_all");
        assert_eq!(config.api.port, 3000);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config("[data_select]\nitems_per_page = 25\n").unwrap();
        assert_eq!(config.data_select.items_per_page, 25);
        assert_eq!(config.data_select.all_namespaces_key, ALL_NAMESPACES_KEY);
        assert_eq!(config.api.port, 3000);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(parse_config("[data_select]\nitems_per_page = \"many\"\n").is_err());
    }
}
