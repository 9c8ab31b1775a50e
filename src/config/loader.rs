//! Reads the site settings file.

use std::path::Path;

use super::{
    ConfigError,
    SiteSettings,
};

/// Name of the settings file in the site root.
pub(super) const CONFIG_FILE: &str = ".portfolio.json";

/// Load settings from the site root.
///
/// # Returns
/// - `Ok(Some(settings))`: the settings file exists and parsed
/// - `Ok(None)`: there is no settings file
/// - `Err(ConfigError)`: the file could not be read or parsed
pub(super) fn load_from_root(site_root: &Path) -> Result<Option<SiteSettings>, ConfigError> {
    let config_path = site_root.join(CONFIG_FILE);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: SiteSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
