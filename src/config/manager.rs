//! Holds the validated site settings.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SiteSettings,
    loader,
};

/// Holds the settings in effect for a site root.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Current settings
    current_settings: SiteSettings,

    /// Site root the settings were loaded from
    site_root: Option<PathBuf>,
}

impl ConfigManager {
    /// Manager holding the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: SiteSettings::default(), site_root: None }
    }

    /// Load and validate the settings of a site root.
    ///
    /// Without a root, or without a settings file in it, the defaults are used.
    pub fn load_settings(&mut self, site_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for site root: {:?}", site_root);

        let settings = if let Some(root) = &site_root {
            loader::load_from_root(root)?.map_or_else(SiteSettings::default, |loaded| {
                tracing::debug!("Loaded site settings: {:?}", loaded);
                loaded
            })
        } else {
            SiteSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.site_root = site_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replace the settings, keeping the previous ones if the new ones are invalid.
    pub fn update_settings(&mut self, new_settings: SiteSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// Settings in effect.
    #[must_use]
    pub const fn get_settings(&self) -> &SiteSettings {
        &self.current_settings
    }

    /// Site root, if settings were loaded from one.
    #[must_use]
    pub fn site_root(&self) -> Option<&Path> {
        self.site_root.as_deref()
    }

    /// Resolve a configured path against the site root.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.site_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}
