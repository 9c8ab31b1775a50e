//! Site settings read from `.portfolio.json`.
mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    ContactConfig,
    SiteSettings,
    ValidationError,
};
