//! Configuration file parsing for the roadside head unit
//!
//! Supports:
//! - `.roadside/config.toml` - Global settings
//! - `.roadside/settings.local.toml` - Persisted login flag

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, PreferencesStore};
pub use types::*;
