//! Settings parser for .roadside/config.toml and the local preferences file

use super::types::{Settings, UserPreferences};
use roadside_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const LOCAL_SETTINGS_FILENAME: &str = "settings.local.toml";
const ROADSIDE_DIR: &str = ".roadside";

/// Load settings from .roadside/config.toml
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_dir: &Path) -> Settings {
    let config_path = config_dir.join(ROADSIDE_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create a commented default config file in .roadside/
pub fn init_config_dir(config_dir: &Path) -> Result<()> {
    let roadside_dir = config_dir.join(ROADSIDE_DIR);

    if !roadside_dir.exists() {
        std::fs::create_dir_all(&roadside_dir)
            .map_err(|e| Error::config(format!("Failed to create .roadside dir: {}", e)))?;
    }

    let config_path = roadside_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Roadside head unit configuration

[data]
# Simulated latency of every data source query
latency_ms = 5000
# Queries that fail instead of returning canned data:
# "advisory", "issues", "cars", "tow_destinations"
fail = []

[flow]
# Duration of the "sending request" overlay after Submit
submit_delay_ms = 2000

[session]
# Login flag used until a preference has been stored
logged_in = false
# Whether the simulated platform grants precise location at startup
precise_location = true
"#;
        std::fs::write(&config_path, default_content).context("Failed to write config.toml")?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}

/// Local key-value store for user state that survives restarts.
///
/// Only the login flag is stored.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    config_dir: PathBuf,
}

impl PreferencesStore {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    fn path(&self) -> PathBuf {
        self.config_dir
            .join(ROADSIDE_DIR)
            .join(LOCAL_SETTINGS_FILENAME)
    }

    /// Load user preferences from .roadside/settings.local.toml
    ///
    /// Returns None if the file doesn't exist or can't be parsed.
    pub fn load(&self) -> Option<UserPreferences> {
        let prefs_path = self.path();

        if !prefs_path.exists() {
            debug!("No local settings file at {:?}", prefs_path);
            return None;
        }

        match std::fs::read_to_string(&prefs_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(prefs) => {
                    debug!("Loaded user preferences from {:?}", prefs_path);
                    Some(prefs)
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}", prefs_path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}", prefs_path, e);
                None
            }
        }
    }

    /// Save user preferences to .roadside/settings.local.toml
    ///
    /// Uses atomic write (temp file + rename).
    pub fn save(&self, prefs: &UserPreferences) -> Result<()> {
        let roadside_dir = self.config_dir.join(ROADSIDE_DIR);

        if !roadside_dir.exists() {
            std::fs::create_dir_all(&roadside_dir)
                .map_err(|e| Error::config(format!("Failed to create .roadside dir: {}", e)))?;
        }

        let prefs_path = self.path();
        let temp_path = roadside_dir.join(".settings.local.toml.tmp");

        let header = "# User-specific state (not tracked in git)\n\n";

        let content = toml::to_string_pretty(prefs)
            .map_err(|e| Error::config(format!("Failed to serialize preferences: {}", e)))?;

        std::fs::write(&temp_path, format!("{}{}", header, content))
            .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

        std::fs::rename(&temp_path, &prefs_path)
            .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

        debug!("Saved user preferences to {:?}", prefs_path);
        Ok(())
    }

    pub fn load_logged_in(&self) -> Option<bool> {
        self.load().and_then(|prefs| prefs.logged_in)
    }

    pub fn save_logged_in(&self, logged_in: bool) -> Result<()> {
        let mut prefs = self.load().unwrap_or_default();
        prefs.logged_in = Some(logged_in);
        self.save(&prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadside_core::Operation;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_load_settings_reads_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(ROADSIDE_DIR)).unwrap();
        std::fs::write(
            dir.path().join(ROADSIDE_DIR).join(CONFIG_FILENAME),
            "[data]\nlatency_ms = 10\nfail = [\"cars\"]\n",
        )
        .unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.data.latency_ms, 10);
        assert_eq!(settings.data.fail, vec![Operation::Cars]);
    }

    #[test]
    fn test_load_settings_invalid_file_uses_defaults() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(ROADSIDE_DIR)).unwrap();
        std::fs::write(
            dir.path().join(ROADSIDE_DIR).join(CONFIG_FILENAME),
            "[data\nlatency_ms = ",
        )
        .unwrap();

        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir_writes_parseable_defaults() {
        let dir = tempdir().unwrap();
        init_config_dir(dir.path()).unwrap();

        let config_path = dir.path().join(ROADSIDE_DIR).join(CONFIG_FILENAME);
        assert!(config_path.exists());
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir_keeps_existing_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(ROADSIDE_DIR)).unwrap();
        let config_path = dir.path().join(ROADSIDE_DIR).join(CONFIG_FILENAME);
        std::fs::write(&config_path, "[flow]\nsubmit_delay_ms = 1\n").unwrap();

        init_config_dir(dir.path()).unwrap();

        assert_eq!(load_settings(dir.path()).flow.submit_delay_ms, 1);
    }

    #[test]
    fn test_preferences_round_trip_login_flag() {
        let dir = tempdir().unwrap();
        let store = PreferencesStore::new(dir.path());

        assert_eq!(store.load_logged_in(), None);

        store.save_logged_in(true).unwrap();
        assert_eq!(store.load_logged_in(), Some(true));

        store.save_logged_in(false).unwrap();
        assert_eq!(store.load_logged_in(), Some(false));
    }

    #[test]
    fn test_preferences_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = PreferencesStore::new(dir.path());
        store.save_logged_in(true).unwrap();

        assert!(!dir
            .path()
            .join(ROADSIDE_DIR)
            .join(".settings.local.toml.tmp")
            .exists());
    }
}
