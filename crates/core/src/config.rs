//! Application configuration loaded from `config.toml` and `GAMEHUB_*` variables.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::info;

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "gamehub";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "GAMEHUB_CONFIG";

const DEFAULT_CONFIG: &str = r##"# gamehub configuration

# JSON file holding an array of game records. The built-in catalog is used when unset.
# catalog_path = "/path/to/catalog.json"

# Directory holding storage.json with the recently played list.
# data_dir = "/path/to/data"

# Set to false to run without a recently played list.
persist_recent = true

[theme]
# accent = "#7c3aed"
# accent_alt = "#f59e0b"
# muted = "#6b7280"
# highlight = "#facc15"
"##;

/// Optional color overrides, as `#rrggbb` strings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    /// Titles, selection markers and active tabs.
    pub accent: Option<String>,
    /// Secondary highlights such as featured badges.
    pub accent_alt: Option<String>,
    /// De-emphasised text.
    pub muted: Option<String>,
    /// Star ratings and key hints.
    pub highlight: Option<String>,
}

/// Runtime settings for the catalog front-end.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// JSON catalog file; `None` uses the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// Directory for persisted client state.
    pub data_dir: PathBuf,
    /// Whether the recently played list is persisted.
    pub persist_recent: bool,
    /// Color overrides.
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            data_dir: default_app_dir(),
            persist_recent: true,
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default config path layered under environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (optional) layered under environment variables.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("GAMEHUB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// `<config_dir>/gamehub`, or `./gamehub` when the platform has none.
pub fn default_app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Config file location, honouring [`CONFIG_PATH_ENV`].
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| default_app_dir().join("config.toml"))
}

/// Write the commented default config when none exists.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

/// Write the commented default config to `path` when it does not exist yet.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.catalog_path, None);
        assert!(config.persist_recent);
        assert_eq!(config.theme, ThemeConfig::default());
        Ok(())
    }

    #[test]
    fn default_file_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("gamehub").join("config.toml");
        ensure_default_config_at(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_from(&path)?;
        assert!(config.persist_recent);
        assert_eq!(config.catalog_path, None);

        // an existing file is left untouched
        fs::write(&path, "persist_recent = false\n")?;
        ensure_default_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "persist_recent = false\n");
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r##"catalog_path = "/srv/games.json"
data_dir = "/var/lib/gamehub"
persist_recent = false

[theme]
accent = "#112233"
"##,
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/games.json")));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/gamehub"));
        assert!(!config.persist_recent);
        assert_eq!(config.theme.accent.as_deref(), Some("#112233"));
        assert_eq!(config.theme.muted, None);
        Ok(())
    }
}
