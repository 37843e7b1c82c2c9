use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{rendering::RenderConfig, shaders::ShaderConfig, window::WindowConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the build-dependent default log level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LevelFilter>,
    pub window: WindowConfig,
    pub rendering: RenderConfig,
    pub shaders: ShaderConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Debug builds log progress messages, release builds only warnings and errors.
    pub fn effective_log_level(&self) -> LevelFilter {
        self.log_level.unwrap_or(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
    }
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    AppConfig::from_toml_str(&content)
}

/// Loads `config.toml` from the user's config directory, writing the defaults there first if
/// the file does not exist yet.
pub fn load_or_create_config() -> Result<AppConfig> {
    load_or_create_config_at(&get_config_path()?)
}

pub fn load_or_create_config_at(config_path: &Path) -> Result<AppConfig> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    if !config_path.exists() {
        let default_config = AppConfig::default();
        std::fs::write(config_path, default_config.to_toml_string()?)
            .context("Failed to write default config")?;
        return Ok(default_config);
    }

    load_from_path(config_path)
}

fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "metromandevteam", "LearnOpenGL")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}
