use crate::models::ViewConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the view settings inside the configuration directory
pub const VIEW_CONFIG_FILE: &str = "View Settings.yaml";

/// Configuration manager for loading and saving the view settings YAML file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    view_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "MapEdit Data")
    ///
    /// # Returns
    /// A new ConfigManager instance
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            view_config_path: config_dir.join(VIEW_CONFIG_FILE),
            config_dir,
        })
    }

    /// Load the view configuration file.
    ///
    /// # Returns
    /// The loaded ViewConfig, or default if file doesn't exist
    pub fn load_view_config(&self) -> Result<ViewConfig> {
        if !self.view_config_path.exists() {
            tracing::warn!(
                "View config file not found at {}, using defaults",
                self.view_config_path
            );
            return Ok(ViewConfig::default());
        }

        let file_contents = fs::read_to_string(&self.view_config_path)
            .with_context(|| format!("Failed to read view config: {}", self.view_config_path))?;

        let config: ViewConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse view config: {}", self.view_config_path))?;

        tracing::info!("Loaded view config from {}", self.view_config_path);
        Ok(config)
    }

    /// Save the view configuration file.
    ///
    /// # Arguments
    /// * `config` - The ViewConfig to save
    pub fn save_view_config(&self, config: &ViewConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize view config to YAML")?;

        fs::write(&self.view_config_path, yaml_string)
            .with_context(|| format!("Failed to write view config: {}", self.view_config_path))?;

        tracing::info!("Saved view config to {}", self.view_config_path);
        Ok(())
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn view_config_path(&self) -> &Utf8Path {
        &self.view_config_path
    }
}
