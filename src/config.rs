use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::convert::ConvertOptions;
use crate::error::{Error, Result};

/// Configuration for doxmd, read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where `.md` files are written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Where renamed images are written. Defaults to the image link prefix
    /// resolved against the output directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_dir: Option<PathBuf>,
    pub convert: ConvertOptions,
}

impl Config {
    /// Load config from the config directory, defaults when there is none
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Save config to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("doxmd").join("config.toml"))
    }

    /// Write the default config file and return its path
    pub fn init_default() -> Result<PathBuf> {
        let path = Self::get_config_path()
            .ok_or_else(|| Error::Config("no config directory on this platform".to_string()))?;
        Config::default().save_to(&path)?;
        Ok(path)
    }

    /// Keep images under the output directory when it is the current one.
    ///
    /// A parent-relative link prefix would otherwise place images outside the
    /// working directory. Explicit `images_dir` settings are left alone.
    pub fn keep_images_local(&mut self) {
        if self.images_dir.is_none() && self.convert.image_link_prefix.starts_with("..") {
            self.convert.image_link_prefix = "images".to_string();
        }
    }

    /// Images directory for a given output directory
    pub fn resolve_images_dir(&self, output_dir: &Path) -> PathBuf {
        match &self.images_dir {
            Some(dir) => dir.clone(),
            None => output_dir.join(&self.convert.image_link_prefix),
        }
    }
}
