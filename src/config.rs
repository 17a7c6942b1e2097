//! Gallery settings, read from TOML. Every section is optional.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};
use crate::sorting::SortAlgorithm;

pub const MAX_SAMPLE_SIZE: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub sort: SortConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    pub algorithm: SortAlgorithm,
    pub sample_size: usize,
    pub seed: Option<u64>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            algorithm: SortAlgorithm::Hoare,
            sample_size: 16,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// JSON file backing the memento page; memory only when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl GalleryConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GalleryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sort.sample_size == 0 {
            return Err(GalleryError::invalid_config(
                "sort.sample_size",
                "must be at least 1",
            ));
        }
        if self.sort.sample_size > MAX_SAMPLE_SIZE {
            return Err(GalleryError::invalid_config(
                "sort.sample_size",
                format!("must be at most {}", MAX_SAMPLE_SIZE),
            ));
        }
        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                return Err(GalleryError::invalid_config(
                    "storage.path",
                    "must not be empty when given",
                ));
            }
        }
        Ok(())
    }
}
