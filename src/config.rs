//! 控制器配置
//!
//! JSON 形式：
//!
//! ```json
//! { "k": 4, "link_preset": "default", "links": null }
//! ```
//!
//! `links` 非空时覆盖 `link_preset`。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::topo::{LinkProfiles, TopologyError, TopologyModel};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 链路参数预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LinkPreset {
    #[default]
    Default,
    Legacy,
}

impl LinkPreset {
    pub fn profiles(self) -> LinkProfiles {
        match self {
            LinkPreset::Default => LinkProfiles::default(),
            LinkPreset::Legacy => LinkProfiles::legacy(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub k: i64,
    #[serde(default)]
    pub link_preset: LinkPreset,
    #[serde(default)]
    pub links: Option<LinkProfiles>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            k: 4,
            link_preset: LinkPreset::Default,
            links: None,
        }
    }
}

impl ControllerConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn link_profiles(&self) -> LinkProfiles {
        self.links.unwrap_or_else(|| self.link_preset.profiles())
    }

    pub fn build_topology(&self) -> Result<TopologyModel, TopologyError> {
        TopologyModel::build_with(self.k, self.link_profiles())
    }
}
