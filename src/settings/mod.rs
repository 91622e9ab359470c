//! Settings module for foxyrules
//!
//! Settings come from an optional TOML file. Every key has a default, so an
//! empty or absent file yields a usable configuration; command line flags
//! are applied on top by the runner.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ProxyEndpoint, DEFAULT_PROXY_HOST, DEFAULT_PROXY_PORT};
use crate::rules::OrderingPolicy;
use crate::sources::GFWLIST_URL;
use crate::utils::file_exists;

pub const DEFAULT_SETTINGS_FILE: &str = "foxyrules.toml";

fn default_gfwlist_url() -> String {
    GFWLIST_URL.to_string()
}

fn default_system() -> String {
    "SYSTEM".to_string()
}

fn default_config_path() -> PathBuf {
    PathBuf::from("FoxyProxy.json")
}

fn default_rule_file() -> PathBuf {
    PathBuf::from("new_list.txt")
}

fn default_proxy_host() -> String {
    DEFAULT_PROXY_HOST.to_string()
}

fn default_proxy_port() -> u16 {
    DEFAULT_PROXY_PORT
}

fn default_reserved_titles() -> Vec<String> {
    vec!["x.com".to_string()]
}

fn default_true() -> bool {
    true
}

/// Remote filter list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub gfwlist_url: String,
    /// `SYSTEM`, `NONE` or a proxy URL used for the fetch
    pub proxy: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings {
            gfwlist_url: default_gfwlist_url(),
            proxy: default_system(),
        }
    }
}

/// Local files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub config_path: PathBuf,
    pub rule_file: PathBuf,
}

impl Default for FileSettings {
    fn default() -> Self {
        FileSettings {
            config_path: default_config_path(),
            rule_file: default_rule_file(),
        }
    }
}

/// Endpoint of the generated `auto` proxy entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    #[serde(default = "default_proxy_host")]
    pub hostname: String,
    #[serde(default = "default_proxy_port")]
    pub port: u16,
}

impl Default for ProxySettings {
    fn default() -> Self {
        ProxySettings {
            hostname: default_proxy_host(),
            port: default_proxy_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Titles moved to the end of the include list
    #[serde(default = "default_reserved_titles")]
    pub reserved_titles: Vec<String>,
}

impl Default for OrderingSettings {
    fn default() -> Self {
        OrderingSettings {
            enabled: true,
            reserved_titles: default_reserved_titles(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub files: FileSettings,
    pub proxy: ProxySettings,
    pub ordering: OrderingSettings,
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AppError::Settings(e.to_string()))
    }

    /// Loads settings from `path`.
    ///
    /// When no path is given the default file is read if present. An
    /// explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_SETTINGS_FILE), false),
        };

        if !file_exists(path) {
            if required {
                return Err(AppError::Settings(format!(
                    "settings file '{}' not found",
                    path.display()
                )));
            }
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml(&content)?;
        info!("Loaded settings from '{}'", path.display());
        Ok(settings)
    }

    pub fn endpoint(&self) -> ProxyEndpoint {
        ProxyEndpoint {
            hostname: self.proxy.hostname.clone(),
            port: self.proxy.port,
        }
    }

    pub fn ordering_policy(&self) -> Option<OrderingPolicy> {
        if !self.ordering.enabled || self.ordering.reserved_titles.is_empty() {
            return None;
        }
        Some(OrderingPolicy::titles_last(
            self.ordering.reserved_titles.iter().cloned(),
        ))
    }
}
