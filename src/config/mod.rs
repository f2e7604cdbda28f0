//
//  exonet-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Persistent settings for the `exonet` command-line tool, stored as TOML in
//! the platform configuration directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/exonet/config.toml`
//! - **macOS**: `~/Library/Application Support/exonet/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\exonet\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! token = "eyJ0eXAiOiJKV1Qi..."
//! environment = "test"
//! page_size = 25
//! ```
//!
//! ## Precedence
//!
//! Command-line flags win over environment variables (`EXONET_TOKEN`,
//! `EXONET_ENVIRONMENT`), which win over the file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use exonet_api::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("environment", "test")?;
//! config.save()?;
//!
//! assert_eq!(config.get("environment").as_deref(), Some("test"));
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::{ClientBuilder, Environment};
use crate::auth::PersonalAccessToken;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: [&str; 4] = ["token", "environment", "api_url", "page_size"];

/// Persistent CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Personal access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// API environment
    #[serde(default)]
    pub environment: Environment,

    /// Base URL override, mainly for testing against a local server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Default `page[size]` for list commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl Config {
    /// Loads the configuration from the default location, or returns the
    /// defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, or returns the defaults when it
    /// does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// The default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Reads a setting by key. The token is masked.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "token" => self
                .token
                .as_ref()
                .map(|token| PersonalAccessToken::new(token.as_str()).masked()),
            "environment" => Some(self.environment.to_string()),
            "api_url" => self.api_url.clone(),
            "page_size" => self.page_size.map(|size| size.to_string()),
            _ => None,
        }
    }

    /// Changes a setting by key.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "token" => self.token = Some(value.to_string()),
            "environment" => self.environment = value.parse()?,
            "api_url" => self.api_url = Some(value.to_string()),
            "page_size" => {
                let size: u32 = value
                    .parse()
                    .with_context(|| format!("Invalid page size '{}'", value))?;
                self.page_size = Some(size.max(1));
            }
            _ => anyhow::bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Removes a setting, restoring its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "token" => self.token = None,
            "environment" => self.environment = Environment::default(),
            "api_url" => self.api_url = None,
            "page_size" => self.page_size = None,
            _ => anyhow::bail!("Unknown configuration key '{}'", key),
        }
        Ok(())
    }

    /// A client builder preloaded with these settings.
    pub fn client_builder(&self) -> ClientBuilder {
        let mut builder = crate::Client::builder().environment(self.environment);
        if let Some(token) = &self.token {
            builder = builder.token(PersonalAccessToken::new(token.as_str()));
        }
        if let Some(api_url) = &self.api_url {
            builder = builder.api_url(api_url.as_str());
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("token", "secret-token").unwrap();
        config.set("environment", "test").unwrap();
        config.set("page_size", "25").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("token").as_deref(), Some("****oken"));
        assert_eq!(loaded.get("page_size").as_deref(), Some("25"));
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("editor", "vim").is_err());
        assert!(config.set("environment", "staging").is_err());
        assert!(config.set("page_size", "many").is_err());
    }

    #[test]
    fn test_unset_restores_default() {
        let mut config = Config::default();
        config.set("environment", "test").unwrap();
        config.unset("environment").unwrap();
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_client_builder_uses_settings() {
        let mut config = Config::default();
        config.set("api_url", "http://localhost:9000").unwrap();
        let client = config.client_builder().build().unwrap();
        assert_eq!(client.api_url(), "http://localhost:9000/");
        assert!(client.auth().is_err());
    }
}
