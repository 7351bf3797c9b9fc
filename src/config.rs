use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::constants;

/// Environment variable consulted for the catalog credential.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// User preferences persisted in `prefs.toml`.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct Config {
  pub theme_name: Option<String>,
  pub api_key: Option<String>,
}

fn project_dirs() -> Option<ProjectDirs> {
  ProjectDirs::from("", "", &constants().app_name)
}

impl Config {
  pub fn load() -> Self {
    if let Some(proj_dirs) = project_dirs() {
      let config_file = proj_dirs.config_dir().join("prefs.toml");
      if let Ok(content) = std::fs::read_to_string(config_file)
        && let Ok(config) = toml::from_str(&content)
      {
        return config;
      }
    }
    Self::default()
  }

  pub fn save(&self) {
    if let Some(proj_dirs) = project_dirs() {
      let config_dir = proj_dirs.config_dir();
      if std::fs::create_dir_all(config_dir).is_ok() {
        let config_file = config_dir.join("prefs.toml");
        if let Ok(content) = toml::to_string(self) {
          let _ = std::fs::write(config_file, content);
        }
      }
    }
  }
}

/// Directory for persisted session state and log files.
pub fn data_dir() -> PathBuf {
  project_dirs().map(|d| d.data_dir().to_path_buf()).unwrap_or_else(|| PathBuf::from("."))
}

/// Default location of the persisted state file.
pub fn default_state_path() -> PathBuf {
  data_dir().join(&constants().state_file)
}

/// Immutable catalog settings handed to `CatalogClient::new`.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
  pub api_key: String,
  pub base_url: String,
  pub image_base_url: String,
}

impl CatalogConfig {
  pub fn new(api_key: String) -> Self {
    let c = constants();
    Self { api_key, base_url: c.api_base_url.clone(), image_base_url: c.image_base_url.clone() }
  }
}

/// Pick the API key: CLI flag, then environment, then `prefs.toml`.
/// Blank values are skipped.
pub fn resolve_api_key(cli: Option<&str>, env: Option<&str>, prefs: Option<&str>) -> Result<String> {
  [cli, env, prefs]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|k| !k.is_empty())
    .map(str::to_string)
    .ok_or_else(|| {
      anyhow!("No TMDB API key configured. Pass --api-key, set {}, or add `api_key` to prefs.toml", API_KEY_ENV)
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn api_key_cli_wins() {
    assert_eq!(resolve_api_key(Some("cli"), Some("env"), Some("file")).unwrap(), "cli");
  }

  #[test]
  fn api_key_falls_through_blank_values() {
    assert_eq!(resolve_api_key(Some("  "), None, Some("file")).unwrap(), "file");
    assert_eq!(resolve_api_key(None, Some(" env "), None).unwrap(), "env");
  }

  #[test]
  fn api_key_missing_is_an_error() {
    let err = resolve_api_key(None, Some(""), None).unwrap_err();
    assert!(err.to_string().contains(API_KEY_ENV));
  }

  #[test]
  fn prefs_parse_partial_toml() {
    let config: Config = toml::from_str("theme_name = \"Dusk\"").unwrap();
    assert_eq!(config.theme_name.as_deref(), Some("Dusk"));
    assert!(config.api_key.is_none());
  }

  #[test]
  fn catalog_config_uses_embedded_urls() {
    let cfg = CatalogConfig::new("k".to_string());
    assert_eq!(cfg.base_url, constants().api_base_url);
    assert_eq!(cfg.api_key, "k");
  }
}
