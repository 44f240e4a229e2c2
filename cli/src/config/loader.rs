//! Simple CLI configuration loader for studentdesk
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./studentdesk.json or ./.studentdesk/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/studentdesk/config.json
//! 4. Environment variables only (no files), falling back to built-in defaults

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use studentdesk_core::config::{ApiConfig, AppConfig, DEFAULT_APP_NAME, DEFAULT_BASE_URL};
use tracing::debug;

/// Environment variable consulted when no config file is found
pub const BASE_URL_ENV: &str = "STUDENTDESK_BASE_URL";

/// Raw configuration file format; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// Base URL of the Student API
    pub base_url: Option<String>,
    /// Extra headers, merged over the default JSON content type
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Title suffix shown after each page title
    pub app_name: Option<String>,
}

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    base_url_override: Option<String>,
    /// Directory searched for project-local config
    working_dir: Option<PathBuf>,
    /// Directory searched for user config
    config_home: Option<PathBuf>,
    /// Value of the base URL environment variable
    env_base_url: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader reading the process environment
    pub fn new() -> Self {
        Self {
            config_override: None,
            base_url_override: None,
            working_dir: std::env::current_dir().ok(),
            config_home: dirs::config_dir(),
            env_base_url: std::env::var(BASE_URL_ENV).ok(),
        }
    }

    /// Set config file/directory override; `~` and `$VARS` are expanded
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        let raw = path.to_string_lossy().to_string();
        let expanded = shellexpand::full(&raw)
            .map(|s| PathBuf::from(s.into_owned()))
            .unwrap_or(path);
        self.config_override = Some(expanded);
        self
    }

    /// Set base URL override
    pub fn with_base_url_override(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Search this directory instead of the current one
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Search this directory instead of the platform config directory
    pub fn with_config_home(mut self, dir: Option<PathBuf>) -> Self {
        self.config_home = dir;
        self
    }

    /// Replace the value read from the environment
    pub fn with_env_base_url(mut self, base_url: Option<String>) -> Self {
        self.env_base_url = base_url;
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<AppConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        if let Some(base_url) = &self.base_url_override {
            config.base_url = Some(base_url.clone());
        }

        // Step 3: Resolve to final config
        self.resolve_config(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        if let Some(config) = self.try_load_cwd().await? {
            return Ok(config);
        }

        if let Some(config) = self.try_load_xdg().await? {
            return Ok(config);
        }

        debug!("No config file found, using environment and defaults");
        Ok(RawConfig {
            base_url: self.env_base_url.clone(),
            ..RawConfig::default()
        })
    }

    /// Try loading from the working directory
    async fn try_load_cwd(&self) -> Result<Option<RawConfig>> {
        let Some(cwd) = &self.working_dir else {
            return Ok(None);
        };

        // Try ./studentdesk.json first
        let local = cwd.join("studentdesk.json");
        if local.exists() {
            return Ok(Some(self.load_file(&local).await?));
        }

        // Try ./.studentdesk/config.json
        let local_dir = cwd.join(".studentdesk").join("config.json");
        if local_dir.exists() {
            return Ok(Some(self.load_file(&local_dir).await?));
        }

        Ok(None)
    }

    /// Try loading from the user config directory
    async fn try_load_xdg(&self) -> Result<Option<RawConfig>> {
        if let Some(config_home) = &self.config_home {
            let config_path = config_home.join("studentdesk").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        debug!(path = %path.display(), "Loading config file");
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve raw config to AppConfig
    fn resolve_config(&self, config: RawConfig) -> Result<AppConfig> {
        let mut api = ApiConfig::new(
            config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        );
        api.headers.extend(config.headers);

        let resolved = AppConfig {
            api,
            app_name: config
                .app_name
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
        };

        resolved
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(resolved)
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn isolated(dir: &Path) -> CliConfigLoader {
        CliConfigLoader::new()
            .with_working_dir(dir.to_path_buf())
            .with_config_home(None)
            .with_env_base_url(None)
    }

    #[tokio::test]
    async fn test_defaults_without_any_source() {
        let temp_dir = tempdir().unwrap();
        let config = isolated(temp_dir.path()).load().await.unwrap();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.app_name, DEFAULT_APP_NAME);
        assert_eq!(
            config.api.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_env_used_when_no_file() {
        let temp_dir = tempdir().unwrap();
        let config = isolated(temp_dir.path())
            .with_env_base_url(Some("http://10.0.0.2:8000/api".to_string()))
            .load()
            .await
            .unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.2:8000/api");
    }

    #[tokio::test]
    async fn test_cwd_file_beats_env_and_merges_headers() {
        let temp_dir = tempdir().unwrap();
        let content = r#"{
            "base_url": "https://school.example/api",
            "headers": { "Accept": "application/json" },
            "app_name": "Registry"
        }"#;
        tokio::fs::write(temp_dir.path().join("studentdesk.json"), content)
            .await
            .unwrap();

        let config = isolated(temp_dir.path())
            .with_env_base_url(Some("http://ignored/api".to_string()))
            .load()
            .await
            .unwrap();

        assert_eq!(config.api.base_url, "https://school.example/api");
        assert_eq!(config.app_name, "Registry");
        assert_eq!(config.api.headers.len(), 2);
        assert!(config.api.headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn test_dot_dir_and_xdg_locations() {
        let project = tempdir().unwrap();
        let dot_dir = project.path().join(".studentdesk");
        tokio::fs::create_dir_all(&dot_dir).await.unwrap();
        tokio::fs::write(dot_dir.join("config.json"), r#"{"app_name":"Project"}"#)
            .await
            .unwrap();
        let config = isolated(project.path()).load().await.unwrap();
        assert_eq!(config.app_name, "Project");

        let empty = tempdir().unwrap();
        let home = tempdir().unwrap();
        let user_dir = home.path().join("studentdesk");
        tokio::fs::create_dir_all(&user_dir).await.unwrap();
        tokio::fs::write(user_dir.join("config.json"), r#"{"app_name":"User"}"#)
            .await
            .unwrap();
        let config = isolated(empty.path())
            .with_config_home(Some(home.path().to_path_buf()))
            .load()
            .await
            .unwrap();
        assert_eq!(config.app_name, "User");
    }

    #[tokio::test]
    async fn test_flag_beats_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("custom.json");
        tokio::fs::write(&path, r#"{"base_url":"http://file/api"}"#)
            .await
            .unwrap();

        let config = isolated(temp_dir.path())
            .with_config_override(path)
            .with_base_url_override("http://flag:9000/api".to_string())
            .load()
            .await
            .unwrap();
        assert_eq!(config.api.base_url, "http://flag:9000/api");
    }

    #[tokio::test]
    async fn test_override_directory_and_missing_path() {
        let temp_dir = tempdir().unwrap();
        tokio::fs::write(
            temp_dir.path().join("config.json"),
            r#"{"base_url":"http://dir/api"}"#,
        )
        .await
        .unwrap();

        let config = isolated(temp_dir.path())
            .with_config_override(temp_dir.path().to_path_buf())
            .load()
            .await
            .unwrap();
        assert_eq!(config.api.base_url, "http://dir/api");

        let missing = isolated(temp_dir.path())
            .with_config_override(temp_dir.path().join("nope.json"))
            .load()
            .await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn test_invalid_base_url_rejected() {
        let temp_dir = tempdir().unwrap();
        let result = isolated(temp_dir.path())
            .with_base_url_override("localhost:8000".to_string())
            .load()
            .await;
        assert!(result.is_err());
    }
}
