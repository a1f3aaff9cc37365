//! Configuration Management
//!
//! Connection settings for kcadm: a JSON file under the user config dir,
//! overridden by `KEYCLOAK_*` environment variables, then by CLI flags.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/auth";
pub const DEFAULT_REALM: &str = "master";
pub const DEFAULT_CLIENT_ID: &str = "admin-cli";
pub const DEFAULT_GRANT_TYPE: &str = "password";

/// Admin account used to obtain tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_grant_type")]
    pub grant_type: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            client_id: default_client_id(),
            client_secret: None,
            grant_type: default_grant_type(),
        }
    }
}

impl Credentials {
    /// Form fields posted to the token endpoint
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("grant_type", self.grant_type.clone()),
            ("client_id", self.client_id.clone()),
        ];
        if let Some(username) = &self.username {
            fields.push(("username", username.clone()));
        }
        if let Some(password) = &self.password {
            fields.push(("password", password.clone()));
        }
        if let Some(secret) = &self.client_secret {
            fields.push(("client_secret", secret.clone()));
        }
        fields
    }
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_string()
}

fn default_grant_type() -> String {
    DEFAULT_GRANT_TYPE.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_realm() -> String {
    DEFAULT_REALM.to_string()
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Server root, including any context path such as `/auth`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Realm whose admin resources are addressed
    #[serde(default = "default_realm")]
    pub realm_name: String,
    #[serde(default)]
    pub credentials: Credentials,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            realm_name: default_realm(),
            credentials: Credentials::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kcadm").join("config.json"))
    }

    /// Log file of the CLI, next to the config file
    pub fn log_path() -> Option<PathBuf> {
        Self::config_path().map(|p| p.with_file_name("kcadm.log"))
    }

    /// Load configuration from disk, then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    fn load_file() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Apply `KEYCLOAK_*` overrides read through `var`
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = var("KEYCLOAK_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(realm) = var("KEYCLOAK_REALM") {
            self.realm_name = realm;
        }
        if let Some(username) = var("KEYCLOAK_USERNAME") {
            self.credentials.username = Some(username);
        }
        if let Some(password) = var("KEYCLOAK_PASSWORD") {
            self.credentials.password = Some(password);
        }
        if let Some(client_id) = var("KEYCLOAK_CLIENT_ID") {
            self.credentials.client_id = client_id;
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }
}
