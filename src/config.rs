//! Configuration for itemdesk

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variables that override file values
pub const ENV_TABLE_NAME: &str = "ITEMDESK_TABLE_NAME";
pub const ENV_STORE: &str = "ITEMDESK_STORE";
pub const ENV_DYNAMODB_ENDPOINT: &str = "ITEMDESK_DYNAMODB_ENDPOINT";
pub const ENV_HTTP_PORT: &str = "ITEMDESK_HTTP_PORT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// DynamoDB table holding the items
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Which store backs the handler
    #[serde(default)]
    pub store: StoreKind,

    /// Endpoint override for DynamoDB (e.g. DynamoDB Local)
    #[serde(default)]
    pub dynamodb_endpoint: Option<String>,

    /// Port for the local HTTP server
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Dynamo,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dynamo" | "dynamodb" => Ok(StoreKind::Dynamo),
            "memory" => Ok(StoreKind::Memory),
            other => Err(Error::Config(format!("unknown store kind: {}", other))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            store: StoreKind::default(),
            dynamodb_endpoint: None,
            http_port: default_http_port(),
        }
    }
}

impl Config {
    /// Load config from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(table) = lookup(ENV_TABLE_NAME).filter(|v| !v.is_empty()) {
            self.table_name = table;
        }

        if let Some(store) = lookup(ENV_STORE) {
            self.store = store.parse()?;
        }

        if let Some(endpoint) = lookup(ENV_DYNAMODB_ENDPOINT) {
            self.dynamodb_endpoint = Some(endpoint).filter(|v| !v.is_empty());
        }

        if let Some(port) = lookup(ENV_HTTP_PORT) {
            self.http_port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid {}: {}", ENV_HTTP_PORT, port)))?;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.table_name.trim().is_empty() {
            return Err(Error::Config("table_name must not be empty".into()));
        }
        Ok(())
    }
}

// Default value functions

fn default_table_name() -> String {
    "api-workshop-items".to_string()
}

fn default_http_port() -> u16 {
    3939
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.table_name, "api-workshop-items");
        assert_eq!(config.store, StoreKind::Dynamo);
        assert_eq!(config.dynamodb_endpoint, None);
        assert_eq!(config.http_port, 3939);
    }

    #[test]
    fn test_from_file_fills_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("itemdesk.toml");
        std::fs::write(&path, "table_name = \"shop\"\nstore = \"memory\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.table_name, "shop");
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.http_port, 3939);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "table_name = ").unwrap();

        assert!(matches!(Config::from_file(&path), Err(Error::Toml(_))));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .with_overrides(lookup(&[
                (ENV_TABLE_NAME, "items-dev"),
                (ENV_STORE, "Memory"),
                (ENV_DYNAMODB_ENDPOINT, "http://localhost:8000"),
                (ENV_HTTP_PORT, "8080"),
            ]))
            .unwrap();

        assert_eq!(config.table_name, "items-dev");
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.dynamodb_endpoint.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.http_port, 8080);
    }

    #[test]
    fn test_invalid_overrides() {
        let bad_port = Config::default().with_overrides(lookup(&[(ENV_HTTP_PORT, "http")]));
        assert!(matches!(bad_port, Err(Error::Config(_))));

        let bad_store = Config::default().with_overrides(lookup(&[(ENV_STORE, "redis")]));
        assert!(matches!(bad_store, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_table_name_in_file_is_rejected() {
        let config = Config {
            table_name: "  ".into(),
            ..Config::default()
        };
        assert!(config.with_overrides(|_| None).is_err());
    }
}
