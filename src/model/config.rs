use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_RESOURCE: &str = "todos";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection path under `base_url`, without slashes.
    #[serde(default = "default_resource")]
    pub resource: String,

    /// Re-fetch the whole collection after every successful mutation
    /// instead of applying the returned record.
    #[serde(default)]
    pub reload_after_mutation: bool,

    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_resource() -> String {
    DEFAULT_RESOURCE.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resource: default_resource(),
            reload_after_mutation: false,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::read(path)?.validated()
    }

    /// Parses `path` without validating, so callers can layer overrides on
    /// top before calling [`ClientConfig::validated`].
    pub fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("parse {}: {}", path.display(), e)))
    }

    /// Normalizes slashes and rejects values no request could be built from.
    pub fn validated(mut self) -> Result<Self> {
        let base = self.base_url.trim().trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }
        let resource = self.resource.trim().trim_matches('/').to_string();
        if resource.is_empty() {
            return Err(Error::Config("resource must not be empty".to_string()));
        }
        self.base_url = base;
        self.resource = resource;
        Ok(self)
    }
}
