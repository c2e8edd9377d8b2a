use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub host: String,
    pub port: u16,
    pub document_root: PathBuf,
    pub index_template: String,
    pub database_path: String,
    pub page_table: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            document_root: PathBuf::from("templates"),
            index_template: "index.tpl".to_string(),
            database_path: "site.db".to_string(),
            page_table: "page".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file; keys absent from the file keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full path to the page template under the document root.
    pub fn template_path(&self) -> PathBuf {
        self.document_root.join(&self.index_template)
    }

    pub fn set_document_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.document_root = root.as_ref().to_path_buf();
        self
    }

    pub fn set_database_path(mut self, path: impl Into<String>) -> Self {
        self.database_path = path.into();
        self
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file does not exist or could not be read.
    #[error("config file not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
