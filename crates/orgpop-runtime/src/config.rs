use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("~/org")]
}

fn default_extension() -> String {
    "org".to_string()
}

fn default_archive_suffix() -> String {
    "_archive.org".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directories scanned for outline files, in order.
    #[serde(default = "default_roots")]
    pub roots: Vec<PathBuf>,

    /// File extension selected by the directory listing fallback.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Filename suffix marking a file as archived and excluded from scans.
    #[serde(default = "default_archive_suffix")]
    pub archive_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            extension: default_extension(),
            archive_suffix: default_archive_suffix(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing. Parse errors and other IO failures propagate.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("orgpop")
            .join("config.toml")
    }

    /// Configured roots with `~` expanded, in configuration order.
    pub fn resolved_roots(&self) -> Vec<PathBuf> {
        self.roots
            .iter()
            .map(|root| expand_tilde(&root.to_string_lossy()))
            .collect()
    }
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
