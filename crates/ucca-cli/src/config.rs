//! Optional `ucca.toml` settings.
//!
//! Precedence: explicit CLI flags, then the config file, then built-in
//! defaults. A missing default config file is fine; a missing file named
//! with `--config` is an error.

use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "ucca.toml";
pub const DEFAULT_AUTHORITY_PATH: &str = "authority.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default authority document path.
    pub authority: Option<String>,
    pub format: OutputFormat,
    /// Default row selection for `enumerate`; empty means all rows.
    pub rows: Vec<String>,
    /// Default emission cap for `enumerate`.
    pub limit: Option<usize>,
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, String> {
        toml::from_str(input).map_err(|e| format!("invalid config: {e}"))
    }

    pub fn load(explicit: Option<&str>) -> Result<Self, String> {
        let (path, required) = match explicit {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };
        let path = Path::new(path);
        if !path.exists() {
            if required {
                return Err(format!("config file not found: {}", path.display()));
            }
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let settings = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    pub fn authority_path(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.authority.clone())
            .unwrap_or_else(|| DEFAULT_AUTHORITY_PATH.to_string())
    }

    pub fn json(&self, flag: bool) -> bool {
        flag || self.format == OutputFormat::Json
    }

    pub fn rows(&self, flag: Vec<String>) -> Vec<String> {
        if flag.is_empty() {
            self.rows.clone()
        } else {
            flag
        }
    }

    pub fn limit(&self, flag: Option<usize>) -> Option<usize> {
        flag.or(self.limit)
    }
}
