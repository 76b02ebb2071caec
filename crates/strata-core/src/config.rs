use std::path::Path;

use serde::{Deserialize, Serialize};
use strata_util::errors::{StrataError, StrataResult};

/// Settings for extracting resolved local components, usually read from
/// the `[resolution]` table of a build's config TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// When `false`, consumed project configurations are still recorded for
    /// build ordering, but their build actions are not collected. This backs
    /// a "don't rebuild project dependencies" build mode.
    #[serde(
        default = "default_build_project_dependencies",
        rename = "build-project-dependencies"
    )]
    pub build_project_dependencies: bool,

    /// `tracing` filter used when the host has not set `RUST_LOG`.
    #[serde(default = "default_log_filter", rename = "log-filter")]
    pub log_filter: String,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            build_project_dependencies: default_build_project_dependencies(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_build_project_dependencies() -> bool {
    true
}

fn default_log_filter() -> String {
    "warn".to_string()
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    resolution: ResolutionConfig,
}

impl ResolutionConfig {
    /// Parse a config document. Missing keys, or a missing `[resolution]`
    /// table, fall back to defaults.
    pub fn parse_toml(content: &str) -> Result<Self, StrataError> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| StrataError::Config {
            message: format!("Failed to parse resolution config: {e}"),
        })?;
        Ok(file.resolution)
    }

    /// Load the configuration from `path`, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> StrataResult<Self> {
        if !path.is_file() {
            tracing::debug!("No resolution config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(StrataError::from)?;
        Ok(Self::parse_toml(&content)?)
    }

    /// Install the global `tracing` subscriber using `log_filter` as the default.
    pub fn init_logging(&self) {
        strata_util::logging::init_logging(&self.log_filter);
    }
}
