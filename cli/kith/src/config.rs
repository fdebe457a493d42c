//! `kith.toml` project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name searched for by [`KithConfig::find_and_load`].
pub const CONFIG_FILE: &str = "kith.toml";

/// Top-level project configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KithConfig {
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Encoder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Indent encoded output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

/// Project-relative file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_roster")]
    pub roster: String,
    /// Encoded output file. Unset means stdout.
    #[serde(default)]
    pub output: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
            output: None,
        }
    }
}

fn default_roster() -> String {
    "roster.toml".to_string()
}

impl KithConfig {
    /// Search upward from `start_dir` for a `kith.toml`, parse it and return
    /// it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config: KithConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                log::debug!("loaded {}", candidate.display());
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing kith.toml")
    }

    /// Roster location resolved against the project directory.
    pub fn roster_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.paths.roster)
    }

    /// Output location resolved against the project directory, if configured.
    pub fn output_path(&self, project_dir: &Path) -> Option<PathBuf> {
        self.paths.output.as_ref().map(|p| project_dir.join(p))
    }

    /// Default `kith.toml` written by `kith init`.
    pub fn template() -> String {
        r#"[codec]
pretty = true

[paths]
roster = "roster.toml"
output = "person_data.json"
"#
        .to_string()
    }
}
