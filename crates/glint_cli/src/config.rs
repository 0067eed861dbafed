//! Glint configuration file handling

use anyhow::{Context, Result};
use glint_tokens::{Assembler, SectionLayout, Stripper};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name looked up in the working directory.
pub const CONFIG_FILE: &str = "glint.toml";

/// Top-level Glint configuration (glint.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GlintConfig {
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub sections: SectionLayout,
    #[serde(default)]
    pub strip: Stripper,
}

/// Where the raw token export lives
#[derive(Debug, Deserialize, Serialize)]
pub struct DocumentConfig {
    /// Token export path (relative to the config file)
    #[serde(default = "default_document")]
    pub path: String,
}

fn default_document() -> String {
    "tokens.json".to_string()
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document(),
        }
    }
}

impl GlintConfig {
    /// Load configuration from a file, or from `glint.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No config found at {}. Run `glint init` to create one.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Explicit config path, else `./glint.toml` if present, else defaults.
    ///
    /// Returns the config and the directory relative paths resolve against.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        if let Some(path) = explicit {
            let base = if path.is_dir() {
                path.to_path_buf()
            } else {
                path.parent().map(Path::to_path_buf).unwrap_or_default()
            };
            return Ok((Self::load(path)?, base));
        }

        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            tracing::debug!("using {}", local.display());
            return Ok((Self::load(local)?, PathBuf::new()));
        }

        tracing::debug!("no {} found, using defaults", CONFIG_FILE);
        Ok((Self::default(), PathBuf::new()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid glint configuration")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Token export path resolved against `base`
    pub fn document_path(&self, base: &Path) -> PathBuf {
        base.join(&self.document.path)
    }

    pub fn assembler(&self) -> Assembler {
        Assembler::new(self.sections.clone(), self.strip.clone())
    }
}
