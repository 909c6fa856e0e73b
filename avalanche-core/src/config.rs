//! Configuration file support
//!
//! Loads assessment defaults from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.avalancherc.json` in the working directory
//! 3. `avalanche.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::scale::UNRATED_DESCRIPTION;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base score applied when neither config nor CLI supplies one
pub const DEFAULT_BASE: i32 = 5;

/// Inclusive bounds for a configured base score
const BASE_RANGE: std::ops::RangeInclusive<i32> = 0..=5;

/// Output format preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatPreference {
    #[default]
    Text,
    Json,
}

/// Configuration as written in a config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AvalancheConfig {
    /// Seed score merged into every assessment (default: 5)
    #[serde(default)]
    pub base: Option<i32>,

    /// Description shown for level 0, which has no scale entry
    #[serde(default)]
    pub unrated_description: Option<String>,

    /// Default output format (default: text)
    #[serde(default)]
    pub format: Option<FormatPreference>,
}

/// Configuration with defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base: i32,
    pub unrated_description: String,
    pub format: FormatPreference,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl AvalancheConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = self.base {
            check_base(base)?;
        }

        if let Some(ref text) = self.unrated_description {
            if text.trim().is_empty() {
                anyhow::bail!("unrated_description must not be empty");
            }
        }

        Ok(())
    }

    /// Resolve config into the form used by the CLI
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        Ok(ResolvedConfig {
            base: self.base.unwrap_or(DEFAULT_BASE),
            unrated_description: self
                .unrated_description
                .clone()
                .unwrap_or_else(|| UNRATED_DESCRIPTION.to_string()),
            format: self.format.unwrap_or_default(),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        AvalancheConfig::default().resolve()
    }

    /// Base score to assess with: the CLI value if given, else the config's
    ///
    /// A CLI value is held to the same range as a configured one.
    pub fn base_or(&self, cli_base: Option<i32>) -> Result<i32> {
        match cli_base {
            Some(base) => check_base(base).context("invalid --base"),
            None => Ok(self.base),
        }
    }
}

/// Check a base score against the accepted range
pub fn check_base(base: i32) -> Result<i32> {
    if !BASE_RANGE.contains(&base) {
        anyhow::bail!(
            "base must be between {} and {} (got {})",
            BASE_RANGE.start(),
            BASE_RANGE.end(),
            base
        );
    }
    Ok(base)
}

/// Discover and load a config file from a directory
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(AvalancheConfig, PathBuf)>> {
    for name in [".avalancherc.json", "avalanche.config.json"] {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<AvalancheConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: AvalancheConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => {
                log::debug!("no config file in {}, using defaults", dir.display());
                (AvalancheConfig::default(), None)
            }
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
