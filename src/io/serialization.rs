// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration file serialization and deserialization.
//!
//! This module reads and writes the labeler configuration in YAML and
//! JSON formats, chosen by file extension.

use crate::config::LabelerConfig;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "labeler.yaml";

/// Load configuration from a YAML or JSON file.
pub fn load_config(path: &Path) -> Result<LabelerConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = match extension(path).as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        Some("json") => serde_json::from_str(&text)?,
        other => bail!("unsupported config extension: {:?}", other),
    };
    Ok(config)
}

/// Save configuration to a YAML or JSON file.
pub fn save_config(config: &LabelerConfig, path: &Path) -> Result<()> {
    let text = match extension(path).as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::to_string(config)?,
        Some("json") => serde_json::to_string_pretty(config)?,
        other => bail!("unsupported config extension: {:?}", other),
    };
    std::fs::write(path, text)?;
    Ok(())
}

/// Load the startup configuration.
///
/// An explicit path must exist. Without one, `labeler.yaml` in the working
/// directory is used when present, defaults otherwise.
pub fn load_or_default(explicit: Option<&Path>) -> Result<LabelerConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.exists() {
        load_config(fallback)
    } else {
        Ok(LabelerConfig::default())
    }
}

/// Startup configuration that never fails: a file that cannot be read,
/// parsed or validated is logged and replaced by the defaults.
pub fn config_or_default(explicit: Option<&Path>) -> LabelerConfig {
    let loaded = load_or_default(explicit).and_then(|config| {
        config.validate()?;
        Ok(config)
    });
    match loaded {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {:#}; using default settings", e);
            LabelerConfig::default()
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}
