use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spec_sync::SyncConfig;

/// Default config path: `~/.config/spec-sync/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spec-sync").join("config.toml"))
}

/// Load a sync config, choosing the parser by file extension.
pub fn load_config(path: Option<&Path>) -> Result<SyncConfig> {
    let path = match path {
        Some(p) => p.to_owned(),
        None => default_config_path().context("could not determine config directory")?,
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    parse_config(&contents, &path)
}

fn parse_config(contents: &str, path: &Path) -> Result<SyncConfig> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let config = match extension.as_deref() {
        Some("toml") => toml::from_str(contents)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        Some("yaml" | "yml") => serde_yaml_ng::from_str(contents)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        Some("json") => serde_json::from_str(contents)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        _ => anyhow::bail!(
            "unsupported config format for {} (expected .toml, .yaml, .yml, or .json)",
            path.display()
        ),
    };

    Ok(config)
}
