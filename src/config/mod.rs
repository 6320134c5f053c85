//! Run configuration.
//!
//! Looks for a small TOML file next to the working directory; CLI flags
//! override anything found there. A `[stack-comment]` section nested in a
//! larger file is supported so the config can live inside an existing
//! tool config.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Trunk branch name used when the lookup backend does not define one.
    pub trunk: String,

    /// Skip sibling edges whose ref is already present under the same base.
    pub dedupe_siblings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config { trunk: "main".to_string(), dedupe_siblings: false }
    }
}

/// Load config from `config_path`, or discover one in `dir`.
///
/// An explicitly provided path that fails to parse is an error; a
/// discovered file that fails to parse logs a warning and falls back to
/// defaults.
pub fn load_config(dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    match parse_toml_config(&content, &config_file) {
        Ok(config) => Ok(config),
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Parse TOML config, supporting a nested [stack-comment] section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = if let Some(nested) = raw.get("stack-comment") {
        nested.clone()
    } else {
        raw
    };

    config_val
        .try_into()
        .with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

fn discover_config(dir: &Path) -> Option<PathBuf> {
    let candidates = ["stack-comment.toml", ".stack-comment.toml"];

    for candidate in candidates {
        let path = dir.join(candidate);
        if path.exists() {
            return Some(path);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_no_config_present() {
        let tmp = TempDir::new().expect("tmp dir");
        let config = load_config(tmp.path(), None).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.trunk, "main");
        assert!(!config.dedupe_siblings);
    }

    #[test]
    fn test_discovers_config_file() {
        let tmp = TempDir::new().expect("tmp dir");
        fs::write(tmp.path().join("stack-comment.toml"), "trunk = \"develop\"\n")
            .expect("write config");

        let config = load_config(tmp.path(), None).expect("load");
        assert_eq!(config.trunk, "develop");
    }

    #[test]
    fn test_nested_section_is_unwrapped() {
        let tmp = TempDir::new().expect("tmp dir");
        let path = tmp.path().join("tool.toml");
        fs::write(&path, "[stack-comment]\ntrunk = \"develop\"\ndedupe_siblings = true\n")
            .expect("write config");

        let config = load_config(tmp.path(), Some(&path)).expect("load");
        assert_eq!(config.trunk, "develop");
        assert!(config.dedupe_siblings);
    }

    #[test]
    fn test_explicit_path_errors_loudly_on_bad_toml() {
        let tmp = TempDir::new().expect("tmp dir");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "trunk = [not valid").expect("write config");

        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_discovered_bad_toml_falls_back_to_defaults() {
        let tmp = TempDir::new().expect("tmp dir");
        fs::write(tmp.path().join("stack-comment.toml"), "trunk = [not valid")
            .expect("write config");

        let config = load_config(tmp.path(), None).expect("load");
        assert_eq!(config, Config::default());
    }
}
