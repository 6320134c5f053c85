//! Manifest-backed lookup context.
//!
//! A manifest is a JSON or TOML file carrying everything a run needs:
//! repo identity, trunk name, the PRs being submitted, and lookup tables
//! for branches that are part of the stack but not part of the submission.

use crate::domain::PullRequestRef;
use crate::lookup::{PrInfo, StackContext};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed reading manifest {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON manifest {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML manifest {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported manifest extension '.{extension}' for {path} (expected .json or .toml)")]
    UnsupportedExtension { extension: String, path: String },
}

/// PR metadata entry in the `known_prs` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestPrInfo {
    pub base: String,
    pub number: u64,
}

/// Deserialized manifest contents.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestContext {
    #[serde(default = "default_trunk")]
    pub trunk: String,
    pub owner: String,
    pub repo: String,

    /// PRs being submitted, in stack order.
    #[serde(default)]
    pub prs: Vec<PullRequestRef>,

    /// Branch → recorded PR, for branches outside the submitted list.
    #[serde(default)]
    pub known_prs: BTreeMap<String, ManifestPrInfo>,

    /// Branch → parent branch, for branches with no PR at all.
    #[serde(default)]
    pub parents: BTreeMap<String, String>,
}

fn default_trunk() -> String {
    "main".to_string()
}

/// Load a manifest, dispatching on the file extension.
pub fn load_manifest(path: &Path) -> Result<ManifestContext, ManifestError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path)
        .map_err(|source| ManifestError::Read { path: display.clone(), source })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "json" => serde_json::from_str(&content)
            .map_err(|source| ManifestError::Json { path: display, source }),
        "toml" => {
            toml::from_str(&content).map_err(|source| ManifestError::Toml { path: display, source })
        }
        other => {
            Err(ManifestError::UnsupportedExtension { extension: other.to_string(), path: display })
        }
    }
}

impl StackContext for ManifestContext {
    fn trunk(&self) -> &str {
        &self.trunk
    }

    fn repo_owner(&self) -> &str {
        &self.owner
    }

    fn repo_name(&self) -> &str {
        &self.repo
    }

    fn pr_info(&self, branch: &str) -> Option<PrInfo> {
        self.known_prs
            .get(branch)
            .map(|info| PrInfo { base: info.base.clone(), number: info.number })
    }

    fn parent(&self, branch: &str) -> Option<String> {
        self.parents.get(branch).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_manifest() {
        let tmp = TempDir::new().expect("tmp dir");
        let path = tmp.path().join("stack.json");
        fs::write(
            &path,
            r#"{
                "owner": "acme",
                "repo": "widgets",
                "prs": [{"number": 1, "base": "main", "ref": "f1"}],
                "known_prs": {"f2": {"base": "f1", "number": 2}},
                "parents": {"wip": "f2"}
            }"#,
        )
        .expect("write manifest");

        let manifest = load_manifest(&path).expect("load");
        assert_eq!(manifest.trunk, "main");
        assert_eq!(manifest.prs.len(), 1);
        assert_eq!(manifest.pr_info("f2"), Some(PrInfo { base: "f1".to_string(), number: 2 }));
        assert_eq!(manifest.parent("wip"), Some("f2".to_string()));
        assert_eq!(manifest.pr_info("unknown"), None);
    }

    #[test]
    fn test_load_toml_manifest() {
        let tmp = TempDir::new().expect("tmp dir");
        let path = tmp.path().join("stack.toml");
        fs::write(
            &path,
            r#"
                trunk = "develop"
                owner = "acme"
                repo = "widgets"

                [[prs]]
                number = 3
                base = "develop"
                ref = "f3"

                [parents]
                wip = "f3"
            "#,
        )
        .expect("write manifest");

        let manifest = load_manifest(&path).expect("load");
        assert_eq!(manifest.trunk(), "develop");
        assert_eq!(manifest.prs[0].ref_, "f3");
        assert_eq!(manifest.parent("wip"), Some("f3".to_string()));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let tmp = TempDir::new().expect("tmp dir");
        let path = tmp.path().join("stack.yaml");
        fs::write(&path, "owner: acme").expect("write manifest");

        let err = load_manifest(&path).expect_err("should reject");
        assert!(matches!(err, ManifestError::UnsupportedExtension { .. }));
    }
}
