//! Git-backed lookup context.
//!
//! Reads everything from the local repository: owner and repo name from the
//! `origin` remote URL, trunk from the `stack.trunk` config key, and
//! per-branch ancestry from config keys written at submit time:
//!
//! ```text
//! branch.<name>.stack-parent   parent branch (no PR opened yet)
//! branch.<name>.pr-number      recorded PR number
//! branch.<name>.pr-base        recorded PR base branch
//! ```

use crate::lookup::{PrInfo, StackContext};
use anyhow::{Context, Result};
use git2::Repository;
use std::path::Path;

pub struct GitContext {
    config: git2::Config,
    trunk: String,
    owner: String,
    repo: String,
}

impl GitContext {
    /// Open the repository containing `path` and resolve repo identity.
    ///
    /// `default_trunk` is used when `stack.trunk` is not configured.
    pub fn open(path: &Path, default_trunk: &str) -> Result<Self> {
        let repository = Repository::discover(path)
            .with_context(|| format!("Failed to find a git repository at {}", path.display()))?;

        let remote = repository
            .find_remote("origin")
            .context("Repository has no 'origin' remote to derive owner/name from")?;
        let url = remote.url().context("The 'origin' remote URL is not valid UTF-8")?;
        let (owner, repo) = parse_remote_url(url)
            .with_context(|| format!("Cannot parse owner/repo from remote URL: {url}"))?;

        let config = repository
            .config()
            .context("Failed reading repository config")?
            .snapshot()
            .context("Failed snapshotting repository config")?;

        let trunk = config
            .get_string("stack.trunk")
            .unwrap_or_else(|_| default_trunk.to_string());

        Ok(GitContext { config, trunk, owner, repo })
    }

    /// Force the trunk name, overriding any configured `stack.trunk`.
    pub fn override_trunk(&mut self, trunk: &str) {
        self.trunk = trunk.to_string();
    }

    /// Collect the PRs recorded in config, in branch-name order.
    ///
    /// Every branch with both `pr-number` and `pr-base` set counts as a
    /// submitted PR; branches with only one of the two are skipped.
    pub fn submitted_prs(&self) -> Result<Vec<crate::domain::PullRequestRef>> {
        let mut branches = Vec::new();
        let mut entries = self
            .config
            .entries(Some(r"^branch\..*\.pr-number$"))
            .context("Failed iterating branch config entries")?;
        while let Some(entry) = entries.next() {
            let entry = entry.context("Failed reading branch config entry")?;
            let Some(name) = entry.name() else { continue };
            let branch = name
                .strip_prefix("branch.")
                .and_then(|n| n.strip_suffix(".pr-number"))
                .map(str::to_string);
            if let Some(branch) = branch {
                branches.push(branch);
            }
        }
        branches.sort();
        branches.dedup();

        let mut prs = Vec::new();
        for branch in branches {
            if let Some(info) = self.pr_info(&branch) {
                prs.push(crate::domain::PullRequestRef {
                    number: info.number,
                    base: info.base,
                    ref_: branch,
                });
            }
        }
        Ok(prs)
    }
}

impl StackContext for GitContext {
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
        let number = self.config.get_i64(&format!("branch.{branch}.pr-number")).ok()?;
        let number = u64::try_from(number).ok()?;
        let base = self.config.get_string(&format!("branch.{branch}.pr-base")).ok()?;
        Some(PrInfo { base, number })
    }

    fn parent(&self, branch: &str) -> Option<String> {
        self.config.get_string(&format!("branch.{branch}.stack-parent")).ok()
    }
}

/// Extract `(owner, repo)` from a GitHub-style remote URL.
///
/// Handles the HTTPS form (`https://github.com/owner/repo`, with or without
/// a trailing `.git` or slash) and the SSH form (`git@github.com:owner/repo`).
fn parse_remote_url(url: &str) -> Option<(String, String)> {
    let trimmed = url.trim_end_matches('/').trim_end_matches(".git");

    let path = if let Some((_, path)) = trimmed.split_once("://") {
        // https://host/owner/repo
        path.split_once('/')?.1
    } else if let Some((_, path)) = trimmed.split_once(':') {
        // git@host:owner/repo
        path
    } else {
        return None;
    };

    let (owner, repo) = path.rsplit_once('/')?;
    // Nested paths (e.g. GitLab subgroups) keep only the last two segments.
    let owner = owner.rsplit('/').next()?;
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}
