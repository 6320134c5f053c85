//! Lookup context for resolving stack ancestry.
//!
//! Tree construction never talks to a specific backend directly; everything
//! it needs (trunk name, repo identity, per-branch ancestry) goes through
//! the [`StackContext`] trait.

pub mod git;
pub mod manifest;

pub use git::GitContext;
pub use manifest::{load_manifest, ManifestContext};

/// PR metadata recorded for a branch: its base and PR number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrInfo {
    pub base: String,
    pub number: u64,
}

/// Read-only view of the data needed to build a stack comment.
///
/// Implementations are expected to answer from already-resolved, in-memory
/// data; the builder calls these synchronously and repeatedly. A `None`
/// from either lookup means "no further ancestry known" and is never an
/// error.
pub trait StackContext {
    /// The designated root branch all stacks descend from.
    fn trunk(&self) -> &str;

    fn repo_owner(&self) -> &str;

    fn repo_name(&self) -> &str;

    /// PR recorded for `branch`, if one exists.
    fn pr_info(&self, branch: &str) -> Option<PrInfo>;

    /// Generic parent of `branch` when no PR exists for it.
    fn parent(&self, branch: &str) -> Option<String>;
}
