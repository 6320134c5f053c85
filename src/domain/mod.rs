//! Core data model for PR stacks.

use serde::{Deserialize, Serialize};

/// Identifier of a node in the stack tree: a branch name, or the trunk name.
pub type NodeId = String;

/// A branch with an open pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub number: u64,
    /// Node id of the parent branch.
    pub base: NodeId,
    /// Node id of this branch.
    #[serde(rename = "ref")]
    pub ref_: NodeId,
}

/// A branch known only by ancestry; no PR has been opened for it yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    pub base: NodeId,
    #[serde(rename = "ref")]
    pub ref_: NodeId,
}

/// An entry in a node's child list.
///
/// Tagged explicitly rather than branching on "has a PR number" so the
/// renderer's match stays exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edge {
    Pr(PullRequestRef),
    Branch(BranchRef),
}

impl Edge {
    pub fn base(&self) -> &str {
        match self {
            Edge::Pr(pr) => &pr.base,
            Edge::Branch(branch) => &branch.base,
        }
    }

    pub fn ref_(&self) -> &str {
        match self {
            Edge::Pr(pr) => &pr.ref_,
            Edge::Branch(branch) => &branch.ref_,
        }
    }
}

impl From<PullRequestRef> for Edge {
    fn from(pr: PullRequestRef) -> Self {
        Edge::Pr(pr)
    }
}

impl From<BranchRef> for Edge {
    fn from(branch: BranchRef) -> Self {
        Edge::Branch(branch)
    }
}

/// Options for tree construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Skip an edge whose ref already appears under the same base.
    ///
    /// Off by default: the upstream tool appends duplicates as-is, and
    /// comments produced with the default must match it byte for byte.
    pub dedupe_siblings: bool,
}
