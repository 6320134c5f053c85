//! stack-comment: dependency comments for stacked pull requests
//!
//! Reconstructs the dependency tree of a PR stack from submitted PRs plus
//! recorded ancestry, and renders it as the nested bullet list posted to
//! each PR in the stack.

pub mod cli;
pub mod config;
pub mod domain;
pub mod lookup;
pub mod render;
pub mod stack;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{BranchRef, BuildOptions, Edge, NodeId, PullRequestRef};
pub use lookup::{PrInfo, StackContext};
pub use render::StackComment;
pub use stack::StackTree;
