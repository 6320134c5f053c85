//! Comment rendering.
//!
//! Pre-order walk of the stack tree from trunk, two spaces of indent per
//! level, one bullet line per node. The full comment is built once at
//! construction and cached; per-PR variants only splice in the marker.

use crate::domain::{BranchRef, BuildOptions, Edge, PullRequestRef};
use crate::lookup::StackContext;
use crate::stack::StackTree;
use std::fmt;

/// Glyph spliced in after a PR's line to say "this comment is about you".
const MARKER: &str = " 👈";

const HEADER: &str = "Current dependencies on/for this PR:\n\n";

/// A rendered stack comment, immutable once generated.
pub struct StackComment {
    comment: String,
}

impl StackComment {
    /// Build the tree for `prs`, complete routes to trunk, and render.
    pub fn generate<C: StackContext>(
        ctx: &C,
        prs: &[PullRequestRef],
        options: BuildOptions,
    ) -> Self {
        let tree = StackTree::build(ctx, prs, options);

        let mut comment = String::from(HEADER);
        render_node(ctx, &tree, None, 0, &mut comment);
        StackComment { comment }
    }

    /// The comment with the marker spliced in after `pr`'s line token.
    ///
    /// When the PR is not part of the resolved tree the token is absent;
    /// the upstream tool slices at `indexOf(...) == -1` plus the token
    /// length regardless, landing the marker `token.len() - 1` bytes into
    /// the header. Kept bit-for-bit for comment compatibility.
    pub fn for_pr(&self, pr: &PullRequestRef) -> String {
        let token = pr_string(pr.number);
        let split = match self.comment.find(&token) {
            Some(index) => index + token.len(),
            None => token.len() - 1,
        };

        let mut out = String::with_capacity(self.comment.len() + MARKER.len());
        out.push_str(&self.comment[..split]);
        out.push_str(MARKER);
        out.push_str(&self.comment[split..]);
        out
    }
}

impl fmt::Display for StackComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.comment)
    }
}

/// Render `entry`'s line and, below it, its children in stored order.
/// `None` renders the trunk root line.
fn render_node<C: StackContext>(
    ctx: &C,
    tree: &StackTree,
    entry: Option<&Edge>,
    level: usize,
    out: &mut String,
) {
    for _ in 0..level {
        out.push_str("  ");
    }
    out.push_str("* ");

    let node = match entry {
        None => {
            out.push_str(tree.trunk());
            out.push_str(":\n");
            tree.trunk()
        }
        Some(Edge::Pr(pr)) => {
            out.push_str(&pr_string(pr.number));
            out.push('\n');
            &pr.ref_
        }
        Some(Edge::Branch(branch)) => {
            out.push_str(&branch_ref_string(ctx, branch));
            out.push('\n');
            &branch.ref_
        }
    };

    for child in tree.children(node) {
        render_node(ctx, tree, Some(child), level + 1, out);
    }
}

fn pr_string(number: u64) -> String {
    format!("**PR #{number}**")
}

fn branch_ref_string<C: StackContext>(ctx: &C, branch: &BranchRef) -> String {
    let owner = ctx.repo_owner();
    let repo = ctx.repo_name();
    format!(
        "Branch _{ref_}_ - [Create Pull Request](https://github.com/{owner}/{repo}/compare/{base}...{ref_})",
        base = branch.base,
        ref_ = branch.ref_,
    )
}
