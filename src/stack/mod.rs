//! Stack tree construction.
//!
//! Builds the dependency tree for a set of PRs: a forward map from each
//! node to its ordered children, and a reverse map from each node to its
//! parent. The reverse map doubles as the visited set for route
//! completion, so ancestry shared by several stacks is looked up once.

use crate::domain::{BranchRef, BuildOptions, Edge, NodeId, PullRequestRef};
use crate::lookup::StackContext;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Completed dependency tree rooted at trunk.
///
/// Child lists keep insertion order; that order is the rendering order.
/// Keys are tracked in their own insertion-ordered list so the completion
/// pass is deterministic regardless of map iteration order.
pub struct StackTree {
    trunk: NodeId,
    children: HashMap<NodeId, Vec<Edge>>,
    order: Vec<NodeId>,
    reverse: HashMap<NodeId, NodeId>,
    options: BuildOptions,
}

impl StackTree {
    /// Build the tree for `prs` and complete every route to trunk.
    pub fn build<C: StackContext>(ctx: &C, prs: &[PullRequestRef], options: BuildOptions) -> Self {
        let mut tree = StackTree {
            trunk: ctx.trunk().to_string(),
            children: HashMap::new(),
            order: Vec::new(),
            reverse: HashMap::new(),
            options,
        };
        tree.ensure_node(ctx.trunk());

        for pr in prs {
            tree.add_edge(Edge::Pr(pr.clone()));
        }
        tree.complete_routes(ctx);
        tree
    }

    pub fn trunk(&self) -> &str {
        &self.trunk
    }

    /// Ordered children of `node`. Empty for leaves and unknown nodes.
    pub fn children(&self, node: &str) -> &[Edge] {
        self.children.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `node` has a recorded parent (i.e. is connected upward).
    pub fn has_parent(&self, node: &str) -> bool {
        self.reverse.contains_key(node)
    }

    /// Insert `entry` under its base and record the reverse link.
    ///
    /// Duplicate refs under the same base are appended as-is unless
    /// `dedupe_siblings` is set; even when the append is skipped, the
    /// ref's node entry and reverse link are still recorded.
    fn add_edge(&mut self, entry: Edge) {
        let base = entry.base().to_string();
        let ref_ = entry.ref_().to_string();

        if !self.children.contains_key(&base) {
            self.order.push(base.clone());
        }
        let siblings = self.children.entry(base.clone()).or_default();
        let duplicate = self.options.dedupe_siblings && siblings.iter().any(|e| e.ref_() == ref_);
        if !duplicate {
            siblings.push(entry);
        }

        self.ensure_node(&ref_);
        self.reverse.insert(ref_, base);
    }

    /// Ensure `node` has a child list, registering it in insertion order.
    fn ensure_node(&mut self, node: &str) {
        if !self.children.contains_key(node) {
            self.order.push(node.to_string());
            self.children.insert(node.to_string(), Vec::new());
        }
    }

    /// Connect every known node to trunk, querying the context for
    /// ancestry the PR list did not supply.
    ///
    /// Worklist form of the upward walk: each node either terminates at
    /// trunk, continues through an already-known parent, or synthesizes a
    /// new edge from a lookup and continues through it. Continuations go
    /// to the front of the queue so a node's whole chain is resolved
    /// before the next key is taken up; sibling order under a shared
    /// ancestor therefore follows key order, not chain length. A node
    /// with no recorded parent and no lookup hits stays a dead end below
    /// trunk; that is not an error, the rendered tree simply stops there.
    fn complete_routes<C: StackContext>(&mut self, ctx: &C) {
        let mut worklist: VecDeque<NodeId> = self.order.iter().cloned().collect();
        let mut walked: HashSet<NodeId> = HashSet::new();

        while let Some(node) = worklist.pop_front() {
            if node == self.trunk {
                continue;
            }

            // A node's upward link is settled the first time it is walked;
            // later visits (shared ancestors, cyclic input) add nothing.
            if !walked.insert(node.clone()) {
                continue;
            }

            // Already connected upward: keep walking so ancestors that do
            // not yet reach trunk get resolved too.
            if let Some(parent) = self.reverse.get(&node) {
                worklist.push_front(parent.clone());
                continue;
            }

            if let Some(info) = ctx.pr_info(&node) {
                debug!(branch = %node, base = %info.base, number = info.number, "resolved PR ancestry");
                self.add_edge(Edge::Pr(PullRequestRef {
                    number: info.number,
                    base: info.base.clone(),
                    ref_: node,
                }));
                worklist.push_front(info.base);
                continue;
            }

            if let Some(parent) = ctx.parent(&node) {
                debug!(branch = %node, parent = %parent, "resolved branch ancestry");
                self.add_edge(Edge::Branch(BranchRef { base: parent.clone(), ref_: node }));
                worklist.push_front(parent);
                continue;
            }

            debug!(branch = %node, "no ancestry known; leaving dead end");
        }
    }
}
