//! In-memory `StackContext` for unit tests.

use crate::lookup::{PrInfo, StackContext};
use std::cell::RefCell;
use std::collections::HashMap;

/// Scripted lookup context that also counts PR lookups per branch.
pub struct MockContext {
    trunk: String,
    prs: HashMap<String, PrInfo>,
    parents: HashMap<String, String>,
    pr_lookups: RefCell<HashMap<String, usize>>,
}

impl MockContext {
    pub fn new(trunk: &str) -> Self {
        MockContext {
            trunk: trunk.to_string(),
            prs: HashMap::new(),
            parents: HashMap::new(),
            pr_lookups: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_pr(mut self, branch: &str, base: &str, number: u64) -> Self {
        self.prs.insert(branch.to_string(), PrInfo { base: base.to_string(), number });
        self
    }

    pub fn with_parent(mut self, branch: &str, parent: &str) -> Self {
        self.parents.insert(branch.to_string(), parent.to_string());
        self
    }

    /// Number of `pr_info` calls made for `branch`.
    pub fn pr_lookups(&self, branch: &str) -> usize {
        self.pr_lookups.borrow().get(branch).copied().unwrap_or(0)
    }
}

impl StackContext for MockContext {
    fn trunk(&self) -> &str {
        &self.trunk
    }

    fn repo_owner(&self) -> &str {
        "acme"
    }

    fn repo_name(&self) -> &str {
        "widgets"
    }

    fn pr_info(&self, branch: &str) -> Option<PrInfo> {
        *self.pr_lookups.borrow_mut().entry(branch.to_string()).or_insert(0) += 1;
        self.prs.get(branch).cloned()
    }

    fn parent(&self, branch: &str) -> Option<String> {
        self.parents.get(branch).cloned()
    }
}
