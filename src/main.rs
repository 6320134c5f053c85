//! stack-comment: render dependency comments for stacked pull requests
//!
//! Reads a stack description (manifest file or local git metadata) and
//! prints the review-tool comment describing how the PRs chain onto trunk.

use anyhow::Result;

fn main() -> Result<()> {
    stack_comment::cli::run()
}
