//! The `render` subcommand.

use crate::config::load_config;
use crate::domain::BuildOptions;
use crate::lookup::{load_manifest, GitContext};
use crate::render::StackComment;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct RenderArgs {
    /// Manifest file (JSON or TOML) describing the stack
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Local git repository to read stack metadata from
    #[arg(long, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Print the comment variant for this PR number, marker included
    #[arg(long, value_name = "N")]
    for_pr: Option<u64>,

    /// Trunk branch (overrides config and backend)
    #[arg(long, value_name = "BRANCH")]
    trunk: Option<String>,

    /// Skip sibling entries that repeat an already-listed branch
    #[arg(long)]
    dedupe_siblings: bool,

    /// Config file (default: discover stack-comment.toml in the working directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed resolving working directory")?;
    let config = load_config(&cwd, args.config.as_deref())?;
    let options =
        BuildOptions { dedupe_siblings: args.dedupe_siblings || config.dedupe_siblings };

    let (comment, prs) = match (&args.manifest, &args.repo) {
        (Some(_), Some(_)) => bail!("Cannot specify both --manifest and --repo"),
        (None, None) => bail!("Either --manifest or --repo must be specified"),
        (Some(path), None) => {
            let mut manifest = load_manifest(path)?;
            if let Some(trunk) = &args.trunk {
                manifest.trunk = trunk.clone();
            }
            let prs = manifest.prs.clone();
            (StackComment::generate(&manifest, &prs, options), prs)
        }
        (None, Some(path)) => {
            let mut ctx = GitContext::open(path, &config.trunk)?;
            if let Some(trunk) = &args.trunk {
                ctx.override_trunk(trunk);
            }
            let prs = ctx.submitted_prs()?;
            (StackComment::generate(&ctx, &prs, options), prs)
        }
    };

    match args.for_pr {
        Some(number) => {
            let pr = prs
                .iter()
                .find(|pr| pr.number == number)
                .with_context(|| format!("No PR #{number} in the stack"))?;
            print!("{}", comment.for_pr(pr));
        }
        None => print!("{comment}"),
    }

    Ok(())
}
