//! `wotgraph import-legacy` — Convert a legacy binary file into a snapshot.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

use crate::config::WotgraphConfig;
use wotgraph_core::WebOfTrust;

#[derive(Args, Debug)]
pub struct ImportLegacyArgs {
    /// Legacy file to read.
    pub input: PathBuf,

    /// Snapshot to write; defaults to the configured snapshot path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ImportLegacyArgs, config: &WotgraphConfig) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let wot = WebOfTrust::import_legacy(&bytes)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.storage.snapshot_path.clone());
    wot.save(&output)?;

    println!(
        "Imported {} nodes ({} members, max_links={}) into {}",
        wot.size(),
        wot.enabled().len(),
        wot.max_links(),
        output.display()
    );

    Ok(())
}
