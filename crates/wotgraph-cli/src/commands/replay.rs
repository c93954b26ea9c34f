//! `wotgraph replay` — Apply blocks of events to the snapshot.
//!
//! The input is a JSON array of blocks, each block an array of events:
//!
//! ```json
//! [
//!   [{"type": "identity_joined"}, {"type": "identity_joined"}],
//!   [{"type": "certification_issued", "issuer": 0, "target": 1}]
//! ]
//! ```
//!
//! `--journal` records, per block, the events that changed the graph.
//! `--revert` takes such a journal file and undoes it, last block first.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

use super::load_wot;
use crate::config::WotgraphConfig;
use wotgraph_core::{BlockJournal, WebOfTrust, WotEvent};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON file holding the blocks, or a journal with `--revert`.
    pub events: PathBuf,

    /// Start from an empty web of trust instead of the snapshot.
    #[arg(long)]
    pub fresh: bool,

    /// Revert a journal written by `--journal`, last event first.
    #[arg(long)]
    pub revert: bool,

    /// Write the journal of the applied blocks to this file.
    #[arg(long, conflicts_with = "revert")]
    pub journal: Option<PathBuf>,

    /// Do not write the result back.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &ReplayArgs, config: &WotgraphConfig) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.events)
        .with_context(|| format!("cannot read {}", args.events.display()))?;

    let mut wot = if args.fresh {
        WebOfTrust::new(config.params.sig_stock)
    } else {
        load_wot(config)?
    };

    let (blocks, events) = if args.revert {
        let journals: Vec<BlockJournal> = serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("invalid journal JSON: {}", e))?;
        for (number, journal) in journals.iter().enumerate().rev() {
            wot.revert_block(journal)
                .with_context(|| format!("block #{} cannot be reverted", number))?;
        }
        (journals.len(), journals.iter().map(BlockJournal::len).sum::<usize>())
    } else {
        let blocks: Vec<Vec<WotEvent>> = serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("invalid events JSON: {}", e))?;
        let mut journals = Vec::with_capacity(blocks.len());
        for (number, block) in blocks.iter().enumerate() {
            let journal = wot
                .apply_block(block)
                .with_context(|| format!("block #{} rejected", number))?;
            journals.push(journal);
        }
        if let Some(ref path) = args.journal {
            let json = serde_json::to_string_pretty(&journals)?;
            std::fs::write(path, json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("Journal written to {}", path.display());
        }
        (blocks.len(), blocks.iter().map(Vec::len).sum::<usize>())
    };

    println!(
        "{} {} blocks ({} events): {} nodes, {} members",
        if args.revert { "Reverted" } else { "Applied" },
        blocks,
        events,
        wot.size(),
        wot.enabled().len()
    );

    if !args.dry_run {
        wot.save(&config.storage.snapshot_path)?;
        println!("Saved to {}", config.storage.snapshot_path.display());
    }

    Ok(())
}
