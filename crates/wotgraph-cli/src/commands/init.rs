//! `wotgraph init` — Write a default config and an empty snapshot.

use clap::Args;
use std::path::Path;

use crate::config::WotgraphConfig;
use wotgraph_core::WebOfTrust;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing snapshot.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, config_path: &Path, config: &WotgraphConfig) -> anyhow::Result<()> {
    if config_path.exists() {
        println!("Using existing config at {}", config_path.display());
    } else {
        config.save(config_path)?;
        println!("Wrote default config to {}", config_path.display());
    }

    let snapshot = &config.storage.snapshot_path;
    if snapshot.exists() && !args.force {
        anyhow::bail!(
            "snapshot already exists at {} (use --force to overwrite)",
            snapshot.display()
        );
    }

    let wot = WebOfTrust::new(config.params.sig_stock);
    wot.save(snapshot)?;
    println!(
        "Initialized empty web of trust at {} (max_links={})",
        snapshot.display(),
        wot.max_links()
    );
    println!("Run 'wotgraph replay <events.json>' to feed it.");

    Ok(())
}
