//! `wotgraph dump` — Print the canonical text dump.

use clap::Args;
use std::path::PathBuf;

use super::load_wot;
use crate::config::WotgraphConfig;

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Write the dump to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &DumpArgs, config: &WotgraphConfig) -> anyhow::Result<()> {
    let wot = load_wot(config)?;

    match args.output {
        Some(ref path) => {
            let mut file = std::fs::File::create(path)?;
            wot.dump_to(&mut file)?;
            println!("Dumped {} nodes to {}", wot.size(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            wot.dump_to(&mut stdout.lock())?;
        }
    }

    Ok(())
}
