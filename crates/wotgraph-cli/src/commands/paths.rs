//! `wotgraph paths` — List certification chains between two members.

use clap::Args;

use super::{load_wot, print_json};
use crate::config::WotgraphConfig;
use wotgraph_core::WotId;

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// First issuer of the chain.
    pub from: usize,

    /// Last target of the chain.
    pub to: usize,

    /// Maximum number of hops; defaults to the configured step_max.
    #[arg(short, long)]
    pub max_distance: Option<u32>,

    /// Print JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &PathsArgs, config: &WotgraphConfig) -> anyhow::Result<()> {
    let wot = load_wot(config)?;
    let max_distance = args.max_distance.unwrap_or(config.params.step_max);
    let paths = wot.find_paths(WotId(args.from), WotId(args.to), max_distance)?;

    if args.json {
        return print_json(&paths);
    }

    println!(
        "{} paths from {} to {} within {} hops",
        paths.len(),
        args.from,
        args.to,
        max_distance
    );
    for path in paths {
        let hops: Vec<String> = path.iter().map(|id| id.to_string()).collect();
        println!("  {}", hops.join(" -> "));
    }

    Ok(())
}
