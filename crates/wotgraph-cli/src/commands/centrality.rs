//! `wotgraph centrality` — Centrality measures of every node.

use clap::{Args, ValueEnum};

use super::{load_wot, print_json};
use crate::config::WotgraphConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CentralityKind {
    Betweenness,
    Stress,
    DistanceStress,
}

#[derive(Args, Debug)]
pub struct CentralityArgs {
    /// Measure to compute.
    #[arg(long, value_enum, default_value = "betweenness")]
    pub kind: CentralityKind,

    /// Path length bound for distance-stress; defaults to step_max.
    #[arg(long)]
    pub step_max: Option<u32>,

    /// Print JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &CentralityArgs, config: &WotgraphConfig) -> anyhow::Result<()> {
    let wot = load_wot(config)?;
    let values = match args.kind {
        CentralityKind::Betweenness => wot.betweenness_centralities(),
        CentralityKind::Stress => wot.stress_centralities(),
        CentralityKind::DistanceStress => {
            wot.distance_stress_centralities(args.step_max.unwrap_or(config.params.step_max))
        }
    };

    if args.json {
        return print_json(&values);
    }

    println!("{:?} centralities of {} nodes", args.kind, values.len());
    for (id, value) in values.iter().enumerate() {
        println!("  {:>5}  {}", id, value);
    }

    Ok(())
}
