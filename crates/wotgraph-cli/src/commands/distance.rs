//! `wotgraph distance` — Evaluate the distance rule.

use clap::Args;

use super::{load_wot, print_json};
use crate::config::WotgraphConfig;
use wotgraph_core::{sentry_requirement, DistanceParams, WotId};

#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// Member to evaluate. Without it, every member is summarized.
    pub member: Option<usize>,

    /// Override the maximum distance.
    #[arg(long)]
    pub step_max: Option<u32>,

    /// Override the required share of sentries.
    #[arg(long)]
    pub x_percent: Option<f64>,

    /// Sentry requirement; derived from the member count when omitted.
    #[arg(short = 'k', long)]
    pub sentry_requirement: Option<usize>,

    /// Print JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &DistanceArgs, config: &WotgraphConfig) -> anyhow::Result<()> {
    let wot = load_wot(config)?;
    let step_max = args.step_max.unwrap_or(config.params.step_max);
    let x_percent = args.x_percent.unwrap_or(config.params.x_percent);
    let k = match args.sentry_requirement {
        Some(k) => k,
        None => sentry_requirement(wot.enabled().len(), step_max)?,
    };

    let Some(member) = args.member else {
        let summary = wot.distance_summary(k, step_max, x_percent)?;
        if args.json {
            return print_json(&summary);
        }
        println!("Sentry requirement: {}", k);
        println!("Average distance:     {}%", summary.average_distance);
        println!("Average connectivity: {}%", summary.average_connectivity);
        for ((id, distance), (_, connectivity)) in
            summary.distances.iter().zip(&summary.connectivities)
        {
            println!("  {:>5}  distance {:>4}%  connectivity {:>4}%", id, distance, connectivity);
        }
        return Ok(());
    };

    let report = wot.compute_distance(DistanceParams {
        node: WotId(member),
        sentry_requirement: k,
        step_max,
        x_percent,
    })?;
    if args.json {
        return print_json(&report);
    }

    println!(
        "Member {} is {}",
        member,
        if report.outdistanced { "OUTDISTANCED" } else { "within distance" }
    );
    println!("  Sentry requirement: {}", k);
    println!("  Sentries:           {}", report.sentries);
    println!("  Reaching sentries:  {} ({} at border)", report.success, report.success_at_border);
    println!("  Reaching members:   {} ({} at border)", report.reached, report.reached_at_border);

    Ok(())
}
