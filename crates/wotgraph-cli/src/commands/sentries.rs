//! `wotgraph sentries` — List sentries or non-sentries.

use clap::Args;

use super::{load_wot, print_json};
use crate::config::WotgraphConfig;
use wotgraph_core::sentry_requirement;

#[derive(Args, Debug)]
pub struct SentriesArgs {
    /// Sentry requirement; derived from the member count when omitted.
    #[arg(short = 'k', long)]
    pub sentry_requirement: Option<usize>,

    /// List enabled members that are not sentries.
    #[arg(long)]
    pub non: bool,

    /// Print JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &SentriesArgs, config: &WotgraphConfig) -> anyhow::Result<()> {
    let wot = load_wot(config)?;
    let k = match args.sentry_requirement {
        Some(k) => k,
        None => sentry_requirement(wot.enabled().len(), config.params.step_max)?,
    };

    let ids = if args.non {
        wot.non_sentries(k)
    } else {
        wot.sentries(k)
    };
    if args.json {
        return print_json(&ids);
    }

    let label = if args.non { "Non-sentries" } else { "Sentries" };
    println!("{} for requirement {}: {}", label, k, ids.len());
    for id in ids {
        println!(
            "  {:>5}  issued {:>3}  received {:>3}",
            id,
            wot.issued_count(id)?,
            wot.received_count(id)?
        );
    }

    Ok(())
}
