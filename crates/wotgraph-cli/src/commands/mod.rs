pub mod centrality;
pub mod distance;
pub mod dump;
pub mod import_legacy;
pub mod init;
pub mod paths;
pub mod replay;
pub mod sentries;

use anyhow::Context;

use crate::config::WotgraphConfig;
use wotgraph_core::WebOfTrust;

/// Load the snapshot named by the config.
pub fn load_wot(config: &WotgraphConfig) -> anyhow::Result<WebOfTrust> {
    let path = &config.storage.snapshot_path;
    WebOfTrust::load(path).with_context(|| format!("cannot load snapshot {}", path.display()))
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
