//! Wotgraph Core — the web of trust engine used by block validation.
//!
//! Provides:
//! - [`WebOfTrust`]: dense node registry and certification link store with
//!   a per-issuer certification cap.
//! - Sentry classification and the distance rule ([`DistanceParams`],
//!   [`DistanceReport`]).
//! - Path enumeration and centrality measures for diagnostics.
//! - Event replay, atomic block application and fork-branch evaluation.
//! - A deterministic text dump plus a checksummed binary snapshot format.

pub mod centrality;
pub mod config;
pub mod distance;
pub mod error;
pub mod events;
pub mod graph;
pub mod links;
pub mod path;
pub mod sentry;
pub mod snapshot;
pub mod types;

pub use config::WotParams;
pub use distance::{DistanceParams, DistanceReport, DistanceRule, DistanceSummary};
pub use error::WotError;
pub use events::{BlockJournal, BlockVerdict, EventEffect, WotEvent};
pub use graph::WebOfTrust;
pub use sentry::sentry_requirement;
pub use types::{LinkOutcome, UnlinkOutcome, WotId};
