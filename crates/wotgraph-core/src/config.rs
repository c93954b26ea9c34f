use serde::{Deserialize, Serialize};

use crate::distance::DistanceRule;

/// Default certification cap per issuer.
pub const DEFAULT_SIG_STOCK: usize = 100;
/// Default maximum hop count of the distance rule.
pub const DEFAULT_STEP_MAX: u32 = 5;
/// Default share of sentries a member must be reachable from.
pub const DEFAULT_X_PERCENT: f64 = 0.8;

/// Currency parameters the web of trust engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WotParams {
    /// Maximum number of certifications a member may hold issued at once.
    #[serde(default = "default_sig_stock")]
    pub sig_stock: usize,
    /// Maximum distance, in certification hops, between a sentry and a member.
    #[serde(default = "default_step_max")]
    pub step_max: u32,
    /// Share of sentries that must reach a member within `step_max` hops.
    #[serde(default = "default_x_percent")]
    pub x_percent: f64,
}

fn default_sig_stock() -> usize {
    DEFAULT_SIG_STOCK
}
fn default_step_max() -> u32 {
    DEFAULT_STEP_MAX
}
fn default_x_percent() -> f64 {
    DEFAULT_X_PERCENT
}

impl Default for WotParams {
    fn default() -> Self {
        Self {
            sig_stock: default_sig_stock(),
            step_max: default_step_max(),
            x_percent: default_x_percent(),
        }
    }
}

impl WotParams {
    /// Distance rule built from these parameters.
    pub fn distance_rule(&self) -> DistanceRule {
        DistanceRule {
            step_max: self.step_max,
            x_percent: self.x_percent,
        }
    }
}
