//! Sentry classification.
//!
//! A sentry is an enabled member that has both issued and received at least
//! `k` certifications. Sentries are the reference points of the distance rule.

use crate::error::WotError;
use crate::graph::{Node, WebOfTrust};
use crate::types::WotId;

pub(crate) fn qualifies(node: &Node, sentry_requirement: usize) -> bool {
    node.enabled
        && node.certified.len() >= sentry_requirement
        && node.issuers.len() >= sentry_requirement
}

impl WebOfTrust {
    /// Whether a node is currently a sentry for requirement `k`.
    pub fn is_sentry(&self, id: WotId, sentry_requirement: usize) -> Result<bool, WotError> {
        Ok(qualifies(self.node(id)?, sentry_requirement))
    }

    /// Sentries for requirement `k`, ascending.
    pub fn sentries(&self, sentry_requirement: usize) -> Vec<WotId> {
        self.select(|node| qualifies(node, sentry_requirement))
    }

    /// Enabled nodes that are not sentries for requirement `k`, ascending.
    pub fn non_sentries(&self, sentry_requirement: usize) -> Vec<WotId> {
        self.select(|node| node.enabled && !qualifies(node, sentry_requirement))
    }
}

/// Sentry requirement for a web of `members_count` members and a maximum
/// distance of `step_max`: the ceiling of the `step_max`-th root of the
/// member count.
///
/// Computed as the smallest `s` with `s^step_max >= members_count` so the
/// result never depends on floating point rounding.
pub fn sentry_requirement(members_count: usize, step_max: u32) -> Result<usize, WotError> {
    if step_max == 0 {
        return Err(WotError::InvalidParameter(
            "step_max must be at least 1".into(),
        ));
    }
    if members_count <= 1 {
        return Ok(members_count);
    }

    let reaches = |s: usize| match s.checked_pow(step_max) {
        Some(power) => power >= members_count,
        None => true,
    };

    let (mut low, mut high) = (1usize, members_count);
    while low < high {
        let mid = low + (high - low) / 2;
        if reaches(mid) {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    Ok(low)
}
