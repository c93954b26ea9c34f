//! The distance rule.
//!
//! A member is outdistanced when the share of sentries able to reach it
//! through at most `step_max` certifications falls below `x_percent`.
//! Reachability is computed by a single layered search walking certification
//! links backwards from the member, through enabled issuers only, and never
//! deeper than `step_max` layers.

use serde::{Deserialize, Serialize};

use crate::error::WotError;
use crate::graph::WebOfTrust;
use crate::sentry::{qualifies, sentry_requirement};
use crate::types::WotId;

/// Parameters of a distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceParams {
    /// Member whose distance is evaluated.
    pub node: WotId,
    /// Certifications issued and received to be a sentry.
    pub sentry_requirement: usize,
    /// Maximum number of hops between a sentry and the member.
    pub step_max: u32,
    /// Share of sentries that must reach the member, in `[0, 1]`.
    pub x_percent: f64,
}

/// Result of [`WebOfTrust::compute_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceReport {
    /// Sentries, the evaluated member excluded.
    pub sentries: usize,
    /// Sentries reaching the member within `step_max` hops.
    pub success: usize,
    /// Sentries whose shortest path is exactly `step_max` hops.
    pub success_at_border: usize,
    /// Members reaching the member within `step_max` hops.
    pub reached: usize,
    /// Members whose shortest path is exactly `step_max` hops.
    pub reached_at_border: usize,
    /// Whether too few sentries reach the member.
    pub outdistanced: bool,
}

/// Distance rule of a currency: the sentry requirement is derived from the
/// member count at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRule {
    pub step_max: u32,
    pub x_percent: f64,
}

impl DistanceRule {
    /// Distance parameters for `node` in a web of `members_count` members.
    pub fn params_for(&self, node: WotId, members_count: usize) -> Result<DistanceParams, WotError> {
        Ok(DistanceParams {
            node,
            sentry_requirement: sentry_requirement(members_count, self.step_max)?,
            step_max: self.step_max,
            x_percent: self.x_percent,
        })
    }
}

/// Distance and connectivity percentages of every enabled member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceSummary {
    pub average_distance: usize,
    pub distances: Vec<(WotId, usize)>,
    pub average_connectivity: usize,
    pub connectivities: Vec<(WotId, usize)>,
}

fn check_ratio(x_percent: f64) -> Result<(), WotError> {
    if x_percent.is_finite() && (0.0..=1.0).contains(&x_percent) {
        Ok(())
    } else {
        Err(WotError::InvalidParameter(format!(
            "x_percent must be within [0, 1], got {}",
            x_percent
        )))
    }
}

impl WebOfTrust {
    /// Next layer of the backward search: enabled issuers of `frontier` not
    /// seen yet, ascending.
    fn expand(&self, frontier: &[WotId], visited: &mut [bool]) -> Vec<WotId> {
        let mut next = Vec::new();
        for id in frontier {
            for issuer in &self.nodes[id.0].issuers {
                if !visited[issuer.0] && self.nodes[issuer.0].enabled {
                    visited[issuer.0] = true;
                    next.push(*issuer);
                }
            }
        }
        next.sort_unstable();
        next
    }

    /// Evaluate the distance rule for `params.node` and report the counters.
    pub fn compute_distance(&self, params: DistanceParams) -> Result<DistanceReport, WotError> {
        let DistanceParams {
            node,
            sentry_requirement,
            step_max,
            x_percent,
        } = params;
        self.node(node)?;
        check_ratio(x_percent)?;

        let mut visited = vec![false; self.nodes.len()];
        visited[node.0] = true;

        let mut area = Vec::new();
        let mut frontier = vec![node];
        let mut depth = 0;
        while depth < step_max && !frontier.is_empty() {
            frontier = self.expand(&frontier, &mut visited);
            depth += 1;
            tracing::trace!(%node, depth, found = frontier.len(), "distance layer");
            area.extend(frontier.iter().copied());
        }
        let border = if step_max > 0 && depth == step_max {
            frontier
        } else {
            Vec::new()
        };

        let is_sentry_id = |id: &&WotId| qualifies(&self.nodes[id.0], sentry_requirement);
        let mut sentries = self.sentries(sentry_requirement).len();
        if self.is_sentry(node, sentry_requirement)? {
            sentries -= 1;
        }
        let success = area.iter().filter(is_sentry_id).count();
        let success_at_border = border.iter().filter(is_sentry_id).count();

        let outdistanced = sentries > 0 && (success as f64 / sentries as f64) < x_percent;

        tracing::debug!(
            %node,
            sentries,
            success,
            reached = area.len(),
            outdistanced,
            "distance computed"
        );

        Ok(DistanceReport {
            sentries,
            success,
            success_at_border,
            reached: area.len(),
            reached_at_border: border.len(),
            outdistanced,
        })
    }

    /// Whether `params.node` fails the distance rule.
    pub fn is_outdistanced(&self, params: DistanceParams) -> Result<bool, WotError> {
        Ok(self.compute_distance(params)?.outdistanced)
    }

    /// Evaluate a member against a currency rule, deriving the sentry
    /// requirement from the current number of enabled members.
    pub fn check_member(&self, node: WotId, rule: &DistanceRule) -> Result<DistanceReport, WotError> {
        let params = rule.params_for(node, self.enabled().len())?;
        self.compute_distance(params)
    }

    /// Distance percentage of every enabled member (successes over the
    /// required share of sentries) and its connectivity percentage (the same
    /// without successes at the border), with their averages.
    pub fn distance_summary(
        &self,
        sentry_requirement: usize,
        step_max: u32,
        x_percent: f64,
    ) -> Result<DistanceSummary, WotError> {
        check_ratio(x_percent)?;
        let members = self.enabled();

        let mut distances = Vec::with_capacity(members.len());
        let mut connectivities = Vec::with_capacity(members.len());
        for node in &members {
            let report = self.compute_distance(DistanceParams {
                node: *node,
                sentry_requirement,
                step_max,
                x_percent,
            })?;
            let required = x_percent * report.sentries as f64;
            let percent = |success: usize| {
                if required > 0.0 {
                    (success as f64 / required * 100.0) as usize
                } else {
                    100
                }
            };
            distances.push((*node, percent(report.success)));
            connectivities.push((*node, percent(report.success - report.success_at_border)));
        }

        let average = |values: &[(WotId, usize)]| {
            if values.is_empty() {
                0
            } else {
                values.iter().map(|(_, v)| v).sum::<usize>() / values.len()
            }
        };

        Ok(DistanceSummary {
            average_distance: average(&distances),
            average_connectivity: average(&connectivities),
            distances,
            connectivities,
        })
    }
}
