//! Membership and certification events, block replay and fork evaluation.
//!
//! A block carries an ordered list of [`WotEvent`]s. Applying a block is all
//! or nothing and yields a [`BlockJournal`] of the events that changed the
//! graph; reverting walks that journal backwards so a branch can be rolled
//! back exactly.

use serde::{Deserialize, Serialize};

use crate::distance::{DistanceParams, DistanceReport, DistanceRule};
use crate::error::{LinkFault, WotError};
use crate::graph::WebOfTrust;
use crate::sentry::sentry_requirement;
use crate::types::{LinkOutcome, UnlinkOutcome, WotId};

/// A change to the web of trust recorded in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WotEvent {
    /// A new identity became a member. It takes the next free index.
    IdentityJoined,
    /// `issuer` certified `target`. Re-issuing an existing certification is
    /// a renewal and leaves the graph as is.
    CertificationIssued { issuer: WotId, target: WotId },
    /// The certification from `issuer` to `target` ran out.
    CertificationExpired { issuer: WotId, target: WotId },
    /// The member lost its membership (distance or certifications).
    MemberExcluded { member: WotId },
    /// The member revoked its own identity.
    MemberRevoked { member: WotId },
    /// A former member joined again.
    MemberRenewed { member: WotId },
}

/// Distance verdicts of the candidates of a pending block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockVerdict {
    /// Enabled members before the block.
    pub members_count: usize,
    /// Sentry requirement derived from `members_count`.
    pub sentry_requirement: usize,
    /// One report per candidate, in the order given.
    pub reports: Vec<(WotId, DistanceReport)>,
}

impl BlockVerdict {
    /// Candidates failing the distance rule.
    pub fn outdistanced(&self) -> Vec<WotId> {
        self.reports
            .iter()
            .filter(|(_, report)| report.outdistanced)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Whether every candidate passes the distance rule.
    pub fn is_valid(&self) -> bool {
        self.reports.iter().all(|(_, report)| !report.outdistanced)
    }
}

/// Whether applying an event mutated the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventEffect {
    Changed,
    /// Renewal of an existing certification, or a membership flag already
    /// in the requested state.
    Unchanged,
}

/// Events of an applied block that actually changed the graph, in order.
/// Reverting a block walks this journal backwards, so no-op events are
/// never undone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockJournal {
    changed: Vec<WotEvent>,
}

impl BlockJournal {
    /// Events that changed the graph.
    pub fn events(&self) -> &[WotEvent] {
        &self.changed
    }

    pub fn len(&self) -> usize {
        self.changed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

impl WebOfTrust {
    fn issue(&mut self, issuer: WotId, target: WotId) -> Result<EventEffect, WotError> {
        match self.add_link(issuer, target)? {
            LinkOutcome::Added(_) => Ok(EventEffect::Changed),
            LinkOutcome::AlreadyLinked(_) => Ok(EventEffect::Unchanged),
            LinkOutcome::CapacityReached(_) => Err(WotError::InvalidLink {
                issuer,
                target,
                reason: LinkFault::CapacityReached,
            }),
        }
    }

    fn expire(&mut self, issuer: WotId, target: WotId) -> Result<EventEffect, WotError> {
        match self.remove_link(issuer, target)? {
            UnlinkOutcome::Removed(_) => Ok(EventEffect::Changed),
            UnlinkOutcome::NotLinked(_) => Err(WotError::InvalidLink {
                issuer,
                target,
                reason: LinkFault::NotLinked,
            }),
        }
    }

    fn flag(&mut self, member: WotId, enabled: bool) -> Result<EventEffect, WotError> {
        if self.is_enabled(member)? == enabled {
            return Ok(EventEffect::Unchanged);
        }
        self.set_enabled(member, enabled)?;
        Ok(EventEffect::Changed)
    }

    /// Apply a single event and report whether it changed the graph.
    pub fn apply_event(&mut self, event: &WotEvent) -> Result<EventEffect, WotError> {
        tracing::trace!(?event, "applying event");
        match *event {
            WotEvent::IdentityJoined => {
                self.add_node();
                Ok(EventEffect::Changed)
            }
            WotEvent::CertificationIssued { issuer, target } => self.issue(issuer, target),
            WotEvent::CertificationExpired { issuer, target } => self.expire(issuer, target),
            WotEvent::MemberExcluded { member } | WotEvent::MemberRevoked { member } => {
                self.flag(member, false)
            }
            WotEvent::MemberRenewed { member } => self.flag(member, true),
        }
    }

    /// Undo an event whose application reported [`EventEffect::Changed`].
    /// Reverting a joined identity drops the highest node.
    pub fn revert_event(&mut self, event: &WotEvent) -> Result<(), WotError> {
        tracing::trace!(?event, "reverting event");
        match *event {
            WotEvent::IdentityJoined => {
                self.remove_node()?;
            }
            WotEvent::CertificationIssued { issuer, target } => {
                self.expire(issuer, target)?;
            }
            WotEvent::CertificationExpired { issuer, target } => {
                // Bypasses the cap.
                self.check_link(issuer, target)?;
                self.nodes[issuer.0].certified.insert(target);
                self.nodes[target.0].issuers.insert(issuer);
            }
            WotEvent::MemberExcluded { member } | WotEvent::MemberRevoked { member } => {
                self.set_enabled(member, true)?;
            }
            WotEvent::MemberRenewed { member } => {
                self.set_enabled(member, false)?;
            }
        }
        Ok(())
    }

    /// Apply every event of a block, or none of them. The returned journal
    /// is what [`WebOfTrust::revert_block`] needs to undo the block.
    pub fn apply_block(&mut self, events: &[WotEvent]) -> Result<BlockJournal, WotError> {
        let mut next = self.fork();
        let mut journal = BlockJournal::default();
        for (index, event) in events.iter().enumerate() {
            match next.apply_event(event) {
                Ok(EventEffect::Changed) => journal.changed.push(*event),
                Ok(EventEffect::Unchanged) => {
                    tracing::debug!(index, ?event, "event left the graph unchanged");
                }
                Err(e) => {
                    tracing::warn!(index, ?event, error = %e, "block rejected, rolled back");
                    return Err(e);
                }
            }
        }
        *self = next;
        tracing::debug!(
            events = events.len(),
            changed = journal.len(),
            size = self.size(),
            "block applied"
        );
        Ok(journal)
    }

    /// Undo a block from the journal [`WebOfTrust::apply_block`] returned,
    /// last event first. All or nothing as well.
    pub fn revert_block(&mut self, journal: &BlockJournal) -> Result<(), WotError> {
        let mut previous = self.fork();
        for (index, event) in journal.changed.iter().enumerate().rev() {
            if let Err(e) = previous.revert_event(event) {
                tracing::warn!(index, ?event, error = %e, "block revert failed, rolled back");
                return Err(e);
            }
        }
        *self = previous;
        tracing::debug!(events = journal.len(), size = self.size(), "block reverted");
        Ok(())
    }

    /// Check the distance rule for the candidates of a pending block without
    /// touching this web of trust.
    ///
    /// The block is played on a fork: `newcomers` nodes are appended
    /// disabled, the certification cap is raised by the number of pending
    /// `links` so none of them is refused, and the links are inserted. The
    /// sentry requirement comes from the member count before the block.
    pub fn evaluate_block(
        &self,
        newcomers: usize,
        links: &[(WotId, WotId)],
        candidates: &[WotId],
        rule: &DistanceRule,
    ) -> Result<BlockVerdict, WotError> {
        let members_count = self.enabled().len();
        let requirement = sentry_requirement(members_count, rule.step_max)?;

        let mut branch = self.fork();
        for _ in 0..newcomers {
            let id = branch.add_node();
            branch.set_enabled(id, false)?;
        }
        branch.set_max_links(branch.max_links.saturating_add(links.len()));
        for &(issuer, target) in links {
            branch.add_link(issuer, target)?;
        }

        let mut reports = Vec::with_capacity(candidates.len());
        for &node in candidates {
            let report = branch.compute_distance(DistanceParams {
                node,
                sentry_requirement: requirement,
                step_max: rule.step_max,
                x_percent: rule.x_percent,
            })?;
            reports.push((node, report));
        }

        let verdict = BlockVerdict {
            members_count,
            sentry_requirement: requirement,
            reports,
        };
        tracing::debug!(
            newcomers,
            links = links.len(),
            candidates = candidates.len(),
            outdistanced = verdict.outdistanced().len(),
            "block evaluated"
        );
        Ok(verdict)
    }
}
