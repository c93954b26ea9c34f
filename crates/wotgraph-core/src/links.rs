//! Certification link store: per-issuer cap and received counts.

use crate::error::{LinkFault, WotError};
use crate::graph::WebOfTrust;
use crate::types::{LinkOutcome, UnlinkOutcome, WotId};

impl WebOfTrust {
    /// Maximum number of certifications a member may have issued at once.
    pub fn max_links(&self) -> usize {
        self.max_links
    }

    /// Change the certification cap. Lowering it keeps existing links and
    /// only blocks further issuance by members already at or above it.
    pub fn set_max_links(&mut self, max_links: usize) {
        tracing::debug!(from = self.max_links, to = max_links, "certification cap changed");
        self.max_links = max_links;
    }

    pub(crate) fn check_link(&self, issuer: WotId, target: WotId) -> Result<(), WotError> {
        let reason = if issuer == target {
            LinkFault::SelfLink
        } else if !self.contains(issuer) {
            LinkFault::UnknownIssuer
        } else if !self.contains(target) {
            LinkFault::UnknownTarget
        } else {
            return Ok(());
        };
        Err(WotError::InvalidLink {
            issuer,
            target,
            reason,
        })
    }

    /// Store a certification from `issuer` to `target`.
    ///
    /// An issuer already at the cap is not an error: the call changes
    /// nothing and reports [`LinkOutcome::CapacityReached`].
    pub fn add_link(&mut self, issuer: WotId, target: WotId) -> Result<LinkOutcome, WotError> {
        self.check_link(issuer, target)?;

        let received = self.nodes[target.0].issuers.len();
        if self.nodes[issuer.0].certified.contains(&target) {
            return Ok(LinkOutcome::AlreadyLinked(received));
        }
        if self.nodes[issuer.0].certified.len() >= self.max_links {
            tracing::debug!(
                %issuer,
                %target,
                max_links = self.max_links,
                "certification rejected, issuer at cap"
            );
            return Ok(LinkOutcome::CapacityReached(received));
        }

        self.nodes[issuer.0].certified.insert(target);
        self.nodes[target.0].issuers.insert(issuer);
        let received = self.nodes[target.0].issuers.len();
        tracing::debug!(%issuer, %target, received, "certification added");
        Ok(LinkOutcome::Added(received))
    }

    /// Remove the certification from `issuer` to `target` if present.
    pub fn remove_link(&mut self, issuer: WotId, target: WotId) -> Result<UnlinkOutcome, WotError> {
        self.check_link(issuer, target)?;

        if !self.nodes[issuer.0].certified.remove(&target) {
            return Ok(UnlinkOutcome::NotLinked(self.nodes[target.0].issuers.len()));
        }
        self.nodes[target.0].issuers.remove(&issuer);
        let received = self.nodes[target.0].issuers.len();
        tracing::debug!(%issuer, %target, received, "certification removed");
        Ok(UnlinkOutcome::Removed(received))
    }

    /// Whether `issuer` currently certifies `target`. Unknown indices yield
    /// `false`.
    pub fn exists_link(&self, issuer: WotId, target: WotId) -> bool {
        self.nodes
            .get(issuer.0)
            .map(|node| node.certified.contains(&target))
            .unwrap_or(false)
    }
}
