use std::collections::BTreeSet;

use crate::config::DEFAULT_SIG_STOCK;
use crate::error::WotError;
use crate::types::WotId;

/// A member node: its membership flag and both adjacency directions.
///
/// `issuers.len()` is the received-certification count and
/// `certified.len()` the issued count; both sets are kept in lockstep by
/// the link store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    /// Whether the member is currently active.
    pub(crate) enabled: bool,
    /// Targets this node has certified.
    pub(crate) certified: BTreeSet<WotId>,
    /// Issuers that have certified this node.
    pub(crate) issuers: BTreeSet<WotId>,
}

impl Node {
    pub(crate) fn new() -> Self {
        Self {
            enabled: true,
            certified: BTreeSet::new(),
            issuers: BTreeSet::new(),
        }
    }
}

/// Web of trust: an arena of member nodes indexed by [`WotId`], linked by
/// certifications, with a cap on the certifications a single member may
/// hold issued at once.
///
/// `Clone` is a full deep copy, so a clone can be mutated to evaluate a fork
/// branch without touching the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebOfTrust {
    pub(crate) nodes: Vec<Node>,
    pub(crate) max_links: usize,
}

impl WebOfTrust {
    /// Create an empty web of trust where a member can issue at most
    /// `max_links` certifications.
    pub fn new(max_links: usize) -> Self {
        Self {
            nodes: Vec::new(),
            max_links,
        }
    }

    /// Drop every node and link. The certification cap is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        tracing::debug!(max_links = self.max_links, "web of trust cleared");
    }

    /// Independent deep copy for fork-branch evaluation.
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// Number of nodes, enabled or not.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a new enabled node and return its index.
    pub fn add_node(&mut self) -> WotId {
        self.nodes.push(Node::new());
        let id = WotId(self.nodes.len() - 1);
        tracing::debug!(node = %id, "node added");
        id
    }

    /// Remove the highest node together with every link it issued or
    /// received, and return its index.
    pub fn remove_node(&mut self) -> Result<WotId, WotError> {
        let node = self.nodes.pop().ok_or(WotError::EmptyGraph)?;
        let id = WotId(self.nodes.len());

        for target in &node.certified {
            self.nodes[target.0].issuers.remove(&id);
        }
        for issuer in &node.issuers {
            self.nodes[issuer.0].certified.remove(&id);
        }

        tracing::debug!(
            node = %id,
            dropped_issued = node.certified.len(),
            dropped_received = node.issuers.len(),
            "node removed"
        );
        Ok(id)
    }

    pub(crate) fn node(&self, id: WotId) -> Result<&Node, WotError> {
        self.nodes.get(id.0).ok_or(WotError::UnknownNode {
            id,
            size: self.nodes.len(),
        })
    }

    pub(crate) fn contains(&self, id: WotId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Whether the member is currently active.
    pub fn is_enabled(&self, id: WotId) -> Result<bool, WotError> {
        Ok(self.node(id)?.enabled)
    }

    /// Set the membership flag of a node and return the value set. Links
    /// are left untouched.
    pub fn set_enabled(&mut self, id: WotId, enabled: bool) -> Result<bool, WotError> {
        let size = self.nodes.len();
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(WotError::UnknownNode { id, size })?;
        if node.enabled != enabled {
            tracing::debug!(node = %id, enabled, "membership flag changed");
        }
        node.enabled = enabled;
        Ok(enabled)
    }

    /// Enabled nodes, ascending.
    pub fn enabled(&self) -> Vec<WotId> {
        self.select(|node| node.enabled)
    }

    /// Disabled nodes, ascending.
    pub fn disabled(&self) -> Vec<WotId> {
        self.select(|node| !node.enabled)
    }

    pub(crate) fn select<F>(&self, predicate: F) -> Vec<WotId>
    where
        F: Fn(&Node) -> bool,
    {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| predicate(node))
            .map(|(i, _)| WotId(i))
            .collect()
    }

    /// Number of certifications currently issued by a node.
    pub fn issued_count(&self, id: WotId) -> Result<usize, WotError> {
        Ok(self.node(id)?.certified.len())
    }

    /// Number of certifications currently received by a node.
    pub fn received_count(&self, id: WotId) -> Result<usize, WotError> {
        Ok(self.node(id)?.issuers.len())
    }

    /// Issuers currently certifying a node, ascending.
    pub fn issuers_of(&self, id: WotId) -> Result<Vec<WotId>, WotError> {
        Ok(self.node(id)?.issuers.iter().copied().collect())
    }

    /// Targets currently certified by a node, ascending.
    pub fn certified_by(&self, id: WotId) -> Result<Vec<WotId>, WotError> {
        Ok(self.node(id)?.certified.iter().copied().collect())
    }
}

impl Default for WebOfTrust {
    fn default() -> Self {
        Self::new(DEFAULT_SIG_STOCK)
    }
}
