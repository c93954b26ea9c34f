use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense index of a member node in the web of trust.
///
/// Indices are allocated in strictly increasing order starting at zero and
/// only the highest one can ever be released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WotId(pub usize);

impl WotId {
    /// The raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for WotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for WotId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Outcome of a certification insertion, carrying the received-certification
/// count of the target after the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkOutcome {
    /// The link was stored.
    Added(usize),
    /// The link already existed; nothing changed.
    AlreadyLinked(usize),
    /// The issuer has used all its certifications; nothing changed.
    CapacityReached(usize),
}

impl LinkOutcome {
    /// Received-certification count of the target after the call.
    pub fn received(&self) -> usize {
        match self {
            Self::Added(n) | Self::AlreadyLinked(n) | Self::CapacityReached(n) => *n,
        }
    }

    /// Whether the graph was mutated.
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(n) => write!(f, "added ({} received)", n),
            Self::AlreadyLinked(n) => write!(f, "already linked ({} received)", n),
            Self::CapacityReached(n) => write!(f, "capacity reached ({} received)", n),
        }
    }
}

/// Outcome of a certification removal, carrying the received-certification
/// count of the target after the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlinkOutcome {
    /// The link was removed.
    Removed(usize),
    /// There was no such link.
    NotLinked(usize),
}

impl UnlinkOutcome {
    /// Received-certification count of the target after the call.
    pub fn received(&self) -> usize {
        match self {
            Self::Removed(n) | Self::NotLinked(n) => *n,
        }
    }
}
