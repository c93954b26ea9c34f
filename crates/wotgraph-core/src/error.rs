use crate::types::WotId;

/// Why a certification link was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFault {
    SelfLink,
    UnknownIssuer,
    UnknownTarget,
    /// The issuer already holds `max_links` certifications.
    CapacityReached,
    /// No such certification to remove.
    NotLinked,
}

impl std::fmt::Display for LinkFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfLink => write!(f, "self certification is forbidden"),
            Self::UnknownIssuer => write!(f, "unknown issuer"),
            Self::UnknownTarget => write!(f, "unknown target"),
            Self::CapacityReached => write!(f, "issuer reached its certification cap"),
            Self::NotLinked => write!(f, "no such certification"),
        }
    }
}

/// Errors raised by the web of trust engine.
#[derive(Debug, thiserror::Error)]
pub enum WotError {
    #[error("unknown node {id} (size {size})")]
    UnknownNode { id: WotId, size: usize },

    #[error("invalid link {issuer} -> {target}: {reason}")]
    InvalidLink {
        issuer: WotId,
        target: WotId,
        reason: LinkFault,
    },

    #[error("web of trust is empty")]
    EmptyGraph,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("corrupted snapshot: {0}")]
    CorruptedSnapshot(String),

    #[error("snapshot decoding error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
