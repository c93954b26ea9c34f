//! Text dump and durable snapshots of a web of trust.
//!
//! The dump is the canonical, human-auditable form: two engines fed the same
//! mutations produce byte-identical dumps. The binary snapshot is an
//! envelope around a protobuf payload:
//!
//! ```text
//! "WOTG" | version: u8 | blake3(payload): [u8; 32] | payload
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::Path;

use crate::error::WotError;
use crate::graph::{Node, WebOfTrust};
use crate::types::{LinkOutcome, WotId};

const MAGIC: &[u8; 4] = b"WOTG";
const FORMAT_VERSION: u8 = 1;
const HEADER_LEN: usize = MAGIC.len() + 1 + blake3::OUT_LEN;

#[derive(Clone, PartialEq, prost::Message)]
struct SnapshotProto {
    #[prost(uint64, tag = "1")]
    max_links: u64,
    #[prost(message, repeated, tag = "2")]
    nodes: Vec<NodeProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
struct NodeProto {
    #[prost(bool, tag = "1")]
    enabled: bool,
    /// Issuers certifying the node, ascending.
    #[prost(uint64, repeated, tag = "2")]
    issuers: Vec<u64>,
}

/// One node as stored on disk: membership flag and issuers.
struct NodeRecord {
    enabled: bool,
    issuers: Vec<usize>,
}

fn corrupted(reason: impl Into<String>) -> WotError {
    WotError::CorruptedSnapshot(reason.into())
}

/// The canonical text form.
///
/// ```text
/// max_links=4
/// nodes_count=2
/// 000: [1]
/// 001: disabled []
/// ```
impl fmt::Display for WebOfTrust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "max_links={}", self.max_links)?;
        writeln!(f, "nodes_count={}", self.nodes.len())?;
        for (index, node) in self.nodes.iter().enumerate() {
            write!(f, "{:03}: ", index)?;
            if !node.enabled {
                f.write_str("disabled ")?;
            }
            f.write_str("[")?;
            for (position, issuer) in node.issuers.iter().enumerate() {
                if position > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", issuer)?;
            }
            f.write_str("]\n")?;
        }
        Ok(())
    }
}

impl WebOfTrust {
    /// Write the canonical text form.
    pub fn dump_to<W: io::Write>(&self, output: &mut W) -> io::Result<()> {
        write!(output, "{}", self)
    }

    /// Canonical text form as a string.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn from_records(max_links: usize, records: Vec<NodeRecord>) -> Result<Self, WotError> {
        let size = records.len();
        let mut nodes: Vec<Node> = records
            .iter()
            .map(|record| Node {
                enabled: record.enabled,
                certified: BTreeSet::new(),
                issuers: BTreeSet::new(),
            })
            .collect();

        for (target, record) in records.iter().enumerate() {
            for &issuer in &record.issuers {
                if issuer >= size {
                    return Err(corrupted(format!(
                        "node {} is certified by unknown node {}",
                        target, issuer
                    )));
                }
                if issuer == target {
                    return Err(corrupted(format!("node {} certifies itself", target)));
                }
                nodes[target].issuers.insert(WotId(issuer));
                nodes[issuer].certified.insert(WotId(target));
            }
        }

        Ok(Self { nodes, max_links })
    }

    /// Encode into the checksummed binary snapshot format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let proto = SnapshotProto {
            max_links: self.max_links as u64,
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeProto {
                    enabled: node.enabled,
                    issuers: node.issuers.iter().map(|id| id.0 as u64).collect(),
                })
                .collect(),
        };
        let payload = prost::Message::encode_to_vec(&proto);
        let checksum = blake3::hash(&payload);

        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(MAGIC);
        bytes.push(FORMAT_VERSION);
        bytes.extend_from_slice(checksum.as_bytes());
        bytes.extend_from_slice(&payload);
        bytes
    }

    /// Decode a binary snapshot produced by [`WebOfTrust::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WotError> {
        if bytes.len() < HEADER_LEN {
            return Err(corrupted(format!("snapshot too short: {} bytes", bytes.len())));
        }
        let (magic, rest) = bytes.split_at(MAGIC.len());
        if magic != MAGIC {
            return Err(corrupted("bad magic"));
        }
        let (version, rest) = rest.split_at(1);
        if version[0] != FORMAT_VERSION {
            return Err(corrupted(format!("unsupported format version {}", version[0])));
        }
        let (checksum, payload) = rest.split_at(blake3::OUT_LEN);
        if blake3::hash(payload).as_bytes().as_slice() != checksum {
            return Err(corrupted("checksum mismatch"));
        }

        let proto: SnapshotProto = prost::Message::decode(payload)?;
        let max_links = usize::try_from(proto.max_links)
            .map_err(|_| corrupted(format!("max_links out of range: {}", proto.max_links)))?;
        let records = proto
            .nodes
            .into_iter()
            .map(|node| {
                let issuers = node
                    .issuers
                    .into_iter()
                    .map(|i| usize::try_from(i).map_err(|_| corrupted(format!("node index out of range: {}", i))))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(NodeRecord {
                    enabled: node.enabled,
                    issuers,
                })
            })
            .collect::<Result<Vec<_>, WotError>>()?;

        Self::from_records(max_links, records)
    }

    /// Save a binary snapshot. The file is written beside `path` and then
    /// renamed over it, so readers never see a partial snapshot.
    pub fn save(&self, path: &Path) -> Result<(), WotError> {
        let bytes = self.to_bytes();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        std::fs::write(&tmp, &bytes)?;
        std::fs::rename(&tmp, path)?;

        tracing::info!(
            path = %path.display(),
            nodes = self.nodes.len(),
            bytes = bytes.len(),
            checksum = %hex::encode(&bytes[MAGIC.len() + 1..HEADER_LEN]),
            "web of trust saved"
        );
        Ok(())
    }

    /// Load a binary snapshot written by [`WebOfTrust::save`].
    pub fn load(path: &Path) -> Result<Self, WotError> {
        let bytes = std::fs::read(path)?;
        let wot = Self::from_bytes(&bytes)?;
        tracing::info!(
            path = %path.display(),
            nodes = wot.nodes.len(),
            max_links = wot.max_links,
            "web of trust loaded"
        );
        Ok(wot)
    }

    /// Read the legacy little-endian layout: `u32` cap, `u32` node count,
    /// then per node a `u8` enabled flag, a `u32` certification count and
    /// that many `u32` issuer indices.
    ///
    /// Every node is created first, then each certification is replayed
    /// through [`WebOfTrust::add_link`] in file order. Self-certifications and
    /// certifications past the issuer's cap are dropped, as the legacy engine
    /// did. An issuer index beyond the node count is still corruption.
    pub fn import_legacy(bytes: &[u8]) -> Result<Self, WotError> {
        let mut reader = LegacyReader { bytes, cursor: 0 };
        let max_links = reader.read_u32()? as usize;
        let nodes_count = reader.read_u32()? as usize;

        let mut records = Vec::new();
        for _ in 0..nodes_count {
            let enabled = reader.read_u8()? != 0;
            let certs_count = reader.read_u32()? as usize;
            let mut issuers = Vec::new();
            for _ in 0..certs_count {
                issuers.push(reader.read_u32()? as usize);
            }
            records.push(NodeRecord { enabled, issuers });
        }

        let mut wot = Self::new(max_links);
        for record in &records {
            let id = wot.add_node();
            if !record.enabled {
                wot.set_enabled(id, false)?;
            }
        }

        let mut dropped = 0usize;
        for (target, record) in records.iter().enumerate() {
            for &issuer in &record.issuers {
                if issuer >= nodes_count {
                    return Err(corrupted(format!(
                        "node {} is certified by unknown node {}",
                        target, issuer
                    )));
                }
                if issuer == target {
                    tracing::debug!(node = target, "legacy self-certification dropped");
                    dropped += 1;
                    continue;
                }
                if let LinkOutcome::CapacityReached(_) =
                    wot.add_link(WotId(issuer), WotId(target))?
                {
                    tracing::debug!(issuer, target, "legacy certification over the cap dropped");
                    dropped += 1;
                }
            }
        }

        tracing::info!(
            nodes = wot.nodes.len(),
            max_links,
            dropped,
            "legacy web of trust imported"
        );
        Ok(wot)
    }
}

struct LegacyReader<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl LegacyReader<'_> {
    fn take(&mut self, len: usize) -> Result<&[u8], WotError> {
        let end = self.cursor + len;
        let slice = self
            .bytes
            .get(self.cursor..end)
            .ok_or_else(|| corrupted(format!("legacy file truncated at byte {}", self.cursor)))?;
        self.cursor = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, WotError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, WotError> {
        let mut buffer = [0u8; 4];
        buffer.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buffer))
    }
}
