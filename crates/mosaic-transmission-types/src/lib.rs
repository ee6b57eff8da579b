//! # Mosaic Transmission Types
//!
//! Data types exchanged with a Transmission daemon over its JSON-RPC protocol.
//!
//! Every field of a [`Torrent`] and a [`SessionInfo`] is optional: the daemon only
//! reports the fields that were requested, and a session update only carries the
//! fields the caller set.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod scalar;
mod session;
mod torrent;

pub use scalar::{flag, unix_seconds};
pub use session::{SessionInfo, SessionStat, StatsDetails, Units};
pub use torrent::{
    ALL_TORRENT_FIELDS, File, FileStat, Peer, PeersFrom, Torrent, TorrentStatus, Tracker,
    TrackerStat,
};

/// Raised when a daemon-reported status code has no [`TorrentStatus`] counterpart.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid torrent status: {0}")]
pub struct InvalidStatus(pub i64);

/// Identifies a torrent in a request.
///
/// The daemon accepts both its numeric session-local ids and the torrent's info hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TorrentId {
    /// Numeric id, only stable for the lifetime of the daemon process.
    Id(i64),
    /// Hex encoded info hash.
    Hash(String),
}

impl From<i64> for TorrentId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TorrentId {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_owned())
    }
}

impl From<String> for TorrentId {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

impl fmt::Display for TorrentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Hash(hash) => f.write_str(hash),
        }
    }
}
