//! Request descriptors and the builders for each action.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use mosaic_transmission_types::{ALL_TORRENT_FIELDS, SessionInfo, TorrentId};

use crate::RpcError;

/// Protocol method names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// `session-set`
    SessionSet,
    /// `session-get`
    SessionGet,
    /// `session-stats`
    SessionStats,
    /// `torrent-remove`
    TorrentRemove,
    /// `torrent-add`
    TorrentAdd,
    /// `torrent-get`
    TorrentGet,
    /// `torrent-start`
    TorrentStart,
    /// `torrent-start-now`
    TorrentStartNow,
    /// `torrent-stop`
    TorrentStop,
    /// `torrent-verify`
    TorrentVerify,
    /// `torrent-reannounce`
    TorrentReannounce,
}

impl Action {
    /// The method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SessionSet => "session-set",
            Self::SessionGet => "session-get",
            Self::SessionStats => "session-stats",
            Self::TorrentRemove => "torrent-remove",
            Self::TorrentAdd => "torrent-add",
            Self::TorrentGet => "torrent-get",
            Self::TorrentStart => "torrent-start",
            Self::TorrentStartNow => "torrent-start-now",
            Self::TorrentStop => "torrent-stop",
            Self::TorrentVerify => "torrent-verify",
            Self::TorrentReannounce => "torrent-reannounce",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One RPC call: `{"method": ..., "arguments": {...}, "tag": ...}`.
///
/// Argument maps arrive already pruned; empty lists and nulls are left out by the
/// builders below, never by the encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Which daemon operation to invoke.
    pub method: Action,
    /// Method arguments.
    #[serde(default)]
    pub arguments: Map<String, Value>,
    /// Correlation id, echoed back by the daemon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<i64>,
}

impl RpcRequest {
    /// A request for `method` without arguments.
    pub fn new(method: Action) -> Self {
        Self {
            method,
            arguments: Map::new(),
            tag: None,
        }
    }

    /// Adds an argument, replacing any previous value under the same key.
    pub fn with_argument(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.to_owned(), value.into());
        self
    }

    /// Sets the correlation tag.
    pub fn with_tag(mut self, tag: i64) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Wire encoding of the request.
    pub fn to_json(&self) -> Result<String, RpcError> {
        Ok(serde_json::to_string(self)?)
    }

    /// `torrent-get` for `fields` (every known field when empty), narrowed to `ids`
    /// when any are given.
    pub fn torrent_get(fields: &[&str], ids: &[TorrentId]) -> Self {
        let fields = if fields.is_empty() {
            ALL_TORRENT_FIELDS
        } else {
            fields
        };
        Self::new(Action::TorrentGet)
            .with_argument("fields", fields.to_vec())
            .with_ids(ids)
    }

    /// `torrent-start`, `torrent-stop`, `torrent-start-now` and friends.
    ///
    /// With no ids the daemon applies the action to every torrent.
    pub fn torrent_action(action: Action, ids: &[TorrentId]) -> Self {
        Self::new(action).with_ids(ids)
    }

    /// `torrent-add` from a file name, URL or magnet link, or from metainfo content.
    pub fn torrent_add(source: &TorrentSource) -> Self {
        let request = Self::new(Action::TorrentAdd);
        match source {
            TorrentSource::Filename(filename) => {
                request.with_argument("filename", filename.as_str())
            }
            TorrentSource::Metainfo(metainfo) => {
                request.with_argument("metainfo", metainfo.as_str())
            }
        }
    }

    /// `torrent-remove`. With no ids nothing is removed.
    pub fn torrent_remove(ids: &[TorrentId], delete_local_data: bool) -> Self {
        Self::new(Action::TorrentRemove)
            .with_argument("delete-local-data", delete_local_data)
            .with_ids(ids)
    }

    /// `session-get`, optionally restricted to `fields`.
    pub fn session_get(fields: Option<&[&str]>) -> Self {
        match fields {
            Some(fields) => {
                Self::new(Action::SessionGet).with_argument("fields", fields.to_vec())
            }
            None => Self::new(Action::SessionGet),
        }
    }

    /// `session-set` carrying only the fields populated on `info`.
    pub fn session_set(info: &SessionInfo) -> Result<Self, RpcError> {
        let arguments = match serde_json::to_value(info)? {
            Value::Object(arguments) => arguments,
            other => {
                return Err(RpcError::Decode(format!(
                    "session info did not encode to an object: {other}"
                )));
            }
        };
        Ok(Self {
            method: Action::SessionSet,
            arguments,
            tag: None,
        })
    }

    /// `session-stats`.
    pub fn session_stats() -> Self {
        Self::new(Action::SessionStats)
    }

    fn with_ids(self, ids: &[TorrentId]) -> Self {
        if ids.is_empty() {
            self
        } else {
            let ids: Vec<Value> = ids
                .iter()
                .map(|id| match id {
                    TorrentId::Id(id) => Value::from(*id),
                    TorrentId::Hash(hash) => Value::from(hash.as_str()),
                })
                .collect();
            self.with_argument("ids", ids)
        }
    }
}

/// Where `torrent-add` takes the torrent from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentSource {
    /// Path on the daemon host, URL of a `.torrent` file, or magnet link.
    Filename(String),
    /// Base64 encoded `.torrent` content.
    Metainfo(String),
}
