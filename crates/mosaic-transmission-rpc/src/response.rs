//! Response envelopes and the typed second decode pass over their arguments.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use mosaic_transmission_types::Torrent;

use crate::RpcError;

/// `result` value of a successful call.
pub const SUCCESS: &str = "success";

/// Decoded reply: `{"result": ..., "arguments": {...}, "tag": ...}`.
///
/// Unknown keys are ignored. The arguments stay untyped until the caller asks for
/// a specific shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcResponse {
    /// `"success"` or a daemon-defined failure description.
    pub result: String,
    /// Method-specific payload.
    #[serde(default)]
    pub arguments: Value,
    /// Correlation id echoed from the request.
    #[serde(default)]
    pub tag: Option<i64>,
}

impl RpcResponse {
    /// Parses a response body.
    pub fn from_json(body: &str) -> Result<Self, RpcError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Whether the daemon reported success.
    pub fn succeeded(&self) -> bool {
        self.result == SUCCESS
    }

    /// Canonical JSON text of the arguments.
    pub fn arguments_text(&self) -> String {
        self.arguments.to_string()
    }

    /// Decodes the whole arguments object as `T`.
    pub fn decode_arguments<T: DeserializeOwned>(&self) -> Result<T, RpcError> {
        self.ensure_succeeded()?;
        Ok(serde_json::from_str(&self.arguments_text())?)
    }

    /// Decodes the value under `key` in the arguments object as `T`.
    pub fn decode_key<T: DeserializeOwned>(&self, key: &str) -> Result<T, RpcError> {
        self.ensure_succeeded()?;
        let value = self
            .arguments
            .get(key)
            .ok_or_else(|| RpcError::Decode(format!("missing `{key}` in response arguments")))?;
        Ok(T::deserialize(value)?)
    }

    /// Decodes the result of `torrent-add`.
    pub fn decode_added(&self) -> Result<AddedTorrent, RpcError> {
        self.ensure_succeeded()?;
        if self.arguments.get(TORRENT_ADDED).is_some() {
            Ok(AddedTorrent::Added(self.decode_key(TORRENT_ADDED)?))
        } else if self.arguments.get(TORRENT_DUPLICATE).is_some() {
            Ok(AddedTorrent::Duplicate(self.decode_key(TORRENT_DUPLICATE)?))
        } else {
            Err(RpcError::Decode(format!(
                "neither `{TORRENT_ADDED}` nor `{TORRENT_DUPLICATE}` in response arguments"
            )))
        }
    }

    fn ensure_succeeded(&self) -> Result<(), RpcError> {
        if self.succeeded() {
            Ok(())
        } else {
            Err(RpcError::Server(self.result.clone()))
        }
    }
}

const TORRENT_ADDED: &str = "torrent-added";
const TORRENT_DUPLICATE: &str = "torrent-duplicate";

/// Outcome of `torrent-add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddedTorrent {
    /// The daemon did not know the torrent yet.
    Added(Torrent),
    /// The daemon already had the torrent; this is the existing one.
    Duplicate(Torrent),
}

impl AddedTorrent {
    /// The torrent, whichever way it was obtained.
    pub fn torrent(&self) -> &Torrent {
        match self {
            Self::Added(torrent) | Self::Duplicate(torrent) => torrent,
        }
    }

    /// Consumes the outcome and returns the torrent.
    pub fn into_torrent(self) -> Torrent {
        match self {
            Self::Added(torrent) | Self::Duplicate(torrent) => torrent,
        }
    }

    /// Whether the daemon already had the torrent.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

#[cfg(test)]
mod tests {
    use mosaic_transmission_types::{SessionStat, TorrentStatus};

    use super::*;
    use crate::testutil::{ADD_DUPLICATE_RESPONSE, ADD_RESPONSE, STATS_RESPONSE, TORRENTS_RESPONSE};

    #[test]
    fn parses_envelope_and_ignores_unknown_keys() {
        let response =
            RpcResponse::from_json(r#"{"result":"success","arguments":{},"tag":5,"extra":[1]}"#)
                .unwrap();
        assert!(response.succeeded());
        assert_eq!(response.tag, Some(5));
        assert_eq!(response.arguments_text(), "{}");
    }

    #[test]
    fn missing_arguments_default_to_null() {
        let response = RpcResponse::from_json(r#"{"result":"no such method"}"#).unwrap();
        assert!(!response.succeeded());
        assert!(response.tag.is_none());
        assert_eq!(response.arguments, Value::Null);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        for body in ["<html>409</html>", r#"{"arguments":{}}"#, ""] {
            match RpcResponse::from_json(body) {
                Err(RpcError::Decode(_)) => {}
                other => panic!("Expected Decode error for {body:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn decodes_torrent_list_under_its_key() {
        let response = RpcResponse::from_json(TORRENTS_RESPONSE).unwrap();
        let torrents: Vec<Torrent> = response.decode_key("torrents").unwrap();
        assert_eq!(torrents.len(), 2);
        assert_eq!(torrents[0].status, Some(TorrentStatus::Downloading));
        assert_eq!(
            torrents[0].added_date.unwrap().timestamp_millis(),
            1_577_836_800_000
        );
    }

    #[test]
    fn bad_status_in_payload_is_a_decode_error() {
        let response = RpcResponse::from_json(
            r#"{"result":"success","arguments":{"torrents":[{"id":1,"status":99}]}}"#,
        )
        .unwrap();
        match response.decode_key::<Vec<Torrent>>("torrents") {
            Err(RpcError::Decode(msg)) => assert!(msg.contains("99"), "{msg}"),
            other => panic!("Expected Decode error, got: {other:?}"),
        }
    }

    #[test]
    fn decodes_whole_arguments_object() {
        let response = RpcResponse::from_json(STATS_RESPONSE).unwrap();
        let stats: SessionStat = response.decode_arguments().unwrap();
        assert_eq!(stats.torrent_count, 2);
    }

    #[test]
    fn failed_result_is_reported_before_decoding() {
        let response =
            RpcResponse::from_json(r#"{"result":"invalid or corrupt torrent file","arguments":{}}"#)
                .unwrap();
        match response.decode_added() {
            Err(RpcError::Server(msg)) => assert_eq!(msg, "invalid or corrupt torrent file"),
            other => panic!("Expected Server error, got: {other:?}"),
        }
    }

    #[test]
    fn add_distinguishes_new_and_duplicate() {
        let added = RpcResponse::from_json(ADD_RESPONSE).unwrap().decode_added().unwrap();
        assert!(!added.is_duplicate());
        assert_eq!(added.torrent().id, Some(3));

        let duplicate = RpcResponse::from_json(ADD_DUPLICATE_RESPONSE)
            .unwrap()
            .decode_added()
            .unwrap();
        assert!(duplicate.is_duplicate());
        assert_eq!(
            duplicate.into_torrent().hash_string.as_deref(),
            Some("5dd7c5e4a1f2e3b4c5d6e7f8091a2b3c4d5e6f70")
        );
    }

    #[test]
    fn add_without_either_key_is_a_decode_error() {
        let response = RpcResponse::from_json(r#"{"result":"success","arguments":{}}"#).unwrap();
        assert!(matches!(response.decode_added(), Err(RpcError::Decode(_))));
    }
}
