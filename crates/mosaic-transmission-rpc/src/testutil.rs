//! Shared test utilities and fixtures.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::ops::{HttpRequest, HttpResponse};
use crate::session::SESSION_ID_HEADER;

pub(crate) const TORRENTS_RESPONSE: &str = r#"{
  "result": "success",
  "arguments": {
    "torrents": [
      {
        "id": 1,
        "name": "debian-12.5.0-amd64-netinst.iso",
        "hashString": "2b66980093bc11806fab50cb3cb41835b95a0362",
        "magnetLink": "magnet:?xt=urn:btih:2b66980093bc11806fab50cb3cb41835b95a0362",
        "status": 4,
        "addedDate": 1577836800,
        "percentDone": 0.5,
        "errorString": ""
      },
      {
        "id": 2,
        "name": "archlinux-2024.03.01-x86_64.iso",
        "hashString": "a492f8b92a25b0399c87715fc228c864ac5a7bfb",
        "magnetLink": "magnet:?xt=urn:btih:a492f8b92a25b0399c87715fc228c864ac5a7bfb",
        "status": 0,
        "addedDate": "1577836900",
        "percentDone": 1.0,
        "errorString": "Tracker gave HTTP response code 404"
      }
    ]
  }
}"#;

pub(crate) const EMPTY_TORRENTS_RESPONSE: &str =
    r#"{"result":"success","arguments":{"torrents":[]}}"#;

pub(crate) const ADD_RESPONSE: &str = r#"{
  "result": "success",
  "arguments": {
    "torrent-added": {
      "id": 3,
      "name": "ubuntu-24.04-desktop-amd64.iso",
      "hashString": "3f9aac158c7de8dfcab171ea58a17aabdf7fbc93"
    }
  }
}"#;

pub(crate) const ADD_DUPLICATE_RESPONSE: &str = r#"{
  "result": "success",
  "arguments": {
    "torrent-duplicate": {
      "id": 1,
      "name": "debian-12.5.0-amd64-netinst.iso",
      "hashString": "5dd7c5e4a1f2e3b4c5d6e7f8091a2b3c4d5e6f70"
    }
  }
}"#;

pub(crate) const STATS_RESPONSE: &str = r#"{
  "result": "success",
  "arguments": {
    "activeTorrentCount": 1,
    "cumulative-stats": {
      "downloadedBytes": 1000,
      "filesAdded": 5,
      "secondsActive": 3600,
      "sessionCount": 10,
      "uploadedBytes": 500
    },
    "current-stats": {
      "downloadedBytes": 100,
      "filesAdded": 1,
      "secondsActive": 600,
      "sessionCount": 1,
      "uploadedBytes": 50
    },
    "downloadSpeed": 1000,
    "pausedTorrentCount": 1,
    "torrentCount": 2,
    "uploadSpeed": 500
  }
}"#;

pub(crate) const SESSION_RESPONSE: &str = r#"{
  "result": "success",
  "arguments": {
    "alt-speed-enabled": false,
    "download-dir": "/var/lib/transmission/downloads",
    "download-queue-size": 5,
    "rpc-version": 17,
    "seedRatioLimit": 2.0,
    "version": "4.0.5 (a6fe2a64aa)"
  }
}"#;

pub(crate) const SUCCESS_RESPONSE: &str = r#"{"result":"success","arguments":{}}"#;

/// A 200 reply carrying `body`.
pub(crate) fn ok(body: &str) -> HttpResponse {
    HttpResponse {
        status: StatusCode::OK,
        headers: HeaderMap::new(),
        body: body.to_string(),
    }
}

/// A 409 reply handing out `session_id`.
pub(crate) fn conflict(session_id: &str) -> HttpResponse {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(session_id) {
        headers.insert(SESSION_ID_HEADER, value);
    }
    HttpResponse {
        status: StatusCode::CONFLICT,
        headers,
        body: "<h1>409: Conflict</h1>".to_string(),
    }
}

/// Session id header of a captured request, `<missing>` when absent.
pub(crate) fn session_id(request: &HttpRequest) -> &str {
    request
        .headers
        .get(SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("<missing>")
}
