//! Session-id negotiation.
//!
//! The daemon answers `409 Conflict` to any request that does not echo its current
//! session id, and hands out the fresh id in the `X-Transmission-Session-Id` header of
//! that reply.

use std::sync::{Mutex, MutexGuard};

use reqwest::header::{HeaderMap, HeaderName};
use tracing::{debug, warn};

/// Header carrying the session id, in both directions.
pub const SESSION_ID_HEADER: HeaderName = HeaderName::from_static("x-transmission-session-id");

/// Holds the last session id handed out by the daemon.
///
/// Starts uninitialized (empty id). Concurrent refreshes race harmlessly: the last
/// writer wins and a stale id only costs one more conflict round trip.
#[derive(Debug, Default)]
pub struct SessionNegotiator {
    token: Mutex<String>,
}

impl SessionNegotiator {
    /// A negotiator without a session id.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id to send with the next request; empty before the first conflict.
    pub fn token(&self) -> String {
        self.lock().clone()
    }

    /// Whether a session id has been obtained.
    pub fn is_initialized(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Stores the id carried by a conflict reply and returns it.
    ///
    /// A reply without the header resets the id to empty, which the next attempt
    /// will send as such.
    pub fn refresh(&self, headers: &HeaderMap) -> String {
        let fresh = headers
            .get(&SESSION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        if fresh.is_empty() {
            warn!("Conflict reply carried no session id");
        } else {
            debug!("Session id refreshed");
        }
        *self.lock() = fresh.clone();
        fresh
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        // The guarded value is a plain string, so a poisoned lock still holds a usable id.
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn starts_uninitialized() {
        let negotiator = SessionNegotiator::new();
        assert!(!negotiator.is_initialized());
        assert_eq!(negotiator.token(), "");
    }

    #[test]
    fn refresh_stores_header_value() {
        let negotiator = SessionNegotiator::new();
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_ID_HEADER, HeaderValue::from_static("abc123"));

        assert_eq!(negotiator.refresh(&headers), "abc123");
        assert!(negotiator.is_initialized());
        assert_eq!(negotiator.token(), "abc123");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let negotiator = SessionNegotiator::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-Transmission-Session-Id").unwrap(),
            HeaderValue::from_static("Mixed"),
        );
        assert_eq!(negotiator.refresh(&headers), "Mixed");
    }

    #[test]
    fn newer_id_overwrites_older_one() {
        let negotiator = SessionNegotiator::new();
        for id in ["first", "second"] {
            let mut headers = HeaderMap::new();
            headers.insert(SESSION_ID_HEADER, HeaderValue::from_static(id));
            negotiator.refresh(&headers);
        }
        assert_eq!(negotiator.token(), "second");
    }

    #[test]
    fn conflict_without_header_resets_the_id() {
        let negotiator = SessionNegotiator::new();
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_ID_HEADER, HeaderValue::from_static("abc"));
        negotiator.refresh(&headers);

        negotiator.refresh(&HeaderMap::new());
        assert!(!negotiator.is_initialized());
    }
}
