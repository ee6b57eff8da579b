//! Derives the RPC URL from a loosely specified host string.

use tracing::debug;
use url::Url;

use crate::RpcError;

/// Path suffix every RPC endpoint ends with.
pub const RPC_SUFFIX: &str = "/rpc";

/// Path appended when the host string carries no path at all.
pub const DEFAULT_SUFFIX: &str = "/transmission/rpc";

/// Resolves `host` (`scheme://host[:port][/path]`) to the daemon's RPC URL.
///
/// - `scheme://host` and `scheme://host:port` get [`DEFAULT_SUFFIX`].
/// - Strings that already contain `/rpc` are used unchanged.
/// - Any other path gets [`RPC_SUFFIX`] appended.
///
/// A single trailing `/` is ignored. Resolving an already resolved URL returns it
/// unchanged. No network access happens here.
pub fn resolve_endpoint(host: &str) -> Result<Url, RpcError> {
    let parsed = Url::parse(host)
        .map_err(|e| RpcError::InvalidEndpoint(format!("{host:?}: {e}")))?;
    if parsed.host_str().is_none() {
        return Err(RpcError::InvalidEndpoint(format!("{host:?}: missing host")));
    }

    let trimmed = host.strip_suffix('/').unwrap_or(host);
    let has_path = trimmed
        .split_once("://")
        .is_some_and(|(_, rest)| rest.contains(['/', '?', '#']));

    let resolved = if !has_path {
        format!("{trimmed}{DEFAULT_SUFFIX}")
    } else if trimmed.contains(RPC_SUFFIX) {
        trimmed.to_owned()
    } else {
        format!("{trimmed}{RPC_SUFFIX}")
    };

    debug!("Resolved RPC endpoint {host} -> {resolved}");
    Ok(Url::parse(&resolved)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(host: &str) -> String {
        resolve_endpoint(host).unwrap().to_string()
    }

    #[test]
    fn bare_host_gets_default_suffix() {
        assert_eq!(resolved("http://localhost"), "http://localhost/transmission/rpc");
        assert_eq!(
            resolved("http://localhost:9091"),
            "http://localhost:9091/transmission/rpc"
        );
        assert_eq!(
            resolved("https://seedbox.example.com:8443"),
            "https://seedbox.example.com:8443/transmission/rpc"
        );
    }

    #[test]
    fn host_with_rpc_is_unchanged() {
        assert_eq!(resolved("http://localhost/rpc"), "http://localhost/rpc");
        assert_eq!(
            resolved("http://localhost:9091/transmission/rpc"),
            "http://localhost:9091/transmission/rpc"
        );
    }

    #[test]
    fn custom_path_gets_rpc_suffix() {
        assert_eq!(
            resolved("http://localhost:9091/customContext"),
            "http://localhost:9091/customContext/rpc"
        );
        assert_eq!(
            resolved("http://localhost/customContext"),
            "http://localhost/customContext/rpc"
        );
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(resolved("http://localhost:9091/"), "http://localhost:9091/transmission/rpc");
        assert_eq!(resolved("http://localhost/custom/"), "http://localhost/custom/rpc");
    }

    #[test]
    fn resolution_is_idempotent() {
        for host in [
            "http://localhost",
            "http://localhost:9091",
            "http://localhost:9091/customContext",
            "http://10.0.0.2:9091/rpc",
        ] {
            let once = resolved(host);
            assert_eq!(resolved(&once), once, "{host}");
        }
    }

    #[test]
    fn malformed_hosts_are_rejected() {
        for host in ["not-a-valid-url", "localhost:9091", "mailto:someone@example.com", ""] {
            match resolve_endpoint(host) {
                Err(RpcError::InvalidEndpoint(_)) => {}
                other => panic!("Expected InvalidEndpoint for {host:?}, got: {other:?}"),
            }
        }
    }
}
