//! Client construction options.

use std::{env, fmt, time::Duration};

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "http://localhost:9091";

/// How many times a request is re-sent after the daemon rejects the session id.
pub const DEFAULT_MAX_SESSION_RETRIES: u32 = 3;

const HOST_VAR: &str = "TRANSMISSION_HOST";
const USER_VAR: &str = "TRANSMISSION_USER";
const PASSWORD_VAR: &str = "TRANSMISSION_PASSWORD";
const TIMEOUT_VAR: &str = "TRANSMISSION_TIMEOUT_SECS";

/// Configuration for a [`TransmissionClient`](crate::TransmissionClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `scheme://host[:port][/path]`, resolved to the RPC URL once per client.
    pub host: String,
    /// Basic auth user. No `Authorization` header is sent while this is empty.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Upper bound for a single HTTP exchange. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Re-sends allowed after a session-id conflict before giving up.
    pub max_session_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            username: String::new(),
            password: String::new(),
            timeout: None,
            max_session_retries: DEFAULT_MAX_SESSION_RETRIES,
        }
    }
}

impl ClientConfig {
    /// Configuration for `host` without credentials.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Sets the basic auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets the per-exchange timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many conflict retries a single call may use.
    pub fn with_max_session_retries(mut self, retries: u32) -> Self {
        self.max_session_retries = retries;
        self
    }

    /// Tries to read the configuration from the environment.
    ///
    /// Reads `TRANSMISSION_HOST`, `TRANSMISSION_USER`, `TRANSMISSION_PASSWORD` and
    /// `TRANSMISSION_TIMEOUT_SECS`; anything unset keeps its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup(HOST_VAR).unwrap_or(defaults.host),
            username: lookup(USER_VAR).unwrap_or_default(),
            password: lookup(PASSWORD_VAR).unwrap_or_default(),
            timeout: lookup(TIMEOUT_VAR)
                .and_then(|secs| secs.trim().parse::<u64>().ok())
                .map(Duration::from_secs),
            max_session_retries: defaults.max_session_retries,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credentials.
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field(
                "password",
                &if self.password.is_empty() {
                    "<unset>"
                } else {
                    "<set>"
                },
            )
            .field("timeout", &self.timeout)
            .field("max_session_retries", &self.max_session_retries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "http://localhost:9091");
        assert!(config.username.is_empty());
        assert!(config.password.is_empty());
        assert_eq!(config.timeout, None);
        assert_eq!(config.max_session_retries, 3);
    }

    #[test]
    fn builder_methods() {
        let config = ClientConfig::new("http://nas:9091")
            .with_credentials("admin", "hunter2")
            .with_timeout(Duration::from_secs(10))
            .with_max_session_retries(1);
        assert_eq!(config.host, "http://nas:9091");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.max_session_retries, 1);
    }

    #[test]
    fn lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TRANSMISSION_HOST", "http://seedbox:9091/transmission/rpc"),
            ("TRANSMISSION_USER", "admin"),
            ("TRANSMISSION_PASSWORD", "secret"),
            ("TRANSMISSION_TIMEOUT_SECS", " 30 "),
        ]);
        let config = ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.host, "http://seedbox:9091/transmission/rpc");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn lookup_falls_back_to_defaults() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "TRANSMISSION_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn debug_never_prints_the_password() {
        let config = ClientConfig::new("http://localhost:9091").with_credentials("admin", "hunter2");
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<set>"));
        assert!(format!("{:?}", ClientConfig::default()).contains("<unset>"));
    }
}
