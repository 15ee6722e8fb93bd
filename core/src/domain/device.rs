//! Connection parameters for a switch.

use serde::{Deserialize, Serialize};

/// Default SSH port.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// A switch to collect counters from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceTarget {
    /// Hostname or IP address.
    pub host: String,
    /// SSH port.
    pub port: u16,
    /// SSH username.
    pub username: String,
}

impl DeviceTarget {
    /// Create a target on the default SSH port.
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            username: username.into(),
        }
    }

    /// Use a non-standard SSH port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

impl std::fmt::Display for DeviceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.port == DEFAULT_SSH_PORT {
            write!(f, "{}@{}", self.username, self.host)
        } else {
            write!(f, "{}@{}:{}", self.username, self.host, self.port)
        }
    }
}

/// Secret half of the connection parameters. Never logged or persisted.
#[derive(Clone)]
pub struct Credentials {
    password: String,
}

impl Credentials {
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &"<redacted>")
            .finish()
    }
}
