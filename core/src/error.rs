//! Error types for the bpdu-finder-core library.

use thiserror::Error;

/// Result type alias for bpdu-finder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while collecting or parsing BPDU counters.
#[derive(Error, Debug)]
pub enum Error {
    /// The device could not be reached (refused, timed out, transport failure).
    #[error("Device {host} is unreachable: {reason}")]
    Unreachable { host: String, reason: String },

    /// The device rejected the supplied credentials.
    #[error("Authentication failed for {username}@{host}")]
    AuthenticationFailed { host: String, username: String },

    /// The remote command could not be executed on an open session.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// A `Port` line whose remainder is not `<digits> (<label>)`.
    #[error("Malformed port line {line_number}: {line:?}")]
    MalformedPortLine { line_number: usize, line: String },

    /// A `BPDU:` line whose remainder does not end in `received <digits>`.
    #[error("Malformed BPDU line {line_number}: {line:?}")]
    MalformedObservationLine { line_number: usize, line: String },

    /// A BPDU counter arrived before any port was declared.
    #[error("BPDU counter on line {line_number} precedes any port declaration")]
    ObservationBeforePort { line_number: usize },

    /// The accumulated counter for a port no longer fits in a `u64`.
    #[error("BPDU counter overflow on port {port}")]
    CounterOverflow { port: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error comes from talking to the device rather than from
    /// parsing its output.
    ///
    /// Device errors are reported per device and do not abort a batch.
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            Error::Unreachable { .. } | Error::AuthenticationFailed { .. } | Error::CommandFailed(_)
        )
    }

    /// Whether this error means the command output did not follow the
    /// expected grammar.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedPortLine { .. }
                | Error::MalformedObservationLine { .. }
                | Error::ObservationBeforePort { .. }
                | Error::CounterOverflow { .. }
        )
    }
}
