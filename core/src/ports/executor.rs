//! Remote command execution port (interface).

use crate::domain::{Credentials, DeviceTarget};
use crate::error::Result;

/// Port for running a single command on a network device.
///
/// Implementations own session setup and teardown. They must report a
/// device that cannot be contacted as [`Error::Unreachable`] and rejected
/// credentials as [`Error::AuthenticationFailed`] so callers can report
/// per device.
///
/// [`Error::Unreachable`]: crate::error::Error::Unreachable
/// [`Error::AuthenticationFailed`]: crate::error::Error::AuthenticationFailed
pub trait CommandExecutor: Send + Sync {
    /// Execute `command` and return its raw text output.
    fn execute(
        &self,
        target: &DeviceTarget,
        credentials: &Credentials,
        command: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
