//! SSH command executor using russh.
//!
//! Opens one session per call, authenticates with a password, runs the
//! command on an exec channel and collects everything the device writes
//! to stdout until the channel closes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client::{self, Handle};
use russh::{ChannelMsg, Disconnect};
use russh_keys::key::PublicKey;
use tracing::{debug, info, warn};

use crate::domain::{Credentials, DeviceTarget};
use crate::error::{Error, Result};
use crate::ports::CommandExecutor;

/// Default time allowed for TCP connect and key exchange.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Output markers IOS prints instead of running a rejected command.
const FAILED_WHEN_CONTAINS: &[&str] = &[
    "% Invalid input detected",
    "% Incomplete command",
    "% Ambiguous command",
    "% Unknown command",
];

/// Client-side session handler. Accepts every server host key.
struct DeviceHandler;

#[async_trait]
impl client::Handler for DeviceHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        debug!(key_type = ?server_public_key.name(), "Accepting server host key");
        Ok(true)
    }
}

/// [`CommandExecutor`] backed by an SSH exec channel.
pub struct SshExecutor {
    connect_timeout: Duration,
}

impl SshExecutor {
    /// Create an executor with the default connect timeout.
    pub fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set the time allowed for connecting and key exchange.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Connect and authenticate.
    async fn open(
        &self,
        target: &DeviceTarget,
        credentials: &Credentials,
    ) -> Result<Handle<DeviceHandler>> {
        let config = Arc::new(client::Config {
            inactivity_timeout: Some(self.connect_timeout * 3),
            ..Default::default()
        });

        let unreachable = |reason: String| Error::Unreachable {
            host: target.host.clone(),
            reason,
        };

        let addr = (target.host.as_str(), target.port);
        let mut session = tokio::time::timeout(
            self.connect_timeout,
            client::connect(config, addr, DeviceHandler),
        )
        .await
        .map_err(|_| unreachable(format!("no response within {:?}", self.connect_timeout)))?
        .map_err(|e| unreachable(e.to_string()))?;

        let authenticated = session
            .authenticate_password(target.username.as_str(), credentials.secret())
            .await
            .map_err(|e| unreachable(format!("authentication exchange failed: {}", e)))?;

        if !authenticated {
            return Err(Error::AuthenticationFailed {
                host: target.host.clone(),
                username: target.username.clone(),
            });
        }

        info!(device = %target, "SSH session established");
        Ok(session)
    }

    /// Run a command on an open session and collect its stdout.
    async fn run(session: &Handle<DeviceHandler>, command: &str) -> Result<String> {
        let mut channel = session
            .channel_open_session()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to open channel: {}", e)))?;

        channel
            .exec(true, command)
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to run {:?}: {}", command, e)))?;

        let mut stdout = Vec::new();
        let mut exit_status = None;

        while let Some(msg) = channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
                ChannelMsg::ExtendedData { ref data, .. } => {
                    debug!(bytes = data.len(), "Discarding stderr output");
                }
                ChannelMsg::ExitStatus { exit_status: status } => exit_status = Some(status),
                ChannelMsg::Close => break,
                _ => {}
            }
        }

        let output = String::from_utf8_lossy(&stdout).into_owned();

        if let Some(status) = exit_status.filter(|s| *s != 0) {
            return Err(Error::CommandFailed(format!(
                "{:?} exited with status {}",
                command, status
            )));
        }

        check_rejected(command, &output)?;
        Ok(output)
    }
}

/// Detect a device-side rejection of the command.
fn check_rejected(command: &str, output: &str) -> Result<()> {
    match FAILED_WHEN_CONTAINS.iter().find(|m| output.contains(*m)) {
        Some(marker) => Err(Error::CommandFailed(format!(
            "Device rejected {:?}: {}",
            command,
            marker.trim_start_matches("% ")
        ))),
        None => Ok(()),
    }
}

impl Default for SshExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for SshExecutor {
    async fn execute(
        &self,
        target: &DeviceTarget,
        credentials: &Credentials,
        command: &str,
    ) -> Result<String> {
        let session = self.open(target, credentials).await?;
        let result = Self::run(&session, command).await;

        if let Err(e) = session
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
        {
            warn!(device = %target, error = %e, "Failed to close SSH session cleanly");
        }

        if let Ok(ref output) = result {
            info!(device = %target, bytes = output.len(), "Command completed");
        }
        result
    }
}
