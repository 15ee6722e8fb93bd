//! BPDU collection application service.

use tracing::{info, warn};

use crate::domain::{parse, Credentials, DeviceTarget, ResultTable, SPANNING_TREE_COMMAND};
use crate::error::Result;
use crate::ports::CommandExecutor;

/// Result of collecting from one device in a batch.
#[derive(Debug)]
pub struct DeviceOutcome {
    pub target: DeviceTarget,
    pub result: Result<ResultTable>,
}

/// Application service for collecting BPDU counters.
///
/// Runs the spanning-tree command through a [`CommandExecutor`] and parses
/// the output. Each call parses with its own aggregator, so nothing is
/// shared between devices.
pub struct BpduService<E: CommandExecutor> {
    executor: E,
}

impl<E: CommandExecutor> BpduService<E> {
    /// Create a new service with the given executor.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Collect the non-zero BPDU counters of one device.
    ///
    /// Connection and authentication failures are returned as-is; the output
    /// is only parsed when the command succeeded.
    pub async fn collect(
        &self,
        target: &DeviceTarget,
        credentials: &Credentials,
    ) -> Result<ResultTable> {
        let output = self
            .executor
            .execute(target, credentials, SPANNING_TREE_COMMAND)
            .await?;

        let table = parse(&output)?;
        info!(device = %target, ports = table.len(), "Collected BPDU counters");
        Ok(table)
    }

    /// Collect from several devices one after another.
    ///
    /// A failing device is logged and recorded in its outcome; the remaining
    /// devices are still collected.
    pub async fn collect_all(
        &self,
        targets: impl IntoIterator<Item = DeviceTarget>,
        credentials: &Credentials,
    ) -> Vec<DeviceOutcome> {
        let mut outcomes = Vec::new();

        for target in targets {
            let result = self.collect(&target, credentials).await;
            if let Err(ref e) = result {
                warn!(device = %target, error = %e, "Collection failed");
            }
            outcomes.push(DeviceOutcome { target, result });
        }

        outcomes
    }
}
