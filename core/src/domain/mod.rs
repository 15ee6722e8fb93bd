//! Domain layer - Pure parsing logic and data models.
//!
//! This module turns spanning-tree command output into per-port BPDU totals.
//! These types have no I/O dependencies and can be tested in isolation.

mod aggregator;
mod classifier;
mod device;
mod parser;
mod report;

// Re-export all domain types
pub use aggregator::{Aggregator, CounterTable};
pub use classifier::{classify, ClassifiedLine, Malformed};
pub use device::{Credentials, DeviceTarget, DEFAULT_SSH_PORT};
pub use parser::{parse, SPANNING_TREE_COMMAND};
pub use report::{format_entry, PortCounter, ResultTable, DEFAULT_LABEL_WIDTH};
