//! BPDU Finder Core Library
//!
//! Finds switch ports that receive spanning-tree BPDUs.
//! Provides functionality to:
//! - Run `show spanning-tree detail` on a switch over SSH
//! - Parse the output into per-port received-BPDU totals
//! - Manage connection defaults
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Line classification, counter aggregation and reports
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Example
//! ```
//! use bpdu_finder_core::parse;
//!
//! let output = "Port 1 (Fa0/1)\nBPDU: 0, received 2\nPort 2 (Fa0/2)\nBPDU: 0, received 0";
//! let table = parse(output).unwrap();
//! assert_eq!(table.get("Fa0/1"), Some(2));
//! assert_eq!(table.get("Fa0/2"), None);
//! ```

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{
    parse, ClassifiedLine, Credentials, DeviceTarget, PortCounter, ResultTable,
    SPANNING_TREE_COMMAND,
};

// Re-export other commonly used types
pub use adapters::SshExecutor;
pub use application::{BpduService, DeviceOutcome};
pub use config::{Config, ConfigStore};
pub use error::{Error, Result};
pub use ports::CommandExecutor;
