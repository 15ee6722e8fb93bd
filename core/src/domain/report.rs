//! Final per-port BPDU report and its text rendering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default width of the port label column.
pub const DEFAULT_LABEL_WIDTH: usize = 30;

// ============================================================================
// PortCounter
// ============================================================================

/// A port that received BPDUs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortCounter {
    /// Interface label as printed by the device (e.g. `FastEthernet0/1`).
    pub port: String,
    /// Total BPDUs received across all reported sections.
    pub bpdus: u64,
}

impl std::fmt::Display for PortCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_entry(&self.port, self.bpdus, DEFAULT_LABEL_WIDTH))
    }
}

// ============================================================================
// ResultTable
// ============================================================================

/// Ports with a non-zero BPDU total, ordered by label.
///
/// Built by collecting `(port, count)` pairs; zero counts are dropped on the
/// way in, so collecting an existing table again yields the same table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    counters: BTreeMap<String, u64>,
}

impl FromIterator<(String, u64)> for ResultTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counters: iter.into_iter().filter(|(_, count)| *count > 0).collect(),
        }
    }
}

impl ResultTable {
    /// BPDU total for a port, if it received any.
    pub fn get(&self, port: &str) -> Option<u64> {
        self.counters.get(port).copied()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Iterate `(port, count)` in ascending port label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counters.iter().map(|(port, count)| (port.as_str(), *count))
    }

    /// Sum of all port totals.
    pub fn total(&self) -> u64 {
        self.counters.values().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    /// Owned entries in ascending port label order.
    pub fn entries(&self) -> Vec<PortCounter> {
        self.iter()
            .map(|(port, bpdus)| PortCounter {
                port: port.to_string(),
                bpdus,
            })
            .collect()
    }

    /// Render one line per port using the given label column width.
    pub fn render(&self, label_width: usize) -> String {
        self.iter()
            .map(|(port, count)| format_entry(port, count, label_width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format a report line: `<label padded to width> - <count>`.
///
/// Labels longer than the column are cut and end with an ellipsis.
pub fn format_entry(port: &str, count: u64, label_width: usize) -> String {
    format!("{:<width$} - {}", truncate(port, label_width), count, width = label_width)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max == 0 {
        String::new()
    } else {
        let head: String = s.chars().take(max - 1).collect();
        format!("{}…", head)
    }
}
