//! Folding classified lines into per-port BPDU totals.

use std::collections::HashMap;

use tracing::debug;

use super::classifier::ClassifiedLine;
use super::report::ResultTable;
use crate::error::{Error, Result};

// ============================================================================
// CounterTable
// ============================================================================

/// Running BPDU totals keyed by port label.
///
/// Entries only come into existence through [`CounterTable::add`], so every
/// key has had at least one observation attributed to it. Totals may still
/// be zero; [`ResultTable`] drops those.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterTable {
    counters: HashMap<String, u64>,
}

impl CounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `count` for `port`, or add it to the existing total.
    pub fn add(&mut self, port: &str, count: u64) -> Result<()> {
        match self.counters.get_mut(port) {
            Some(total) => {
                *total = total.checked_add(count).ok_or_else(|| Error::CounterOverflow {
                    port: port.to_string(),
                })?;
            }
            None => {
                self.counters.insert(port.to_string(), count);
            }
        }
        Ok(())
    }

    /// Current total for a port, if it has any observations.
    pub fn get(&self, port: &str) -> Option<u64> {
        self.counters.get(port).copied()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Drop zero totals and freeze the table.
    pub fn into_result(self) -> ResultTable {
        self.counters.into_iter().collect()
    }
}

// ============================================================================
// Aggregator
// ============================================================================

/// Single-pass state machine over classified lines.
///
/// Tracks the most recently declared port and attributes every following
/// BPDU counter to it. One aggregator serves exactly one parse of one
/// device's output.
#[derive(Debug, Default)]
pub struct Aggregator {
    current_port: Option<String>,
    table: CounterTable,
    /// 1-based number of the line most recently fed.
    position: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The port counters are currently attributed to.
    pub fn current_port(&self) -> Option<&str> {
        self.current_port.as_deref()
    }

    /// Apply one classified line.
    ///
    /// Every line of the output, recognized or not, should be fed so that
    /// error positions match the original line numbers.
    pub fn feed(&mut self, line: ClassifiedLine) -> Result<()> {
        self.position += 1;

        match line {
            ClassifiedLine::PortDeclaration { port_label } => {
                debug!(line = self.position, port = %port_label, "Port declared");
                self.current_port = Some(port_label);
            }
            ClassifiedLine::BpduObservation { count } => {
                let port = self.current_port.as_deref().ok_or(Error::ObservationBeforePort {
                    line_number: self.position,
                })?;
                debug!(line = self.position, port = %port, count, "BPDU counter");
                self.table.add(port, count)?;
            }
            ClassifiedLine::Unrecognized => {}
        }

        Ok(())
    }

    /// Finish the pass and keep only ports that received BPDUs.
    pub fn finish(self) -> ResultTable {
        self.table.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(label: &str) -> ClassifiedLine {
        ClassifiedLine::PortDeclaration {
            port_label: label.to_string(),
        }
    }

    fn bpdu(count: u64) -> ClassifiedLine {
        ClassifiedLine::BpduObservation { count }
    }

    fn run(lines: Vec<ClassifiedLine>) -> Result<ResultTable> {
        let mut aggregator = Aggregator::new();
        for line in lines {
            aggregator.feed(line)?;
        }
        Ok(aggregator.finish())
    }

    #[test]
    fn test_counter_table_add() {
        let mut table = CounterTable::new();
        assert!(table.is_empty());

        table.add("Fa0/1", 3).unwrap();
        table.add("Fa0/1", 5).unwrap();
        table.add("Fa0/2", 0).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Fa0/1"), Some(8));
        assert_eq!(table.get("Fa0/2"), Some(0));
        assert_eq!(table.get("Fa0/3"), None);
    }

    #[test]
    fn test_counter_table_overflow() {
        let mut table = CounterTable::new();
        table.add("Fa0/1", u64::MAX).unwrap();
        let err = table.add("Fa0/1", 1).unwrap_err();
        assert!(matches!(err, Error::CounterOverflow { ref port } if port == "Fa0/1"));
    }

    #[test]
    fn test_sums_and_filters_zero_ports() {
        let result = run(vec![
            port("Fa0/1"),
            bpdu(3),
            bpdu(5),
            port("Fa0/2"),
            bpdu(0),
        ])
        .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.get("Fa0/1"), Some(8));
        assert_eq!(result.get("Fa0/2"), None);
    }

    #[test]
    fn test_redeclared_port_keeps_accumulating() {
        // Same port reported again in a later VLAN section.
        let result = run(vec![
            port("Gi0/1"),
            bpdu(4),
            port("Gi0/2"),
            bpdu(1),
            port("Gi0/1"),
            bpdu(6),
        ])
        .unwrap();

        assert_eq!(result.get("Gi0/1"), Some(10));
        assert_eq!(result.get("Gi0/2"), Some(1));
    }

    #[test]
    fn test_observation_before_port() {
        let err = run(vec![ClassifiedLine::Unrecognized, bpdu(3), port("Fa0/1")]).unwrap_err();
        assert!(matches!(err, Error::ObservationBeforePort { line_number: 2 }));
    }

    #[test]
    fn test_port_without_observation_is_absent() {
        let result = run(vec![port("Fa0/1"), port("Fa0/2"), bpdu(7)]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("Fa0/2"), Some(7));
    }

    #[test]
    fn test_empty_port_label_is_a_real_port() {
        let mut aggregator = Aggregator::new();
        aggregator.feed(port("")).unwrap();
        assert_eq!(aggregator.current_port(), Some(""));
        aggregator.feed(bpdu(2)).unwrap();
        assert_eq!(aggregator.finish().get(""), Some(2));
    }

    #[test]
    fn test_unrecognized_lines_do_not_change_result() {
        let plain = run(vec![port("Fa0/1"), bpdu(2), port("Fa0/2"), bpdu(9)]).unwrap();
        let noisy = run(vec![
            ClassifiedLine::Unrecognized,
            port("Fa0/1"),
            ClassifiedLine::Unrecognized,
            bpdu(2),
            port("Fa0/2"),
            ClassifiedLine::Unrecognized,
            bpdu(9),
            ClassifiedLine::Unrecognized,
        ])
        .unwrap();
        assert_eq!(plain, noisy);
    }
}
