//! Line classification for `show spanning-tree detail` output.
//!
//! The filtered command output interleaves two line shapes of interest with
//! unrelated text:
//!
//! ```text
//!  Port 1 (FastEthernet0/1) of VLAN0001 is designated forwarding
//!    BPDU: sent 1520, received 0
//! ```
//!
//! Each line is split into a leading keyword and a remainder. Only lines
//! whose keyword is `Port` or `BPDU:` are matched against a regex.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Remainder of a `Port` line: `<number> (<label>)...`
static PORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+ \((.+)\)").expect("port pattern is valid"));

/// Remainder of a `BPDU:` line: `... received <count>`
static BPDU_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+ received (\d+)$").expect("BPDU pattern is valid"));

const PORT_KEYWORD: &str = "Port";
const BPDU_KEYWORD: &str = "BPDU:";

/// One line of command output after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// Introduces a new current port.
    PortDeclaration { port_label: String },
    /// A received-BPDU counter for the current port.
    BpduObservation { count: u64 },
    /// Any other text.
    Unrecognized,
}

/// A line that carries a known keyword but not the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    PortLine,
    ObservationLine,
}

impl Malformed {
    /// Attach the position and text of the offending line.
    pub fn at(self, line_number: usize, line: &str) -> Error {
        let line = line.to_string();
        match self {
            Malformed::PortLine => Error::MalformedPortLine { line_number, line },
            Malformed::ObservationLine => Error::MalformedObservationLine { line_number, line },
        }
    }
}

/// Split a trimmed line into its keyword and optional remainder.
///
/// Runs of whitespace between the two are collapsed, so `"Port  3 (x)"`
/// yields `("Port", Some("3 (x)"))`.
fn split_keyword(line: &str) -> (&str, Option<&str>) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => {
            let rest = rest.trim_start();
            (keyword, (!rest.is_empty()).then_some(rest))
        }
        None => (line, None),
    }
}

/// Classify a single line of output.
///
/// Lines are trimmed before inspection. A known keyword followed by a
/// remainder of the wrong shape is reported as [`Malformed`], never skipped.
pub fn classify(line: &str) -> std::result::Result<ClassifiedLine, Malformed> {
    match split_keyword(line) {
        (PORT_KEYWORD, Some(rest)) => {
            let caps = PORT_PATTERN.captures(rest).ok_or(Malformed::PortLine)?;
            Ok(ClassifiedLine::PortDeclaration {
                port_label: caps[1].to_string(),
            })
        }
        (BPDU_KEYWORD, Some(rest)) => {
            let caps = BPDU_PATTERN.captures(rest).ok_or(Malformed::ObservationLine)?;
            // Digits only, so the sole failure mode is a value beyond u64.
            let count = caps[1].parse().map_err(|_| Malformed::ObservationLine)?;
            Ok(ClassifiedLine::BpduObservation { count })
        }
        _ => Ok(ClassifiedLine::Unrecognized),
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

    #[test]
    fn test_classify_port_line() {
        assert_eq!(
            classify("Port  3 (GigabitEthernet0/3)"),
            Ok(port("GigabitEthernet0/3"))
        );
    }

    #[test]
    fn test_classify_port_line_with_vlan_suffix() {
        let line = " Port 1 (FastEthernet0/1) of VLAN0001 is designated forwarding ";
        assert_eq!(classify(line), Ok(port("FastEthernet0/1")));
    }

    #[test]
    fn test_classify_bpdu_line() {
        assert_eq!(
            classify("BPDU: 0, received 12"),
            Ok(ClassifiedLine::BpduObservation { count: 12 })
        );
        assert_eq!(
            classify("   BPDU: sent 1520, received 0"),
            Ok(ClassifiedLine::BpduObservation { count: 0 })
        );
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(
            classify("Root ID    Priority 32768"),
            Ok(ClassifiedLine::Unrecognized)
        );
        assert_eq!(classify(""), Ok(ClassifiedLine::Unrecognized));
        assert_eq!(classify("   "), Ok(ClassifiedLine::Unrecognized));
        // Keyword match is exact and case-sensitive.
        assert_eq!(classify("port 1 (Fa0/1)"), Ok(ClassifiedLine::Unrecognized));
        assert_eq!(classify("BPDU 0, received 2"), Ok(ClassifiedLine::Unrecognized));
    }

    #[test]
    fn test_keyword_without_remainder_is_unrecognized() {
        assert_eq!(classify("Port"), Ok(ClassifiedLine::Unrecognized));
        assert_eq!(classify("  BPDU:   "), Ok(ClassifiedLine::Unrecognized));
    }

    #[test]
    fn test_malformed_port_line() {
        assert_eq!(classify("Port abc"), Err(Malformed::PortLine));
        assert_eq!(classify("Port 1 Fa0/1"), Err(Malformed::PortLine));
    }

    #[test]
    fn test_malformed_bpdu_line() {
        assert_eq!(classify("BPDU: sent 10"), Err(Malformed::ObservationLine));
        assert_eq!(
            classify("BPDU: sent 1, received many"),
            Err(Malformed::ObservationLine)
        );
        assert_eq!(
            classify("BPDU: sent 0, received 99999999999999999999999"),
            Err(Malformed::ObservationLine)
        );
    }

    #[test]
    fn test_malformed_at_builds_error() {
        let err = Malformed::PortLine.at(4, "Port abc");
        assert!(matches!(
            err,
            Error::MalformedPortLine { line_number: 4, ref line } if line == "Port abc"
        ));
    }
}
