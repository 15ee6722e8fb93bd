//! Parsing raw command output into a [`ResultTable`].

use super::aggregator::Aggregator;
use super::classifier::classify;
use super::report::ResultTable;
use crate::error::Result;

/// Command whose output [`parse`] understands.
///
/// Restricts `show spanning-tree detail` to the port headers (which end in
/// the port state, e.g. `forwarding`) and the BPDU counter lines.
pub const SPANNING_TREE_COMMAND: &str = "show spanning-tree detail | i forwarding|BPDU";

/// Parse the output of [`SPANNING_TREE_COMMAND`].
///
/// Fails on the first malformed line or on a counter that precedes every
/// port declaration; no partial table is returned in that case.
pub fn parse(raw_output: &str) -> Result<ResultTable> {
    let mut aggregator = Aggregator::new();

    for (index, line) in raw_output.lines().enumerate() {
        let classified = classify(line).map_err(|m| m.at(index + 1, line.trim()))?;
        aggregator.feed(classified)?;
    }

    Ok(aggregator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const SAMPLE_OUTPUT: &str = "\
 Port 1 (FastEthernet0/1) of VLAN0001 is designated forwarding
   BPDU: sent 1520, received 0
 Port 2 (FastEthernet0/2) of VLAN0001 is root forwarding
   BPDU: sent 2, received 1517
 Port 24 (GigabitEthernet0/1) of VLAN0001 is designated forwarding
   BPDU: sent 1519, received 3
 Port 2 (FastEthernet0/2) of VLAN0010 is root forwarding
   BPDU: sent 0, received 1500
";

    #[test]
    fn test_parse_end_to_end() {
        let input = "Port 1 (Fa0/1)\nBPDU: 0, received 2\nPort 2 (Fa0/2)\nBPDU: 0, received 0";
        let result = parse(input).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("Fa0/1"), Some(2));
    }

    #[test]
    fn test_parse_device_output() {
        let result = parse(SAMPLE_OUTPUT).unwrap();
        let entries: Vec<(&str, u64)> = result.iter().collect();
        assert_eq!(
            entries,
            vec![("FastEthernet0/2", 3017), ("GigabitEthernet0/1", 3)]
        );
    }

    #[test]
    fn test_parse_handles_crlf() {
        let input = "Port 1 (Fa0/1)\r\nBPDU: 0, received 2\r\n";
        assert_eq!(parse(input).unwrap().get("Fa0/1"), Some(2));
    }

    #[test]
    fn test_parse_ignores_unrelated_lines() {
        let plain = "Port 1 (Fa0/1)\nBPDU: 0, received 2\nPort 2 (Fa0/2)\nBPDU: 0, received 5";
        let noisy = "Root ID    Priority 32768\n\
                     Port 1 (Fa0/1)\n\
                     Hello Time   2 sec  Max Age 20 sec\n\
                     BPDU: 0, received 2\n\
                     \n\
                     Port 2 (Fa0/2)\n\
                     BPDU: 0, received 5\n\
                     Bridge ID  Priority 32769";
        assert_eq!(parse(plain).unwrap(), parse(noisy).unwrap());
    }

    #[test]
    fn test_parse_malformed_port_line() {
        let err = parse("Port 1 (Fa0/1)\nBPDU: 0, received 2\n  Port abc  ").unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedPortLine { line_number: 3, ref line } if line == "Port abc"
        ));
    }

    #[test]
    fn test_parse_malformed_bpdu_line() {
        let err = parse("Port 1 (Fa0/1)\nBPDU: sent 4").unwrap_err();
        assert!(matches!(err, Error::MalformedObservationLine { line_number: 2, .. }));
    }

    #[test]
    fn test_parse_observation_before_port() {
        let err = parse("BPDU: 0, received 2\nPort 1 (Fa0/1)").unwrap_err();
        assert!(matches!(err, Error::ObservationBeforePort { line_number: 1 }));
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse("").unwrap().is_empty());
    }
}
