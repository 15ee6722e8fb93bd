//! Example: Parse saved spanning-tree output and display the report.

use bpdu_finder_core::domain::DEFAULT_LABEL_WIDTH;
use bpdu_finder_core::parse;

const OUTPUT: &str = "\
 Port 1 (FastEthernet0/1) of VLAN0001 is designated forwarding
   BPDU: sent 1520, received 0
 Port 2 (FastEthernet0/2) of VLAN0001 is root forwarding
   BPDU: sent 2, received 1517
 Port 24 (GigabitEthernet0/1) of VLAN0001 is designated forwarding
   BPDU: sent 1519, received 3
";

fn main() {
    match parse(OUTPUT) {
        Ok(table) => {
            if table.is_empty() {
                println!("No ports received BPDUs.");
                return;
            }

            println!("{:<width$} - BPDUS", "PORT", width = DEFAULT_LABEL_WIDTH);
            println!("{}", "-".repeat(DEFAULT_LABEL_WIDTH + 10));
            println!("{}", table.render(DEFAULT_LABEL_WIDTH));
            println!("\nTotal: {} BPDUs on {} ports", table.total(), table.len());
        }
        Err(e) => {
            eprintln!("Error parsing output: {}", e);
        }
    }
}
