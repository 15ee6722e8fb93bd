//! CLI subcommands.

pub mod config;
pub mod parse;
pub mod scan;

use bpdu_finder_core::ResultTable;

/// Print a table in the text report format.
pub fn print_table(table: &ResultTable, label_width: usize) {
    if table.is_empty() {
        println!("No ports received BPDUs.");
        return;
    }
    println!("{}", table.render(label_width));
}
