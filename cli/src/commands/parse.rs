//! Parse command - report BPDU counters from saved command output.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpdu_finder_core::{parse, ConfigStore};
use tokio::io::AsyncReadExt;

pub async fn run(file: Option<PathBuf>, json: bool) -> Result<()> {
    let output = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    let table = parse(&output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table.entries())?);
        return Ok(());
    }

    let config = ConfigStore::new()?.load().await?;
    super::print_table(&table, config.label_width);
    Ok(())
}
