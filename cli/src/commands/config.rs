//! Config command - show or initialize the configuration file.

use anyhow::{bail, Result};
use bpdu_finder_core::ConfigStore;

pub async fn show(json: bool) -> Result<()> {
    let store = ConfigStore::new()?;
    let config = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file:     {}", store.path().display());
    println!(
        "Username:        {}",
        config.username.as_deref().unwrap_or("(prompt)")
    );
    println!("SSH port:        {}", config.ssh_port);
    println!("Connect timeout: {}s", config.connect_timeout_secs);
    println!("Label width:     {}", config.label_width);
    Ok(())
}

pub async fn init(force: bool) -> Result<()> {
    let store = ConfigStore::new()?;

    if store.path().exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            store.path().display()
        );
    }

    store.save(&Default::default()).await?;
    println!("Wrote default configuration to {}", store.path().display());
    Ok(())
}
