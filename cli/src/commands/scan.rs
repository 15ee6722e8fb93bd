//! Scan command - collect BPDU counters from switches.

use std::time::Duration;

use anyhow::{bail, Result};
use bpdu_finder_core::{
    BpduService, ConfigStore, Credentials, DeviceOutcome, DeviceTarget, Error, PortCounter,
    SshExecutor,
};
use serde::Serialize;

use crate::prompt;

/// Environment variable that supplies the SSH password non-interactively.
const PASSWORD_ENV: &str = "BPDU_FINDER_PASSWORD";

pub struct ScanOptions {
    pub hosts: Vec<String>,
    pub username: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<u64>,
}

/// JSON report for one device.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceReport {
    host: String,
    collected_at: String,
    ports: Vec<PortCounter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&DeviceOutcome> for DeviceReport {
    fn from(outcome: &DeviceOutcome) -> Self {
        let (ports, error) = match &outcome.result {
            Ok(table) => (table.entries(), None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };
        Self {
            host: outcome.target.host.clone(),
            collected_at: chrono::Local::now().to_rfc3339(),
            ports,
            error,
        }
    }
}

pub async fn run(opts: ScanOptions, json: bool) -> Result<()> {
    let config = ConfigStore::new()?.load().await?;

    let username = match opts.username.or(config.username.clone()) {
        Some(u) => u,
        None => prompt::read_line("Your SSH username: ")?,
    };
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(p) => p,
        Err(_) => prompt::read_password("Your SSH password: ")?,
    };
    let credentials = Credentials::password(password);

    let port = opts.port.unwrap_or(config.ssh_port);
    let timeout = opts
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.connect_timeout());

    let targets: Vec<DeviceTarget> = opts
        .hosts
        .iter()
        .map(|host| DeviceTarget::new(host.as_str(), username.as_str()).with_port(port))
        .collect();

    let service = BpduService::new(SshExecutor::new().with_connect_timeout(timeout));
    let outcomes = service.collect_all(targets, &credentials).await;

    if json {
        let reports: Vec<DeviceReport> = outcomes.iter().map(DeviceReport::from).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_outcomes(&outcomes, config.label_width);
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        bail!("{} of {} devices failed", failed, outcomes.len());
    }
    Ok(())
}

fn print_outcomes(outcomes: &[DeviceOutcome], label_width: usize) {
    let multiple = outcomes.len() > 1;

    for (i, outcome) in outcomes.iter().enumerate() {
        let host = &outcome.target.host;
        match &outcome.result {
            Ok(table) => {
                if multiple {
                    if i > 0 {
                        println!();
                    }
                    println!("Device: {}", host);
                    println!("{}", "-".repeat(label_width + 10));
                }
                super::print_table(table, label_width);
            }
            Err(e) => println!("{}", failure_message(host, e)),
        }
    }
}

fn failure_message(host: &str, error: &Error) -> String {
    match error {
        Error::Unreachable { .. } => format!("Device: {} - not responding", host),
        Error::AuthenticationFailed { .. } => format!("Device: {} - auth failed", host),
        other => format!("Device: {} - {}", host, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpdu_finder_core::parse;

    #[test]
    fn test_failure_messages() {
        let unreachable = Error::Unreachable {
            host: "10.0.0.1".to_string(),
            reason: "timed out".to_string(),
        };
        assert_eq!(
            failure_message("10.0.0.1", &unreachable),
            "Device: 10.0.0.1 - not responding"
        );

        let auth = Error::AuthenticationFailed {
            host: "10.0.0.1".to_string(),
            username: "admin".to_string(),
        };
        assert_eq!(failure_message("10.0.0.1", &auth), "Device: 10.0.0.1 - auth failed");
    }

    #[test]
    fn test_device_report_json() {
        let outcome = DeviceOutcome {
            target: DeviceTarget::new("sw1", "admin"),
            result: parse("Port 1 (Fa0/1)\nBPDU: 0, received 2"),
        };
        let value = serde_json::to_value(DeviceReport::from(&outcome)).unwrap();
        assert_eq!(value["host"], "sw1");
        assert_eq!(value["ports"][0]["port"], "Fa0/1");
        assert_eq!(value["ports"][0]["bpdus"], 2);
        assert!(value.get("error").is_none());
        assert!(value["collectedAt"].is_string());
    }
}
