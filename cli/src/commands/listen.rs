//! Listen command - feed scan lines to a simulated scanner.
//!
//! Lines starting with `!` control the session:
//! `!enable`, `!disable`, `!status`, `!fail <type|length|content>`.
//! Every other non-blank line is delivered to the device as one scan.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use codescanner_core::{
    parse_scan_line, Code, CodeScanner, ConfigStore, ReadStage, SimulatedDriver,
};
use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

/// One emitted code as printed in JSON mode.
#[derive(Serialize)]
struct ScanRecord<'a> {
    #[serde(flatten)]
    code: &'a Code,
    read_count: u64,
    scanned_at: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Control {
    Enable,
    Disable,
    Status,
    Fail(ReadStage),
}

fn parse_control(command: &str) -> Result<Control> {
    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
        (Some("enable"), None) => Ok(Control::Enable),
        (Some("disable"), None) => Ok(Control::Disable),
        (Some("status"), None) => Ok(Control::Status),
        (Some("fail"), Some(stage)) => ReadStage::parse(stage)
            .map(Control::Fail)
            .ok_or_else(|| anyhow!("unknown read stage '{}'", stage)),
        _ => bail!("unknown command '!{}'", command.trim()),
    }
}

pub async fn run(
    store: &ConfigStore,
    input: Option<PathBuf>,
    no_enable: bool,
    json: bool,
) -> Result<()> {
    let config = store.load().await?;
    debug!(?config, path = %store.path().display(), "loaded configuration");
    let json = json || config.json_output;

    let device = SimulatedDriver::new();
    let scanner = CodeScanner::new(device.clone());
    let (_subscription, mut codes) = scanner.subscribe_channel();

    if config.auto_enable && !no_enable {
        scanner.enable()?;
    }

    let reader: Box<dyn AsyncBufRead + Unpin> = match input {
        Some(path) => Box::new(BufReader::new(File::open(&path).await.map_err(|e| {
            anyhow!("failed to open {}: {}", path.display(), e)
        })?)),
        None => {
            if atty::is(atty::Stream::Stdin) {
                eprintln!(
                    "Scanner {}. Type scans as TYPE{}TEXT, or !enable, !disable, !status, !fail <stage>. Ctrl-D to quit.",
                    scanner.state(),
                    config.type_separator
                );
            }
            Box::new(BufReader::new(tokio::io::stdin()))
        }
    };

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(command) = line.trim().strip_prefix('!') {
            if let Err(e) = apply_control(&scanner, &device, command) {
                eprintln!("error: {}", e);
            }
        } else if let Some((code_type, text)) =
            parse_scan_line(&line, config.default_code_type, config.type_separator)
        {
            match device.scan(code_type, text) {
                Ok(Some(_)) => {}
                Ok(None) => eprintln!("scanner port is closed, scan ignored"),
                Err(e) => eprintln!("error: {}", e),
            }
        }

        while let Ok(code) = codes.try_recv() {
            print_code(&code, scanner.read_count(), json)?;
        }
    }

    scanner.shutdown()?;

    if !json {
        println!("\nTotal: {} codes read", scanner.read_count());
    }
    Ok(())
}

fn apply_control(
    scanner: &CodeScanner<SimulatedDriver>,
    device: &SimulatedDriver,
    command: &str,
) -> Result<()> {
    match parse_control(command)? {
        Control::Enable => scanner.enable()?,
        Control::Disable => scanner.disable()?,
        Control::Status => eprintln!(
            "port {}, {} codes read, {} subscribers",
            scanner.state(),
            scanner.read_count(),
            scanner.subscriber_count()
        ),
        Control::Fail(stage) => device.fail_next_read(stage),
    }
    Ok(())
}

fn print_code(code: &Code, read_count: u64, json: bool) -> Result<()> {
    if json {
        let record = ScanRecord {
            code,
            read_count,
            scanned_at: chrono::Local::now().to_rfc3339(),
        };
        println!("{}", serde_json::to_string(&record)?);
    } else {
        println!("{:>5}  {}", read_count, code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_control() {
        assert_eq!(parse_control("enable").unwrap(), Control::Enable);
        assert_eq!(parse_control(" disable ").unwrap(), Control::Disable);
        assert_eq!(parse_control("status").unwrap(), Control::Status);
        assert_eq!(
            parse_control("fail count").unwrap(),
            Control::Fail(ReadStage::Length)
        );
        assert!(parse_control("fail decoder").is_err());
        assert!(parse_control("reset").is_err());
        assert!(parse_control("enable now").is_err());
    }

    #[test]
    fn test_record_flattens_code() {
        let code = Code::new("12345", 5, "A");
        let record = ScanRecord {
            code: &code,
            read_count: 1,
            scanned_at: "2024-01-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["text"], "12345");
        assert_eq!(json["type"], "A");
        assert_eq!(json["read_count"], 1);
    }
}
