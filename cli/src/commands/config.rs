//! Config command - show and change session settings.

use anyhow::Result;
use codescanner_core::{ConfigRepository, ConfigStore};

pub async fn show(store: &ConfigStore, json: bool) -> Result<()> {
    let config = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file: {}", store.path().display());
    println!("{}", "-".repeat(40));
    println!("{:<20} {}", "default type", config.default_code_type);
    println!("{:<20} {}", "type separator", config.type_separator);
    println!("{:<20} {}", "auto enable", config.auto_enable);
    println!("{:<20} {}", "json output", config.json_output);
    Ok(())
}

pub async fn set_default_type(store: &ConfigStore, code_type: char) -> Result<()> {
    store.set_default_code_type(code_type).await?;
    println!("Default code type set to {}", code_type);
    Ok(())
}

pub async fn set_separator(store: &ConfigStore, separator: char) -> Result<()> {
    store.set_type_separator(separator).await?;
    println!("Type separator set to {}", separator);
    Ok(())
}

pub async fn auto_enable(store: &ConfigStore, enabled: bool) -> Result<()> {
    store.set_auto_enable(enabled).await?;
    println!("Auto enable {}", if enabled { "on" } else { "off" });
    Ok(())
}

pub async fn json_output(store: &ConfigStore, enabled: bool) -> Result<()> {
    store.set_json_output(enabled).await?;
    println!("JSON output {}", if enabled { "on" } else { "off" });
    Ok(())
}
