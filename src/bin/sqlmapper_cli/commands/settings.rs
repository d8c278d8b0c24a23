// ABOUTME: settings command for sqlmapper-cli
// ABOUTME: Prints a consistent snapshot of the process-wide settings

use anyhow::Result;
use sqlmapper::settings::Settings;

/// Print the settings snapshot as pretty JSON
pub fn show(settings: &Settings) -> Result<()> {
    let snapshot = settings.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
