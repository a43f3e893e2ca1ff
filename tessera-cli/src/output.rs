//! Output rendering helpers.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::{Cli, OutputFormat};

/// Prints a value as JSON, pretty or compact per the global flags.
pub fn print_json<T: Serialize>(value: &T, cli: &Cli) -> Result<()> {
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Returns true when the command should emit JSON instead of text.
pub fn wants_json(cli: &Cli) -> bool {
    cli.format == OutputFormat::Json
}

/// Formats an instant in local time for text output.
pub fn local_time(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
