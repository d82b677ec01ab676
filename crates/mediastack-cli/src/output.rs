use std::io::Write;

use anyhow::{Context, Result};
use serde_json::Value;

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered).context("failed to write to stdout")?;
    Ok(())
}
