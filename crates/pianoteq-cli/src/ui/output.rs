//! Formatted output utilities.

use console::{Style, style};
use serde::Serialize;

/// Print a success message with checkmark.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message with X.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header/section title.
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair.
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).bold(), value);
}

/// Print a key-value pair whose value may be missing.
pub fn kv_opt(key: &str, value: Option<&str>) {
    match value {
        Some(v) => kv(key, v),
        None => println!("  {}: {}", style(key).bold(), style("n/a").dim()),
    }
}

/// Print a table row.
pub fn table_row(cols: &[(&str, usize)]) {
    for &(text, width) in cols {
        print!("{text:width$}");
    }
    println!();
}

/// Print a dimmed table header row.
pub fn table_header(cols: &[(&str, usize)]) {
    let dim = Style::new().dim().bold();
    for &(text, width) in cols {
        print!("{}", dim.apply_to(format!("{text:width$}")));
    }
    println!();
}

/// Star marker for favourite items.
pub fn star(on: bool) -> String {
    if on {
        style("★").yellow().to_string()
    } else {
        " ".to_string()
    }
}

/// Print any value as pretty JSON.
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
