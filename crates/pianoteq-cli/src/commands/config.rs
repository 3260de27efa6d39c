//! Config get/set command.

use crate::ui;
use anyhow::{Result, bail};
use pianoteq_core::Config;
use serde_json::Value;
use std::path::Path;

/// Config action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show full config.
    #[default]
    Show,
    /// Get a value by dotted path.
    Get {
        /// Key, e.g. `server.baseUrl`.
        key: String,
    },
    /// Set a value by dotted path.
    Set {
        /// Key, e.g. `server.baseUrl`.
        key: String,
        /// Value; parsed as JSON where possible.
        value: String,
    },
    /// Validate configuration.
    Validate,
    /// Print the config file location.
    Path,
}

/// Run the config command.
pub fn run_config(action: ConfigAction) -> Result<()> {
    let config_path = Config::default_path();

    match action {
        ConfigAction::Show => show_config(&config_path),
        ConfigAction::Get { key } => get_config_value(&config_path, &key),
        ConfigAction::Set { key, value } => set_config_value(&config_path, &key, &value),
        ConfigAction::Validate => validate_config(&config_path),
        ConfigAction::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

/// Show the effective configuration.
fn show_config(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        ui::info(&format!(
            "No config file at {}, showing defaults",
            config_path.display()
        ));
    }
    let config = Config::load_default()?;
    ui::json(&config)
}

/// Get a specific config value by path.
fn get_config_value(config_path: &Path, key: &str) -> Result<()> {
    let value = if config_path.exists() {
        read_raw(config_path)?
    } else {
        serde_json::to_value(Config::default())?
    };

    let Some(found) = lookup(&value, key) else {
        bail!("Key not found: {key}");
    };

    match found {
        Value::String(s) => println!("{s}"),
        Value::Number(n) => println!("{n}"),
        Value::Bool(b) => println!("{b}"),
        Value::Null => println!("null"),
        _ => println!("{}", serde_json::to_string_pretty(found)?),
    }
    Ok(())
}

/// Set a config value, refusing writes that would leave the file invalid.
///
/// The file is written back as plain JSON.
fn set_config_value(config_path: &Path, key: &str, new_value: &str) -> Result<()> {
    let (mut config, json5_only) = if config_path.exists() {
        let content = std::fs::read_to_string(config_path)?;
        (json5::from_str(&content)?, uses_json5_syntax(&content))
    } else {
        (serde_json::json!({}), false)
    };

    let path: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
    if path.is_empty() {
        bail!("Invalid key '{key}'");
    }
    set_nested_value(&mut config, &path, parse_value(new_value));

    let parsed: Config = serde_json::from_value(config.clone())?;
    parsed.validate()?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, serde_json::to_string_pretty(&config)?)?;

    if json5_only {
        ui::warning(&format!(
            "{} was rewritten as plain JSON; its comments and JSON5 formatting were dropped",
            config_path.display()
        ));
    }
    ui::success(&format!("Set {key} = {new_value}"));
    Ok(())
}

/// Validate the configuration.
fn validate_config(config_path: &Path) -> Result<()> {
    ui::header("Validating Configuration");

    if !config_path.exists() {
        ui::info(&format!(
            "No config file at {}, defaults apply",
            config_path.display()
        ));
        return Ok(());
    }

    let content = std::fs::read_to_string(config_path)?;
    match json5::from_str::<Value>(&content) {
        Ok(_) => ui::success("Syntax: Valid JSON5"),
        Err(e) => {
            ui::error(&format!("Syntax error: {e}"));
            return Ok(());
        }
    }

    match Config::load(config_path) {
        Ok(config) => {
            ui::success("Schema: Configuration is valid");
            ui::kv("Server", &config.server.base_url);
            ui::kv("Favorites", &config.favorites_path().display().to_string());
        }
        Err(e) => ui::error(&format!("Schema error: {e}")),
    }
    Ok(())
}

fn read_raw(config_path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(config_path)?;
    Ok(json5::from_str(&content)?)
}

/// Whether `content` relies on JSON5 (comments, unquoted keys, trailing
/// commas) and so loses something when rewritten as JSON.
fn uses_json5_syntax(content: &str) -> bool {
    serde_json::from_str::<Value>(content).is_err()
}

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |current, part| match current {
        Value::Object(map) => map.get(part),
        Value::Array(arr) => part.parse::<usize>().ok().and_then(|i| arr.get(i)),
        _ => None,
    })
}

fn set_nested_value(root: &mut Value, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for part in parents {
        if !current.is_object() {
            *current = serde_json::json!({});
        }
        current = &mut current[*part];
    }
    if !current.is_object() {
        *current = serde_json::json!({});
    }
    current[*last] = value;
}

/// Parse a CLI value as JSON, falling back to a plain string.
fn parse_value(value: &str) -> Value {
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
}
