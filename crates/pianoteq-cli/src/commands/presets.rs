//! Preset listing and management.

use anyhow::Result;
use pianoteq_client::{PresetInfo, PresetType};

use super::Context;
use crate::ui;

/// Preset listing arguments.
#[derive(Debug, Clone, Default)]
pub struct PresetsArgs {
    /// Which presets to list.
    pub preset_type: PresetType,
    /// Case-insensitive substring matched against name, bank and instrument.
    pub filter: Option<String>,
    /// Only show favourites (server flag or local list).
    pub favourites_only: bool,
}

/// Arguments for commands addressing one preset.
#[derive(Debug, Clone)]
pub struct PresetArgs {
    /// Preset name.
    pub name: String,
    /// Bank the preset lives in.
    pub bank: Option<String>,
    /// Preset type.
    pub preset_type: PresetType,
}

/// List presets.
pub async fn run_presets(ctx: &Context, args: PresetsArgs) -> Result<()> {
    let presets = ctx.client.get_list_of_presets(args.preset_type).await?;
    let favorites = ctx.favorites().await?;

    let presets: Vec<PresetInfo> = presets
        .into_iter()
        .filter(|p| args.filter.as_deref().is_none_or(|f| matches_filter(p, f)))
        .filter(|p| !args.favourites_only || p.is_favourite() || favorites.is_favorite(&p.name))
        .collect();

    if ctx.json {
        return ui::json(&presets);
    }

    if presets.is_empty() {
        ui::info("No presets found");
        return Ok(());
    }

    ui::header(&format!("Presets ({})", args.preset_type));
    ui::table_header(&[("", 2), ("Name", 40), ("Bank", 24), ("Instrument", 0)]);
    for preset in &presets {
        let star = ui::star(preset.is_favourite() || favorites.is_favorite(&preset.name));
        // ANSI codes in the star defeat width padding
        ui::table_row(&[
            (star.as_str(), 0),
            (" ", 1),
            (truncate(&preset.name, 38).as_str(), 40),
            (truncate(&preset.bank, 22).as_str(), 24),
            (preset.instrument.as_deref().unwrap_or(""), 0),
        ]);
    }
    println!();
    ui::info(&format!("{} presets", presets.len()));
    Ok(())
}

/// Load a preset.
pub async fn run_load(ctx: &Context, args: PresetArgs) -> Result<()> {
    ctx.client
        .load_preset(&args.name, args.bank.as_deref(), args.preset_type)
        .await?;
    ui::success(&format!("Loaded preset '{}'", args.name));
    Ok(())
}

/// Save the current state as a preset.
pub async fn run_save(ctx: &Context, args: PresetArgs) -> Result<()> {
    let bank = args.bank.as_deref().unwrap_or_default();
    ctx.client
        .save_preset(&args.name, bank, args.preset_type)
        .await?;
    ui::success(&format!("Saved preset '{}'", args.name));
    Ok(())
}

/// Delete a preset file.
pub async fn run_delete(ctx: &Context, args: PresetArgs) -> Result<()> {
    let bank = args.bank.as_deref().unwrap_or_default();
    ctx.client
        .delete_preset(&args.name, bank, args.preset_type)
        .await?;
    ui::success(&format!("Deleted preset '{}'", args.name));
    Ok(())
}

fn matches_filter(preset: &PresetInfo, filter: &str) -> bool {
    let filter = filter.to_lowercase();
    [
        Some(preset.name.as_str()),
        Some(preset.bank.as_str()),
        preset.instrument.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&filter))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
