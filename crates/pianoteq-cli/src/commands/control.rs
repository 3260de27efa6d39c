//! Navigation, A/B comparison, edit history and other one-shot commands.

use anyhow::Result;

use super::Context;
use crate::ui;

/// Step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Forward.
    Next,
    /// Backward.
    Prev,
}

/// What to step through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTarget {
    /// All presets.
    Preset,
    /// Server-flagged favourite presets.
    Favourite,
    /// Instruments.
    Instrument,
}

/// A/B comparison action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbAction {
    /// Switch between slots A and B.
    Switch,
    /// Copy the current slot to the other one.
    Copy,
}

/// Argument-less commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleCommand {
    /// Reset parameters to the saved preset.
    Reset,
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// Silence all sound.
    Panic,
    /// Toggle mute.
    Mute,
    /// Quit Pianoteq.
    Quit,
}

/// Step through presets, favourites or instruments and show where we landed.
pub async fn run_step(ctx: &Context, direction: Direction, target: StepTarget) -> Result<()> {
    let client = &ctx.client;
    match (direction, target) {
        (Direction::Next, StepTarget::Preset) => client.next_preset().await?,
        (Direction::Prev, StepTarget::Preset) => client.prev_preset().await?,
        (Direction::Next, StepTarget::Favourite) => client.next_favourite_preset().await?,
        (Direction::Prev, StepTarget::Favourite) => client.prev_favourite_preset().await?,
        (Direction::Next, StepTarget::Instrument) => client.next_instrument().await?,
        (Direction::Prev, StepTarget::Instrument) => client.prev_instrument().await?,
    }

    let info = client.get_info().await?;
    if ctx.json {
        return ui::json(&info.current_preset);
    }

    match info.current_preset {
        Some(preset) => ui::success(&format!("Now playing '{}'", preset.name)),
        None => ui::success("Done"),
    }
    Ok(())
}

/// A/B comparison.
pub async fn run_ab(ctx: &Context, action: AbAction) -> Result<()> {
    match action {
        AbAction::Switch => {
            ctx.client.ab_switch().await?;
            ui::success("Switched A/B");
        }
        AbAction::Copy => {
            ctx.client.ab_copy().await?;
            ui::success("Copied to the other slot");
        }
    }
    Ok(())
}

/// Run an argument-less command.
pub async fn run_simple(ctx: &Context, command: SimpleCommand) -> Result<()> {
    let client = &ctx.client;
    let done = match command {
        SimpleCommand::Reset => {
            client.reset_preset().await?;
            "Preset reset"
        }
        SimpleCommand::Undo => {
            client.undo().await?;
            "Undone"
        }
        SimpleCommand::Redo => {
            client.redo().await?;
            "Redone"
        }
        SimpleCommand::Panic => {
            client.panic().await?;
            "All notes off"
        }
        SimpleCommand::Mute => {
            client.mute().await?;
            "Mute toggled"
        }
        SimpleCommand::Quit => {
            client.quit().await?;
            "Pianoteq is quitting"
        }
    };
    ui::success(done);
    Ok(())
}

/// Load a preset, MIDI file or other Pianoteq file from the server's disk.
pub async fn run_load_file(ctx: &Context, path: &str) -> Result<()> {
    ctx.client.load_file(path).await?;
    ui::success(&format!("Loaded {path}"));
    Ok(())
}

/// Activate the licence.
pub async fn run_activate(ctx: &Context, serial: &str, device_name: &str) -> Result<()> {
    ctx.client.activate(serial, device_name).await?;
    ui::success(&format!("Activation requested for '{device_name}'"));
    ui::info("Run 'pianoteq activation' to check the result");
    Ok(())
}
