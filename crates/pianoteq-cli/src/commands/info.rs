//! Read-only state queries.

use anyhow::Result;
use serde_json::json;

use super::Context;
use crate::ui;

/// Audio device query.
#[derive(Debug, Clone, Copy)]
pub enum AudioAction {
    /// Current device.
    Info,
    /// Available devices.
    List,
}

/// Show version, current preset and load.
pub async fn run_info(ctx: &Context) -> Result<()> {
    let (info, perf) = tokio::try_join!(ctx.client.get_info(), ctx.client.get_perf_info())?;

    if ctx.json {
        return ui::json(&json!({ "info": info, "performance": perf }));
    }

    ui::header("Pianoteq");
    ui::kv("Server", ctx.client.base_url());
    ui::kv_opt("Version", info.version.as_deref());

    match &info.current_preset {
        Some(preset) => {
            ui::kv("Preset", &preset.name);
            if !preset.bank.is_empty() {
                ui::kv("Bank", &preset.bank);
            }
            ui::kv_opt("Instrument", preset.instrument.as_deref());
        }
        None => ui::kv_opt("Preset", None),
    }

    if let Some(cpu) = perf.cpu_usage {
        ui::kv("CPU", &format!("{cpu:.1}%"));
    }
    if let (Some(voices), Some(max)) = (perf.voices, perf.max_voices) {
        ui::kv("Voices", &format!("{voices}/{max}"));
    }
    Ok(())
}

/// Show CPU and voice usage.
pub async fn run_perf(ctx: &Context) -> Result<()> {
    let perf = ctx.client.get_perf_info().await?;
    if ctx.json {
        return ui::json(&perf);
    }

    ui::header("Performance");
    ui::kv_opt("CPU", perf.cpu_usage.map(|c| format!("{c:.1}%")).as_deref());
    ui::kv_opt("Voices", perf.voices.map(|v| v.to_string()).as_deref());
    ui::kv_opt("Max voices", perf.max_voices.map(|v| v.to_string()).as_deref());
    if let Some(load) = &perf.audio_load {
        let load: Vec<String> = load.iter().map(|l| format!("{l:.2}")).collect();
        ui::kv("Audio load", &load.join(" "));
    }
    Ok(())
}

/// List the server's JSON-RPC functions.
pub async fn run_functions(ctx: &Context) -> Result<()> {
    let functions = ctx.client.list().await?;
    if ctx.json {
        return ui::json(&functions);
    }

    ui::header("Functions");
    for function in &functions {
        println!("  {}", function.spec);
        if !function.doc.is_empty() {
            println!("      {}", console::style(&function.doc).dim());
        }
    }
    Ok(())
}

/// Show the MIDI sequencer state.
pub async fn run_sequencer(ctx: &Context) -> Result<()> {
    let seq = ctx.client.get_sequencer_info().await?;
    if ctx.json {
        return ui::json(&seq);
    }

    ui::header("Sequencer");
    ui::kv("State", &seq.state);
    ui::kv(
        "Position",
        &format!("{:.1}s / {:.1}s", seq.position, seq.duration),
    );
    ui::kv_opt("File", seq.file.as_deref());
    Ok(())
}

/// Show licence activation state.
pub async fn run_activation(ctx: &Context) -> Result<()> {
    let activation = ctx.client.get_activation_info().await?;
    if ctx.json {
        return ui::json(&activation);
    }

    ui::header("Activation");
    let activated = activation.activated.map(|a| if a { "yes" } else { "no" });
    ui::kv_opt("Activated", activated);
    ui::kv_opt("Serial", activation.serial.as_deref());
    ui::kv_opt("Device", activation.device_name.as_deref());
    Ok(())
}

/// Show the current or available audio devices.
pub async fn run_audio(ctx: &Context, action: AudioAction) -> Result<()> {
    match action {
        AudioAction::Info => {
            let device = ctx.client.get_audio_device_info().await?;
            if ctx.json {
                return ui::json(&device);
            }

            ui::header("Audio Device");
            ui::kv("Device", &device.name);
            ui::kv_opt("Type", device.device_type.as_deref());
            ui::kv_opt("Sample rate", device.sample_rate.as_deref());
            ui::kv_opt("Buffer size", device.buffer_size.as_deref());
            ui::kv_opt("Channels", device.channels.as_deref());
        }
        AudioAction::List => {
            let devices = ctx.client.get_list_of_audio_devices().await?;
            if ctx.json {
                return ui::json(&devices);
            }

            ui::header("Audio Devices");
            for device in &devices {
                let kind = device.device_type.as_deref().unwrap_or("-");
                ui::table_row(&[(kind, 14), (device.name.as_str(), 0)]);
            }
        }
    }
    Ok(())
}
