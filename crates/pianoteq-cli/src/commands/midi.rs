//! MIDI file playback and raw message sending.

use anyhow::{Context as _, Result, bail};

use super::Context;
use crate::ui;

/// MIDI action.
#[derive(Debug, Clone, PartialEq)]
pub enum MidiAction {
    /// Load a MIDI file into the sequencer.
    Load {
        /// File path on the server's disk.
        path: String,
    },
    /// Save the sequencer contents to a MIDI file.
    Save {
        /// File path on the server's disk.
        path: String,
    },
    /// Send raw messages, each a string of hex bytes like `90 3C 64`.
    Send {
        /// Messages to send, in order.
        messages: Vec<String>,
    },
    /// Start playback.
    Play,
    /// Stop playback.
    Stop,
    /// Pause playback.
    Pause,
    /// Rewind to the start.
    Rewind,
    /// Start recording.
    Record,
    /// Seek to a position.
    Seek {
        /// Position in seconds.
        seconds: f64,
    },
}

/// Run a MIDI action.
pub async fn run_midi(ctx: &Context, action: MidiAction) -> Result<()> {
    let client = &ctx.client;
    match action {
        MidiAction::Load { path } => {
            client.load_midi_file(&path).await?;
            ui::success(&format!("Loaded {path}"));
        }
        MidiAction::Save { path } => {
            client.save_midi_file(&path).await?;
            ui::success(&format!("Saved {path}"));
        }
        MidiAction::Send { messages } => {
            let bytes = messages
                .iter()
                .map(|m| parse_message(m))
                .collect::<Result<Vec<_>>>()?;
            client.midi_send(&bytes).await?;
            ui::success(&format!("Sent {} message(s)", bytes.len()));
        }
        MidiAction::Play => {
            client.midi_play().await?;
            ui::success("Playing");
        }
        MidiAction::Stop => {
            client.midi_stop().await?;
            ui::success("Stopped");
        }
        MidiAction::Pause => {
            client.midi_pause().await?;
            ui::success("Paused");
        }
        MidiAction::Rewind => {
            client.midi_rewind().await?;
            ui::success("Rewound");
        }
        MidiAction::Record => {
            client.midi_record().await?;
            ui::success("Recording");
        }
        MidiAction::Seek { seconds } => {
            if seconds < 0.0 {
                bail!("Seek position cannot be negative");
            }
            client.midi_seek(seconds).await?;
            ui::success(&format!("Seeked to {seconds:.1}s"));
        }
    }
    Ok(())
}

/// Parse hex bytes separated by spaces or commas.
fn parse_message(message: &str) -> Result<Vec<u8>> {
    let bytes = message
        .split([' ', ','])
        .filter(|b| !b.is_empty())
        .map(|b| {
            let digits = b.trim_start_matches("0x").trim_start_matches("0X");
            u8::from_str_radix(digits, 16).with_context(|| format!("Invalid MIDI byte '{b}'"))
        })
        .collect::<Result<Vec<u8>>>()?;

    if bytes.is_empty() {
        bail!("Empty MIDI message");
    }
    Ok(bytes)
}
