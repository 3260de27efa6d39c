//! Sequencer and metronome state.

use serde::{Deserialize, Serialize};

/// MIDI sequencer state (`getSequencerInfo`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerInfo {
    /// Player state (e.g. "playing", "stopped").
    pub state: String,
    /// Playback position in seconds.
    pub position: f64,
    /// Length of the loaded sequence in seconds.
    pub duration: f64,
    /// Loaded MIDI file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Metronome state (`getMetronome`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetronomeInfo {
    /// Whether the metronome is running.
    pub enabled: bool,
    /// Tempo.
    pub bpm: f64,
    /// Click volume in dB.
    pub volume_db: f64,
    /// Time signature, e.g. "3/4".
    pub timesig: String,
    /// Accent the first beat of each bar.
    pub accentuate: bool,
}

impl Default for MetronomeInfo {
    fn default() -> Self {
        Self {
            enabled: false,
            bpm: 0.0,
            volume_db: 0.0,
            timesig: "4/4".to_string(),
            accentuate: false,
        }
    }
}

/// A sparse metronome change for `setMetronome`.
///
/// Unset fields are left out of the payload entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetronomeUpdate {
    /// Start or stop the metronome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Tempo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<u32>,
    /// Click volume in dB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_db: Option<f64>,
    /// Time signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timesig: Option<String>,
    /// Accent the first beat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accentuate: Option<bool>,
}

impl MetronomeUpdate {
    /// Empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the running state.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the tempo.
    #[must_use]
    pub const fn bpm(mut self, bpm: u32) -> Self {
        self.bpm = Some(bpm);
        self
    }

    /// Set the click volume.
    #[must_use]
    pub const fn volume_db(mut self, volume_db: f64) -> Self {
        self.volume_db = Some(volume_db);
        self
    }

    /// Set the time signature.
    #[must_use]
    pub fn timesig(mut self, timesig: impl Into<String>) -> Self {
        self.timesig = Some(timesig.into());
        self
    }

    /// Set first-beat accentuation.
    #[must_use]
    pub const fn accentuate(mut self, accentuate: bool) -> Self {
        self.accentuate = Some(accentuate);
        self
    }

    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.bpm.is_none()
            && self.volume_db.is_none()
            && self.timesig.is_none()
            && self.accentuate.is_none()
    }
}
