//! Preset descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stored sound configuration.
///
/// Single-preset queries report the instrument as `instrument`, list queries
/// as `instr`, and some servers send both. All of them decode into
/// [`PresetInfo::instrument`]; encoding always uses `instrument`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PresetWire")]
pub struct PresetInfo {
    /// Preset name.
    pub name: String,

    /// Bank the preset lives in (empty for factory presets).
    pub bank: String,

    /// Instrument the preset is built on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,

    /// Author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Instrument class (e.g. "Acoustic Piano").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Collection the instrument belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Licence name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Licence status (e.g. "ok", "demo").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_status: Option<String>,

    /// Path of the preset file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Tags, in server order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Server-side favourite flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favourite: Option<bool>,
}

/// Decoding form of [`PresetInfo`] with both instrument spellings.
#[derive(Deserialize, Default)]
#[serde(default)]
struct PresetWire {
    name: String,
    bank: String,
    instrument: Option<String>,
    instr: Option<String>,
    author: Option<String>,
    comment: Option<String>,
    class: Option<String>,
    collection: Option<String>,
    license: Option<String>,
    license_status: Option<String>,
    file: Option<String>,
    tags: Vec<String>,
    favourite: Option<bool>,
}

impl From<PresetWire> for PresetInfo {
    fn from(wire: PresetWire) -> Self {
        Self {
            name: wire.name,
            bank: wire.bank,
            instrument: wire.instrument.or(wire.instr),
            author: wire.author,
            comment: wire.comment,
            class: wire.class,
            collection: wire.collection,
            license: wire.license,
            license_status: wire.license_status,
            file: wire.file,
            tags: wire.tags,
            favourite: wire.favourite,
        }
    }
}

impl PresetInfo {
    /// Whether the server marks this preset as a favourite.
    #[must_use]
    pub fn is_favourite(&self) -> bool {
        self.favourite.unwrap_or(false)
    }
}

/// Kind of preset addressed by preset operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetType {
    /// Complete instrument preset.
    #[default]
    Full,
    /// Equalizer.
    Equ,
    /// Velocity curve.
    Vel,
    /// Microphone setup.
    Mic,
    /// Reverb.
    Reverb,
    /// Tuning.
    Tuning,
    /// Whole effect rack.
    EffectRack,
    /// First effect slot.
    Effect1,
    /// Second effect slot.
    Effect2,
    /// Third effect slot.
    Effect3,
}

impl PresetType {
    /// Every preset type, in catalogue order.
    pub const ALL: [Self; 10] = [
        Self::Full,
        Self::Equ,
        Self::Vel,
        Self::Mic,
        Self::Reverb,
        Self::Tuning,
        Self::EffectRack,
        Self::Effect1,
        Self::Effect2,
        Self::Effect3,
    ];

    /// Wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Equ => "equ",
            Self::Vel => "vel",
            Self::Mic => "mic",
            Self::Reverb => "reverb",
            Self::Tuning => "tuning",
            Self::EffectRack => "effect_rack",
            Self::Effect1 => "effect1",
            Self::Effect2 => "effect2",
            Self::Effect3 => "effect3",
        }
    }
}

impl fmt::Display for PresetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown preset type tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset type '{0}'")]
pub struct ParsePresetTypeError(pub String);

impl FromStr for PresetType {
    type Err = ParsePresetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePresetTypeError(s.to_string()))
    }
}
