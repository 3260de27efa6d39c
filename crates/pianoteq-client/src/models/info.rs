//! Server state snapshots.

use serde::{Deserialize, Serialize};

use super::PresetInfo;

/// General information about the running instance (`getInfo`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PianoteqInfo {
    /// Application version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Preset currently loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_preset: Option<PresetInfo>,

    /// First licence property string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licence_property_1: Option<String>,

    /// Second licence property string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licence_property_2: Option<String>,
}

/// CPU and voice usage (`getPerfInfo`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceInfo {
    /// CPU usage in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<f64>,

    /// Voices currently sounding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voices: Option<i64>,

    /// Polyphony limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_voices: Option<i64>,

    /// Recent audio buffer sizes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_buffer: Option<Vec<i64>>,

    /// Recent audio load figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_load: Option<Vec<f64>>,
}

/// One entry of the server's method listing (`list`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionInfo {
    /// Method name.
    pub name: String,
    /// Call signature.
    pub spec: String,
    /// Documentation string.
    pub doc: String,
}

/// Licence activation state (`getActivationInfo`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationInfo {
    /// Serial number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,

    /// Device name the licence is bound to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    /// Whether the instance is activated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated: Option<bool>,
}
