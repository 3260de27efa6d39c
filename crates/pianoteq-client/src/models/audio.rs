//! Audio device descriptors.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An audio I/O device.
///
/// The server reports the numeric fields sometimes as strings and sometimes
/// as numbers; they are kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioDeviceInfo {
    /// Output device name.
    #[serde(rename = "audio_output_device_name")]
    pub name: String,

    /// Sample rate in Hz.
    #[serde(
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sample_rate: Option<String>,

    /// Buffer size in samples.
    #[serde(
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub buffer_size: Option<String>,

    /// Channel count.
    #[serde(
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub channels: Option<String>,

    /// Driver type (e.g. "ALSA", "CoreAudio").
    #[serde(
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_type: Option<String>,
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {other}"
        ))),
    }
}
