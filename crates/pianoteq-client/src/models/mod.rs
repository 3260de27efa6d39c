//! Typed models for Pianoteq API results and payloads.

mod audio;
mod info;
mod parameter;
mod preset;
mod transport;

pub use audio::AudioDeviceInfo;
pub use info::{ActivationInfo, FunctionInfo, PerformanceInfo, PianoteqInfo};
pub use parameter::{ParameterInfo, ParameterUpdate};
pub use preset::{ParsePresetTypeError, PresetInfo, PresetType};
pub use transport::{MetronomeInfo, MetronomeUpdate, SequencerInfo};
