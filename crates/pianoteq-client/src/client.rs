//! Pianoteq JSON-RPC client.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::codec::{self, EXCERPT_LEN};
use crate::error::{ClientError, Result};
use crate::jsonrpc::RpcRequest;
use crate::method::Method;
use crate::models::{
    ActivationInfo, AudioDeviceInfo, FunctionInfo, MetronomeInfo, MetronomeUpdate,
    ParameterInfo, ParameterUpdate, PerformanceInfo, PianoteqInfo, PresetInfo, PresetType,
    SequencerInfo,
};
use crate::shape::{self, ResultShape};

/// Path of the JSON-RPC endpoint under the base URL.
const JSONRPC_PATH: &str = "/jsonrpc";

/// Async client for the Pianoteq JSON-RPC API.
///
/// Cloning is cheap: clones share the HTTP connection pool and the request id
/// counter, so ids stay unique across every clone of one client.
#[derive(Debug, Clone)]
pub struct PianoteqClient {
    http: Client,
    base_url: String,
    endpoint: String,
    next_id: Arc<AtomicU64>,
    cancel: Option<CancellationToken>,
}

impl PianoteqClient {
    /// Create a client with its own HTTP transport.
    ///
    /// `base_url` is the server root, e.g. `http://192.168.1.20:8081`.
    #[must_use]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    /// Create a client over an existing HTTP transport.
    #[must_use]
    pub fn with_http_client(http: Client, base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        let endpoint = format!("{base_url}{JSONRPC_PATH}");
        Self {
            http,
            base_url,
            endpoint,
            next_id: Arc::new(AtomicU64::new(0)),
            cancel: None,
        }
    }

    /// A handle whose calls are aborted when `token` fires.
    ///
    /// The handle shares transport and id sequence with `self`.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// Server base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Perform one JSON-RPC round trip and return the raw result.
    ///
    /// `params` defaults to `[]`.
    ///
    /// # Errors
    ///
    /// Transport failures, protocol violations (empty or unparseable body,
    /// mismatched id), remote error envelopes, and cancellation.
    pub async fn invoke(&self, method: &str, params: Option<Value>) -> Result<Option<Value>> {
        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        debug!(method, "request cancelled");
                        Err(ClientError::Cancelled)
                    }
                    result = self.round_trip(method, params) => result,
                }
            }
            None => self.round_trip(method, params).await,
        }
    }

    async fn round_trip(&self, method: &str, params: Option<Value>) -> Result<Option<Value>> {
        let id = self.next_id();
        let request = RpcRequest::new(method, params, id);
        debug!(method, id, "sending request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(ClientError::EmptyResponse);
        }

        let envelope =
            codec::parse_envelope(&body).map_err(|source| ClientError::MalformedResponse {
                excerpt: codec::excerpt(&body, EXCERPT_LEN).to_string(),
                source,
            })?;

        if let Some(error) = envelope.error {
            warn!(method, id, code = error.code, message = %error.message, "remote error");
            return Err(ClientError::Remote(error));
        }

        if !envelope.matches(id) {
            return Err(ClientError::IdMismatch {
                expected: id,
                actual: envelope.id.unwrap_or_default(),
            });
        }

        debug!(method, id, "received response");
        Ok(envelope.result)
    }

    async fn singleton<T: DeserializeOwned + Default>(
        &self,
        method: Method,
        params: Option<Value>,
    ) -> Result<T> {
        debug_assert_eq!(method.shape(), ResultShape::Singleton);
        let result = self.invoke(method.name(), params).await?;
        shape::decode_singleton(method.name(), result)
    }

    async fn many<T: DeserializeOwned>(
        &self,
        method: Method,
        params: Option<Value>,
    ) -> Result<Vec<T>> {
        debug_assert_eq!(method.shape(), ResultShape::List);
        let result = self.invoke(method.name(), params).await?;
        shape::decode(method.name(), result)
    }

    async fn object<T: DeserializeOwned>(
        &self,
        method: Method,
        params: Option<Value>,
    ) -> Result<T> {
        debug_assert_eq!(method.shape(), ResultShape::Object);
        let result = self.invoke(method.name(), params).await?;
        shape::decode_object(method.name(), result)
    }

    async fn command(&self, method: Method, params: Option<Value>) -> Result<()> {
        debug_assert_eq!(method.shape(), ResultShape::Discard);
        self.invoke(method.name(), params).await.map(drop)
    }

    // Information

    /// Various information about the current state.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn get_info(&self) -> Result<PianoteqInfo> {
        self.singleton(Method::GetInfo, None).await
    }

    /// CPU performance information.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn get_perf_info(&self) -> Result<PerformanceInfo> {
        self.singleton(Method::GetPerfInfo, None).await
    }

    /// The JSON-RPC functions the server exposes.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn list(&self) -> Result<Vec<FunctionInfo>> {
        self.many(Method::List, None).await
    }

    // Presets

    /// Presets of the given type.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn get_list_of_presets(&self, preset_type: PresetType) -> Result<Vec<PresetInfo>> {
        self.many(Method::GetListOfPresets, Some(json!([preset_type])))
            .await
    }

    /// Load a preset. Without `bank` only the name is sent.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn load_preset(
        &self,
        name: &str,
        bank: Option<&str>,
        preset_type: PresetType,
    ) -> Result<()> {
        self.command(
            Method::LoadPreset,
            Some(load_preset_params(name, bank, preset_type)),
        )
        .await
    }

    /// Save the current state as a preset.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn save_preset(&self, name: &str, bank: &str, preset_type: PresetType) -> Result<()> {
        self.command(Method::SavePreset, Some(json!([name, bank, preset_type])))
            .await
    }

    /// Delete a preset file from disk.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn delete_preset(
        &self,
        name: &str,
        bank: &str,
        preset_type: PresetType,
    ) -> Result<()> {
        self.command(Method::DeletePreset, Some(json!([name, bank, preset_type])))
            .await
    }

    /// Reset parameters to the saved preset.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn reset_preset(&self) -> Result<()> {
        self.command(Method::ResetPreset, None).await
    }

    /// Load the next preset.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn next_preset(&self) -> Result<()> {
        self.command(Method::NextPreset, None).await
    }

    /// Load the previous preset.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn prev_preset(&self) -> Result<()> {
        self.command(Method::PrevPreset, None).await
    }

    /// Load the next favourite preset.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn next_favourite_preset(&self) -> Result<()> {
        self.command(Method::NextFavouritePreset, None).await
    }

    /// Load the previous favourite preset.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn prev_favourite_preset(&self) -> Result<()> {
        self.command(Method::PrevFavouritePreset, None).await
    }

    /// Load the next instrument.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn next_instrument(&self) -> Result<()> {
        self.command(Method::NextInstrument, None).await
    }

    /// Load the previous instrument.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn prev_instrument(&self) -> Result<()> {
        self.command(Method::PrevInstrument, None).await
    }

    // A/B comparison and edit history

    /// Swap the A and B slots.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn ab_switch(&self) -> Result<()> {
        self.command(Method::AbSwitch, None).await
    }

    /// Copy the current slot onto the other one.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn ab_copy(&self) -> Result<()> {
        self.command(Method::AbCopy, None).await
    }

    /// Undo the last edit.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn undo(&self) -> Result<()> {
        self.command(Method::Undo, None).await
    }

    /// Redo the last undone edit.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn redo(&self) -> Result<()> {
        self.command(Method::Redo, None).await
    }

    // Parameters

    /// All parameters with their current values.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn get_parameters(&self) -> Result<Vec<ParameterInfo>> {
        self.many(Method::GetParameters, None).await
    }

    /// Change several parameters at once. Sent as `{"list": [...]}`.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn set_parameters(&self, parameters: &[ParameterUpdate]) -> Result<()> {
        self.command(Method::SetParameters, Some(json!({ "list": parameters })))
            .await
    }

    /// Change one parameter by normalized value.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn set_parameter(&self, id: &str, normalized_value: f64) -> Result<()> {
        self.set_parameters(&[ParameterUpdate::normalized(id, normalized_value)])
            .await
    }

    /// Randomize parameters by `amount` in `[0.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn randomize_parameters(&self, amount: f64) -> Result<()> {
        self.command(Method::RandomizeParameters, Some(json!([amount])))
            .await
    }

    // MIDI

    /// Load a MIDI file, or a folder as a playlist.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn load_midi_file(&self, path: &str) -> Result<()> {
        self.command(Method::LoadMidiFile, Some(json!([path]))).await
    }

    /// Save the loaded MIDI sequence.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn save_midi_file(&self, path: &str) -> Result<()> {
        self.command(Method::SaveMidiFile, Some(json!([path]))).await
    }

    /// Send raw MIDI messages, one byte vector per message.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn midi_send(&self, bytes: &[Vec<u8>]) -> Result<()> {
        self.command(Method::MidiSend, Some(json!({ "bytes": bytes })))
            .await
    }

    /// Start playback.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn midi_play(&self) -> Result<()> {
        self.command(Method::MidiPlay, None).await
    }

    /// Stop playback.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn midi_stop(&self) -> Result<()> {
        self.command(Method::MidiStop, None).await
    }

    /// Pause playback.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn midi_pause(&self) -> Result<()> {
        self.command(Method::MidiPause, None).await
    }

    /// Rewind to the start.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn midi_rewind(&self) -> Result<()> {
        self.command(Method::MidiRewind, None).await
    }

    /// Start recording.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn midi_record(&self) -> Result<()> {
        self.command(Method::MidiRecord, None).await
    }

    /// Seek to `seconds` into the sequence.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn midi_seek(&self, seconds: f64) -> Result<()> {
        self.command(Method::MidiSeek, Some(json!([seconds]))).await
    }

    /// Reset all MIDI state.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn panic(&self) -> Result<()> {
        self.command(Method::Panic, None).await
    }

    /// Mute all sound.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn mute(&self) -> Result<()> {
        self.command(Method::Mute, None).await
    }

    // Sequencer and metronome

    /// MIDI sequencer state.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn get_sequencer_info(&self) -> Result<SequencerInfo> {
        self.singleton(Method::GetSequencerInfo, None).await
    }

    /// Metronome state.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn get_metronome(&self) -> Result<MetronomeInfo> {
        self.singleton(Method::GetMetronome, None).await
    }

    /// Change metronome settings. Only the fields set in `update` are sent.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn set_metronome(&self, update: &MetronomeUpdate) -> Result<()> {
        self.command(Method::SetMetronome, Some(json!(update))).await
    }

    // Files

    /// Load any supported file (fxp, mfxp, scl, kbm, ptq, wav...).
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn load_file(&self, path: &str) -> Result<()> {
        self.command(Method::LoadFile, Some(json!([path]))).await
    }

    // Audio devices

    /// The current audio device. Returned as a bare object, not a list.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn get_audio_device_info(&self) -> Result<AudioDeviceInfo> {
        self.object(Method::GetAudioDeviceInfo, None).await
    }

    /// Available audio devices.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn get_list_of_audio_devices(&self) -> Result<Vec<AudioDeviceInfo>> {
        self.many(Method::GetListOfAudioDevices, None).await
    }

    // Activation and lifecycle

    /// Activate with a serial number.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn activate(&self, serial: &str, device_name: &str) -> Result<()> {
        self.command(Method::Activate, Some(json!([serial, device_name])))
            .await
    }

    /// Licence activation state.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn get_activation_info(&self) -> Result<ActivationInfo> {
        self.singleton(Method::GetActivationInfo, None).await
    }

    /// Quit the application immediately.
    ///
    /// # Errors
    ///
    /// See [`PianoteqClient::invoke`].
    pub async fn quit(&self) -> Result<()> {
        self.command(Method::Quit, None).await
    }
}

/// `loadPreset` dispatches on argument count: `[name]` or `[name, bank, type]`.
fn load_preset_params(name: &str, bank: Option<&str>, preset_type: PresetType) -> Value {
    match bank {
        Some(bank) => json!([name, bank, preset_type]),
        None => json!([name]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trailing_slash_stripped() {
        let client = PianoteqClient::new("http://127.0.0.1:8081//");
        assert_eq!(client.base_url(), "http://127.0.0.1:8081");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8081/jsonrpc");
    }

    #[test]
    fn test_load_preset_arity() {
        assert_eq!(
            load_preset_params("YC5 Basic", None, PresetType::Full),
            json!(["YC5 Basic"])
        );
        assert_eq!(
            load_preset_params("YC5 Basic", Some("My Bank"), PresetType::Full),
            json!(["YC5 Basic", "My Bank", "full"])
        );
        assert_eq!(
            load_preset_params("Hall", Some(""), PresetType::Reverb),
            json!(["Hall", "", "reverb"])
        );
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let client = PianoteqClient::new("http://localhost:8081");
        assert_eq!(client.next_id(), 1);
        assert_eq!(client.next_id(), 2);
    }

    #[test]
    fn test_clones_share_id_sequence() {
        let client = PianoteqClient::new("http://localhost:8081");
        let handle = client.with_cancellation(CancellationToken::new());
        assert_eq!(client.next_id(), 1);
        assert_eq!(handle.next_id(), 2);

        let other = PianoteqClient::new("http://localhost:8081");
        assert_eq!(other.next_id(), 1);
    }
}
