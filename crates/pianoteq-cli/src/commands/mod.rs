//! CLI command implementations.

pub mod config;
pub mod control;
pub mod favorites;
pub mod info;
pub mod metronome;
pub mod midi;
pub mod params;
pub mod presets;

use pianoteq_client::PianoteqClient;
use pianoteq_core::{Config, Favorites, JsonFileStore};

pub use config::run_config;
pub use control::{run_ab, run_activate, run_load_file, run_simple, run_step};
pub use favorites::run_favorites;
pub use info::{run_activation, run_audio, run_functions, run_info, run_perf, run_sequencer};
pub use metronome::run_metronome;
pub use midi::run_midi;
pub use params::{run_params, run_randomize, run_set_param};
pub use presets::{run_delete, run_load, run_presets, run_save};

/// Shared state handed to every command.
pub struct Context {
    /// Client bound to the configured server and the Ctrl-C token.
    pub client: PianoteqClient,
    /// Loaded configuration.
    pub config: Config,
    /// Print machine-readable JSON instead of formatted text.
    pub json: bool,
}

impl Context {
    /// Open the local favorites list.
    pub async fn favorites(&self) -> anyhow::Result<Favorites<JsonFileStore>> {
        let store = JsonFileStore::new(self.config.favorites_path());
        Ok(Favorites::load(store).await?)
    }
}
