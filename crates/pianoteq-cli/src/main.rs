//! Pianoteq CLI - remote control for Pianoteq over its JSON-RPC API.

mod commands;
mod ui;

use clap::{Parser, Subcommand, ValueEnum};
use pianoteq_client::{CancellationToken, ClientError, PianoteqClient, PresetType};
use pianoteq_core::{Config, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{
    Context,
    config::ConfigAction,
    control::{AbAction, Direction, SimpleCommand, StepTarget},
    favorites::FavoritesAction,
    info::AudioAction,
    metronome::MetronomeArgs,
    midi::MidiAction,
    params::ParamsArgs,
    presets::{PresetArgs, PresetsArgs},
};

#[derive(Parser)]
#[command(name = "pianoteq")]
#[command(about = "Pianoteq - remote control over JSON-RPC")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Server base URL (overrides config)
    #[arg(long, global = true, env = "PIANOTEQ_URL")]
    url: Option<String>,

    /// Print JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version, current preset and load
    Info,

    /// Show CPU and voice usage
    Perf,

    /// List the server's JSON-RPC functions
    Functions,

    /// List presets
    Presets {
        /// Preset type
        #[arg(long = "type", default_value_t = PresetType::Full)]
        preset_type: PresetType,

        /// Only presets whose name, bank or instrument contains this
        #[arg(long)]
        filter: Option<String>,

        /// Only favourites
        #[arg(long)]
        favourites: bool,
    },

    /// Load a preset
    Load {
        /// Preset name
        name: String,

        /// Bank the preset lives in
        #[arg(long)]
        bank: Option<String>,

        /// Preset type
        #[arg(long = "type", default_value_t = PresetType::Full)]
        preset_type: PresetType,
    },

    /// Save the current state as a preset
    Save {
        /// Preset name
        name: String,

        /// Bank to save into
        #[arg(long)]
        bank: Option<String>,

        /// Preset type
        #[arg(long = "type", default_value_t = PresetType::Full)]
        preset_type: PresetType,
    },

    /// Delete a preset file
    Delete {
        /// Preset name
        name: String,

        /// Bank the preset lives in
        #[arg(long)]
        bank: Option<String>,

        /// Preset type
        #[arg(long = "type", default_value_t = PresetType::Full)]
        preset_type: PresetType,
    },

    /// Reset parameters to the saved preset
    Reset,

    /// Step forward
    Next {
        /// What to step through
        #[arg(value_enum, default_value_t = Target::Preset)]
        target: Target,
    },

    /// Step backward
    Prev {
        /// What to step through
        #[arg(value_enum, default_value_t = Target::Preset)]
        target: Target,
    },

    /// A/B comparison
    Ab {
        #[command(subcommand)]
        action: AbCommands,
    },

    /// Undo the last edit
    Undo,

    /// Redo the last undone edit
    Redo,

    /// List parameters
    Params {
        /// Only parameters whose id or name contains this
        #[arg(long)]
        filter: Option<String>,

        /// Only parameters in this group
        #[arg(long)]
        group: Option<String>,
    },

    /// Set a parameter (number = normalized value, otherwise text)
    SetParam {
        /// Parameter id
        id: String,

        /// Value
        value: String,
    },

    /// Randomize parameters
    Randomize {
        /// Amount between 0 and 1
        #[arg(default_value_t = 0.5)]
        amount: f64,
    },

    /// MIDI sequencer and raw messages
    Midi {
        #[command(subcommand)]
        action: MidiCommands,
    },

    /// Silence all sound
    Panic,

    /// Toggle mute
    Mute,

    /// Show the MIDI sequencer state
    Sequencer,

    /// Show or change the metronome
    Metronome {
        /// Turn the metronome on
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Turn the metronome off
        #[arg(long)]
        disable: bool,

        /// Tempo in beats per minute
        #[arg(long)]
        bpm: Option<u32>,

        /// Click volume in dB
        #[arg(long, allow_negative_numbers = true)]
        volume_db: Option<f64>,

        /// Time signature, e.g. 3/4
        #[arg(long)]
        timesig: Option<String>,

        /// Accent the first beat
        #[arg(long)]
        accentuate: Option<bool>,
    },

    /// Load a file on the server's disk
    LoadFile {
        /// File path
        path: String,
    },

    /// Audio device information
    Audio {
        #[command(subcommand)]
        action: AudioCommands,
    },

    /// Activate the licence
    Activate {
        /// Serial number
        serial: String,

        /// Name to register this device under
        device_name: String,
    },

    /// Show licence activation state
    Activation,

    /// Quit Pianoteq
    Quit,

    /// Local favorites
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesCommands>,
    },

    /// Configuration get/set
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Preset,
    Favourite,
    Instrument,
}

#[derive(Subcommand)]
enum AbCommands {
    /// Switch between A and B
    Switch,

    /// Copy the current slot to the other one
    Copy,
}

#[derive(Subcommand)]
enum MidiCommands {
    /// Load a MIDI file into the sequencer
    Load {
        /// File path on the server's disk
        path: String,
    },

    /// Save the sequencer contents to a MIDI file
    Save {
        /// File path on the server's disk
        path: String,
    },

    /// Send raw messages, e.g. "90 3C 64" "80 3C 00"
    Send {
        /// Hex bytes per message
        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Start playback
    Play,

    /// Stop playback
    Stop,

    /// Pause playback
    Pause,

    /// Rewind to the start
    Rewind,

    /// Start recording
    Record,

    /// Seek to a position
    Seek {
        /// Position in seconds
        seconds: f64,
    },
}

#[derive(Subcommand)]
enum AudioCommands {
    /// Current device
    Info,

    /// Available devices
    List,
}

#[derive(Subcommand)]
enum FavoritesCommands {
    /// List favorites
    List {
        /// Also list presets the server marks as favourite
        #[arg(long)]
        server: bool,
    },

    /// Add a preset
    Add {
        /// Preset name
        name: String,
    },

    /// Remove a preset
    Remove {
        /// Preset name
        name: String,
    },

    /// Add or remove a preset
    Toggle {
        /// Preset name
        name: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., server.baseUrl)
        key: String,
    },

    /// Set a configuration value (rewrites the file as plain JSON, dropping comments)
    Set {
        /// Configuration key (e.g., server.baseUrl)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show full configuration
    Show,

    /// Validate configuration
    Validate,

    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config commands must work even when the file is broken
    let command = match cli.command {
        Some(Commands::Config { action }) => {
            init_logging(cli.verbose, LogFormat::Pretty);
            return commands::run_config(config_action(action));
        }
        other => other.unwrap_or(Commands::Info),
    };

    let config = Config::load_default()?;
    init_logging(cli.verbose || config.settings.debug, config.settings.log_format);

    let base_url = cli
        .url
        .unwrap_or_else(|| config.server.base_url.clone());
    tracing::debug!(url = %base_url, "using server");

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let ctx = Context {
        client: PianoteqClient::new(&base_url).with_cancellation(cancel),
        config,
        json: cli.json,
    };

    if let Err(e) = run(&ctx, command).await {
        report(&e, ctx.client.base_url());
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(false)).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

async fn run(ctx: &Context, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Info => commands::run_info(ctx).await,
        Commands::Perf => commands::run_perf(ctx).await,
        Commands::Functions => commands::run_functions(ctx).await,

        Commands::Presets {
            preset_type,
            filter,
            favourites,
        } => {
            let args = PresetsArgs {
                preset_type,
                filter,
                favourites_only: favourites,
            };
            commands::run_presets(ctx, args).await
        }
        Commands::Load {
            name,
            bank,
            preset_type,
        } => {
            let args = PresetArgs {
                name,
                bank,
                preset_type,
            };
            commands::run_load(ctx, args).await
        }
        Commands::Save {
            name,
            bank,
            preset_type,
        } => {
            let args = PresetArgs {
                name,
                bank,
                preset_type,
            };
            commands::run_save(ctx, args).await
        }
        Commands::Delete {
            name,
            bank,
            preset_type,
        } => {
            let args = PresetArgs {
                name,
                bank,
                preset_type,
            };
            commands::run_delete(ctx, args).await
        }

        Commands::Next { target } => commands::run_step(ctx, Direction::Next, target.into()).await,
        Commands::Prev { target } => commands::run_step(ctx, Direction::Prev, target.into()).await,

        Commands::Ab { action } => {
            let action = match action {
                AbCommands::Switch => AbAction::Switch,
                AbCommands::Copy => AbAction::Copy,
            };
            commands::run_ab(ctx, action).await
        }

        Commands::Reset => commands::run_simple(ctx, SimpleCommand::Reset).await,
        Commands::Undo => commands::run_simple(ctx, SimpleCommand::Undo).await,
        Commands::Redo => commands::run_simple(ctx, SimpleCommand::Redo).await,
        Commands::Panic => commands::run_simple(ctx, SimpleCommand::Panic).await,
        Commands::Mute => commands::run_simple(ctx, SimpleCommand::Mute).await,
        Commands::Quit => commands::run_simple(ctx, SimpleCommand::Quit).await,

        Commands::Params { filter, group } => {
            commands::run_params(ctx, ParamsArgs { filter, group }).await
        }
        Commands::SetParam { id, value } => commands::run_set_param(ctx, &id, &value).await,
        Commands::Randomize { amount } => commands::run_randomize(ctx, amount).await,

        Commands::Midi { action } => {
            let action = match action {
                MidiCommands::Load { path } => MidiAction::Load { path },
                MidiCommands::Save { path } => MidiAction::Save { path },
                MidiCommands::Send { messages } => MidiAction::Send { messages },
                MidiCommands::Play => MidiAction::Play,
                MidiCommands::Stop => MidiAction::Stop,
                MidiCommands::Pause => MidiAction::Pause,
                MidiCommands::Rewind => MidiAction::Rewind,
                MidiCommands::Record => MidiAction::Record,
                MidiCommands::Seek { seconds } => MidiAction::Seek { seconds },
            };
            commands::run_midi(ctx, action).await
        }

        Commands::Sequencer => commands::run_sequencer(ctx).await,
        Commands::Metronome {
            enable,
            disable,
            bpm,
            volume_db,
            timesig,
            accentuate,
        } => {
            let args = MetronomeArgs {
                enable,
                disable,
                bpm,
                volume_db,
                timesig,
                accentuate,
            };
            commands::run_metronome(ctx, args).await
        }

        Commands::LoadFile { path } => commands::run_load_file(ctx, &path).await,

        Commands::Audio { action } => {
            let action = match action {
                AudioCommands::Info => AudioAction::Info,
                AudioCommands::List => AudioAction::List,
            };
            commands::run_audio(ctx, action).await
        }

        Commands::Activate {
            serial,
            device_name,
        } => commands::run_activate(ctx, &serial, &device_name).await,
        Commands::Activation => commands::run_activation(ctx).await,

        Commands::Favorites { action } => {
            let action = match action {
                Some(FavoritesCommands::List { server }) => FavoritesAction::List { server },
                Some(FavoritesCommands::Add { name }) => FavoritesAction::Add { name },
                Some(FavoritesCommands::Remove { name }) => FavoritesAction::Remove { name },
                Some(FavoritesCommands::Toggle { name }) => FavoritesAction::Toggle { name },
                None => FavoritesAction::List { server: false },
            };
            commands::run_favorites(ctx, action).await
        }

        Commands::Config { action } => commands::run_config(config_action(action)),
    }
}

fn config_action(action: Option<ConfigCommands>) -> ConfigAction {
    match action {
        Some(ConfigCommands::Get { key }) => ConfigAction::Get { key },
        Some(ConfigCommands::Set { key, value }) => ConfigAction::Set { key, value },
        Some(ConfigCommands::Validate) => ConfigAction::Validate,
        Some(ConfigCommands::Path) => ConfigAction::Path,
        Some(ConfigCommands::Show) | None => ConfigAction::Show,
    }
}

impl From<Target> for StepTarget {
    fn from(target: Target) -> Self {
        match target {
            Target::Preset => Self::Preset,
            Target::Favourite => Self::Favourite,
            Target::Instrument => Self::Instrument,
        }
    }
}

/// Print an error with a hint matching its kind.
fn report(err: &anyhow::Error, base_url: &str) {
    ui::error(&format!("{err:#}"));

    if let Some(hint) = err
        .downcast_ref::<ClientError>()
        .and_then(|e| hint(e, base_url))
    {
        ui::info(&hint);
    }
}

fn hint(err: &ClientError, base_url: &str) -> Option<String> {
    match err {
        ClientError::Cancelled => Some("Cancelled".to_string()),
        ClientError::Remote(rpc) => rpc
            .standard_meaning()
            .map(|meaning| format!("Remote error {}: {meaning}", rpc.code)),
        e if e.is_transport() => Some(format!(
            "Make sure Pianoteq is running with --serve at {base_url}"
        )),
        e if e.is_protocol() => Some(
            "The server answered with something that is not a valid Pianoteq response".to_string(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pianoteq_client::RpcError;
    use pianoteq_client::jsonrpc::METHOD_NOT_FOUND;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hint_for_standard_remote_code() {
        let err = ClientError::Remote(RpcError {
            code: METHOD_NOT_FOUND,
            message: "Method not found".to_string(),
            data: None,
        });
        assert_eq!(
            hint(&err, "http://127.0.0.1:8081").as_deref(),
            Some("Remote error -32601: this Pianoteq version does not support the method")
        );
    }

    #[test]
    fn test_no_hint_for_server_specific_code() {
        let err = ClientError::Remote(RpcError {
            code: 12,
            message: "preset not found".to_string(),
            data: None,
        });
        assert_eq!(hint(&err, "http://127.0.0.1:8081"), None);
    }

    #[test]
    fn test_hint_for_protocol_and_cancel() {
        assert_eq!(
            hint(&ClientError::Cancelled, "http://x").as_deref(),
            Some("Cancelled")
        );
        assert!(hint(&ClientError::EmptyResponse, "http://x").is_some());
    }
}
