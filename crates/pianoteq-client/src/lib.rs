//! # Pianoteq Client
//!
//! Typed async client for the Pianoteq JSON-RPC API.
//!
//! ```no_run
//! # async fn demo() -> Result<(), pianoteq_client::ClientError> {
//! use pianoteq_client::{PianoteqClient, PresetType};
//!
//! let client = PianoteqClient::new("http://127.0.0.1:8081");
//! let info = client.get_info().await?;
//! println!("running {:?}", info.version);
//!
//! for preset in client.get_list_of_presets(PresetType::Full).await? {
//!     println!("{} [{}]", preset.name, preset.bank);
//! }
//! client.load_preset("NY Steinway D Classical", None, PresetType::Full).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod jsonrpc;
pub mod method;
pub mod models;
pub mod shape;
mod client;

pub use client::PianoteqClient;
pub use error::{ClientError, ErrorKind, Result};
pub use jsonrpc::{RpcError, RpcRequest, RpcResponse};
pub use method::Method;
pub use models::{
    ActivationInfo, AudioDeviceInfo, FunctionInfo, MetronomeInfo, MetronomeUpdate,
    ParameterInfo, ParameterUpdate, ParsePresetTypeError, PerformanceInfo, PianoteqInfo,
    PresetInfo, PresetType, SequencerInfo,
};
pub use shape::ResultShape;
pub use tokio_util::sync::CancellationToken;
