//! Cadence Server Client
//!
//! HTTP implementations of the backend collaborators used by the Cadence
//! playback engine.
//!
//! # Features
//!
//! - **Listening statistics**: additive upserts of listening/skip/play deltas
//! - **Currently playing**: set or clear the listener's profile indicator
//! - **Track catalog**: fetch the `local id -> backend id` mapping
//! - **Bridges**: blocking `SessionGateway`, `CurrentTrackIndicator` and
//!   `TrackCatalog` adapters for the playback session thread
//!
//! # Example
//!
//! ```ignore
//! use cadence_server_client::{CadenceServerClient, HttpStatsBridge, ServerClientConfig};
//!
//! let runtime = tokio::runtime::Runtime::new()?;
//! let config = ServerClientConfig::with_token("https://api.cadence.example", "listener-1", token);
//! let client = CadenceServerClient::new(config)?;
//!
//! let (bridge, _worker) = HttpStatsBridge::spawn(client, 128, runtime.handle());
//! // Box::new(bridge.clone()) as the gateway, Box::new(bridge) as the indicator
//! ```

mod bridge;
mod client;
mod error;
mod types;

pub use bridge::{HttpStatsBridge, HttpTrackCatalog};
pub use client::CadenceServerClient;
pub use error::{Result, ServerClientError};
pub use types::{CurrentTrackRequest, ServerClientConfig};
