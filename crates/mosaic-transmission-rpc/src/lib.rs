//! # Typed client for the Transmission JSON-RPC protocol.
//!
//! usage:
//!
//! ```rust,ignore
//! use mosaic_transmission_rpc::{ClientConfig, TorrentSource, TransmissionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:9091").with_credentials("admin", "secret");
//!     let client = TransmissionClient::try_new(config)?;
//!     client.connect().await?;
//!
//!     let added = client
//!         .add(TorrentSource::Filename("magnet:?xt=urn:btih:...".into()))
//!         .await?;
//!     println!("Added torrent: {:?}", added.torrent().name);
//!
//!     for torrent in client.torrents(&["id", "name", "status"], &[]).await? {
//!         println!("{:?} active={}", torrent.name, torrent.is_active());
//!     }
//!     Ok(())
//! }
//! ```
//!

mod client;
mod config;
mod endpoint;
mod error;
mod ops;
mod request;
mod response;
mod session;
mod transport;

#[cfg(test)]
mod testutil;

#[cfg(test)]
use tracing_subscriber as _;

pub use client::TransmissionClient;
pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_MAX_SESSION_RETRIES};
pub use endpoint::{DEFAULT_SUFFIX, RPC_SUFFIX, resolve_endpoint};
pub use error::RpcError;
pub use ops::ReqwestExchange;
pub use request::{Action, RpcRequest, TorrentSource};
pub use response::{AddedTorrent, RpcResponse, SUCCESS};
pub use session::{SESSION_ID_HEADER, SessionNegotiator};

pub use mosaic_transmission_types as types;
