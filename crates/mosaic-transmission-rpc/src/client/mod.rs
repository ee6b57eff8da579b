//! Action façade over the transport.

use tracing::debug;
use url::Url;

use mosaic_transmission_types::{SessionInfo, SessionStat, Torrent, TorrentId};

use crate::config::ClientConfig;
use crate::ops::{HttpExchange, ReqwestExchange};
use crate::request::{Action, RpcRequest, TorrentSource};
use crate::response::{AddedTorrent, RpcResponse};
use crate::transport::Transport;
use crate::RpcError;


/// TransmissionClient talks to one Transmission daemon over its JSON-RPC interface.
///
/// The client is shareable by reference across tasks; the session id is kept
/// behind a lock and refreshed whenever the daemon rejects it.
#[allow(missing_debug_implementations, private_bounds)]
pub struct TransmissionClient<T: HttpExchange = ReqwestExchange> {
    transport: Transport<T>,
}

impl TransmissionClient {
    /// Create a new TransmissionClient.
    ///
    /// The endpoint is resolved here; no request is sent until the first call.
    pub fn try_new(config: ClientConfig) -> Result<Self, RpcError> {
        debug!("Creating Transmission client with {config:?}");
        let exchange = ReqwestExchange::try_new(config.timeout)?;
        let transport = Transport::new(&config, exchange)?;
        debug!("Transmission RPC endpoint is {}", transport.endpoint());
        Ok(Self { transport })
    }

    /// Create a client for `host` without credentials.
    pub fn from_host(host: &str) -> Result<Self, RpcError> {
        Self::try_new(ClientConfig::new(host))
    }
}

#[allow(private_bounds)]
impl<T: HttpExchange> TransmissionClient<T> {
    /// Create a TransmissionClient with a custom exchange implementation.
    /// This is primarily useful for testing with mocks.
    #[cfg(test)]
    pub(crate) fn with_exchange(config: ClientConfig, exchange: T) -> Result<Self, RpcError> {
        Ok(Self {
            transport: Transport::new(&config, exchange)?,
        })
    }

    /// The resolved RPC URL.
    pub fn endpoint(&self) -> &Url {
        self.transport.endpoint()
    }

    /// Whether a session id has been negotiated yet.
    pub fn is_initialized(&self) -> bool {
        self.transport.is_initialized()
    }

    /// Negotiates the session id with a cheap `session-stats` call.
    pub async fn connect(&self) -> Result<(), RpcError> {
        debug!("Connecting to Transmission daemon");
        let response = self.transport.send(&RpcRequest::session_stats()).await?;
        if !response.succeeded() {
            return Err(RpcError::Server(response.result));
        }
        debug!("Connected to Transmission daemon");
        Ok(())
    }

    /// Sends an arbitrary request and returns the raw response.
    pub async fn call(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        debug!("Calling {}", request.method);
        self.transport.send(request).await
    }

    /// Torrents matching `ids` (all when empty), with only `fields` populated
    /// (every known field when empty).
    pub async fn torrents(
        &self,
        fields: &[&str],
        ids: &[TorrentId],
    ) -> Result<Vec<Torrent>, RpcError> {
        debug!("Getting torrents {ids:?}");
        let torrents: Vec<Torrent> = self
            .transport
            .send(&RpcRequest::torrent_get(fields, ids))
            .await?
            .decode_key("torrents")?;
        debug!("Got {} torrents", torrents.len());
        Ok(torrents)
    }

    /// Every torrent with every known field.
    pub async fn all_torrents(&self) -> Result<Vec<Torrent>, RpcError> {
        self.torrents(&[], &[]).await
    }

    /// A single torrent, or `None` when the daemon does not know `id`.
    pub async fn torrent(
        &self,
        id: impl Into<TorrentId>,
        fields: &[&str],
    ) -> Result<Option<Torrent>, RpcError> {
        let mut torrents = self.torrents(fields, &[id.into()]).await?;
        Ok(if torrents.is_empty() {
            None
        } else {
            Some(torrents.swap_remove(0))
        })
    }

    /// Starts the given torrents, or every torrent when `ids` is empty.
    pub async fn start_torrents(&self, ids: &[TorrentId]) -> Result<bool, RpcError> {
        self.torrent_action(Action::TorrentStart, ids).await
    }

    /// Starts one torrent.
    pub async fn start_torrent(&self, id: impl Into<TorrentId>) -> Result<bool, RpcError> {
        self.start_torrents(&[id.into()]).await
    }

    /// Starts the given torrents, bypassing the download queue.
    pub async fn start_torrents_now(&self, ids: &[TorrentId]) -> Result<bool, RpcError> {
        self.torrent_action(Action::TorrentStartNow, ids).await
    }

    /// Starts one torrent, bypassing the download queue.
    pub async fn start_torrent_now(&self, id: impl Into<TorrentId>) -> Result<bool, RpcError> {
        self.start_torrents_now(&[id.into()]).await
    }

    /// Stops the given torrents, or every torrent when `ids` is empty.
    pub async fn stop_torrents(&self, ids: &[TorrentId]) -> Result<bool, RpcError> {
        self.torrent_action(Action::TorrentStop, ids).await
    }

    /// Stops one torrent.
    pub async fn stop_torrent(&self, id: impl Into<TorrentId>) -> Result<bool, RpcError> {
        self.stop_torrents(&[id.into()]).await
    }

    /// Adds a torrent. A torrent the daemon already has comes back as
    /// [`AddedTorrent::Duplicate`].
    pub async fn add(&self, source: TorrentSource) -> Result<AddedTorrent, RpcError> {
        debug!("Adding torrent from {source:?}");
        let added = self
            .transport
            .send(&RpcRequest::torrent_add(&source))
            .await?
            .decode_added()?;
        debug!("Added {added:?}");
        Ok(added)
    }

    /// Removes the given torrents, optionally deleting their downloaded data.
    pub async fn remove_torrents(
        &self,
        ids: &[TorrentId],
        delete_local_data: bool,
    ) -> Result<bool, RpcError> {
        debug!("Removing torrents {ids:?}, delete_local_data={delete_local_data}");
        let response = self
            .transport
            .send(&RpcRequest::torrent_remove(ids, delete_local_data))
            .await?;
        Ok(succeeded(&response))
    }

    /// Session statistics.
    pub async fn session_stats(&self) -> Result<SessionStat, RpcError> {
        debug!("Getting session statistics");
        let stats: SessionStat = self
            .transport
            .send(&RpcRequest::session_stats())
            .await?
            .decode_arguments()?;
        debug!("Session statistics: {stats:?}");
        Ok(stats)
    }

    /// Every session setting.
    pub async fn session_info(&self) -> Result<SessionInfo, RpcError> {
        self.get_session(None).await
    }

    /// The session settings named in `fields`; the rest stay `None`.
    pub async fn session_info_fields(&self, fields: &[&str]) -> Result<SessionInfo, RpcError> {
        self.get_session(Some(fields)).await
    }

    /// Applies every populated field of `info`; unset fields are left alone.
    pub async fn set_session_info(&self, info: &SessionInfo) -> Result<bool, RpcError> {
        debug!("Updating session settings");
        let response = self.transport.send(&RpcRequest::session_set(info)?).await?;
        Ok(succeeded(&response))
    }

    async fn get_session(&self, fields: Option<&[&str]>) -> Result<SessionInfo, RpcError> {
        debug!("Getting session settings {fields:?}");
        let info: SessionInfo = self
            .transport
            .send(&RpcRequest::session_get(fields))
            .await?
            .decode_arguments()?;
        debug!("Session settings: {info:?}");
        Ok(info)
    }

    async fn torrent_action(&self, action: Action, ids: &[TorrentId]) -> Result<bool, RpcError> {
        debug!("Sending {action} for torrents {ids:?}");
        let response = self
            .transport
            .send(&RpcRequest::torrent_action(action, ids))
            .await?;
        Ok(succeeded(&response))
    }
}

fn succeeded(response: &RpcResponse) -> bool {
    if !response.succeeded() {
        debug!("Daemon answered {:?}", response.result);
    }
    response.succeeded()
}
