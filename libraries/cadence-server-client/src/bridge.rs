//! Blocking collaborator adapters over the async client.
//!
//! The playback session runs on a plain thread, so statistics and indicator
//! updates are queued onto a tokio channel and sent by one worker task in
//! the order they were issued.

use crate::client::CadenceServerClient;
use crate::error::ServerClientError;
use cadence_core::{
    BackendTrackId, CadenceError, CatalogEntry, CurrentTrackIndicator, ListeningDelta,
    SessionGateway, TrackCatalog,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug)]
enum BridgeRequest {
    Upsert(ListeningDelta),
    CurrentTrack(Option<BackendTrackId>),
}

/// [`SessionGateway`] and [`CurrentTrackIndicator`] backed by HTTP.
///
/// Calls never block: they enqueue and return. Clones share one queue.
#[derive(Debug, Clone)]
pub struct HttpStatsBridge {
    tx: mpsc::Sender<BridgeRequest>,
}

impl HttpStatsBridge {
    /// Spawn the worker on `runtime` and return the bridge with its task.
    ///
    /// The worker exits once every clone of the bridge has been dropped and
    /// the queue is drained.
    pub fn spawn(
        client: CadenceServerClient,
        capacity: usize,
        runtime: &Handle,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = runtime.spawn(run_worker(client, rx));
        (Self { tx }, worker)
    }

    fn enqueue(&self, request: BridgeRequest) -> Result<(), ServerClientError> {
        self.tx.try_send(request).map_err(|e| match e {
            TrySendError::Full(_) => ServerClientError::QueueUnavailable("queue full".into()),
            TrySendError::Closed(_) => {
                ServerClientError::QueueUnavailable("worker stopped".into())
            }
        })
    }
}

impl SessionGateway for HttpStatsBridge {
    fn upsert_listening(&self, delta: &ListeningDelta) -> cadence_core::Result<()> {
        self.enqueue(BridgeRequest::Upsert(delta.clone()))
            .map_err(ServerClientError::into_gateway)
    }
}

impl CurrentTrackIndicator for HttpStatsBridge {
    fn set_current_track(&self, track_id: Option<&BackendTrackId>) -> cadence_core::Result<()> {
        self.enqueue(BridgeRequest::CurrentTrack(track_id.cloned()))
            .map_err(|e| CadenceError::surface(e.to_string()))
    }
}

async fn run_worker(client: CadenceServerClient, mut rx: mpsc::Receiver<BridgeRequest>) {
    debug!("Stats bridge worker started");

    while let Some(request) = rx.recv().await {
        match request {
            BridgeRequest::Upsert(delta) => {
                if let Err(e) = client.upsert_listening(&delta).await {
                    warn!(track_id = %delta.track_id, error = %e, "Failed to upsert listening delta");
                }
            }
            BridgeRequest::CurrentTrack(track_id) => {
                if let Err(e) = client.set_current_track(track_id.as_ref()).await {
                    warn!(error = %e, "Failed to update current track");
                }
            }
        }
    }

    debug!("Stats bridge worker stopped");
}

/// [`TrackCatalog`] that fetches over HTTP.
///
/// `catalog_entries` blocks on `runtime`, so it must be called from outside
/// the runtime's worker threads (the playback session thread is fine).
#[derive(Debug, Clone)]
pub struct HttpTrackCatalog {
    client: CadenceServerClient,
    runtime: Handle,
}

impl HttpTrackCatalog {
    /// Create a catalog that runs requests on `runtime`.
    pub fn new(client: CadenceServerClient, runtime: Handle) -> Self {
        Self { client, runtime }
    }
}

impl TrackCatalog for HttpTrackCatalog {
    fn catalog_entries(&self) -> cadence_core::Result<Vec<CatalogEntry>> {
        self.runtime
            .block_on(self.client.fetch_catalog())
            .map_err(ServerClientError::into_catalog)
    }
}
