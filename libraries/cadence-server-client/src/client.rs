//! HTTP client for the Cadence backend.

use crate::error::{Result, ServerClientError};
use crate::types::{CurrentTrackRequest, ServerClientConfig};
use cadence_core::{BackendTrackId, CatalogEntry, ListeningDelta};
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Client for the listener endpoints of the Cadence backend.
///
/// Cheap to clone; clones share the HTTP connection pool and the token.
///
/// # Example
///
/// ```ignore
/// use cadence_server_client::{CadenceServerClient, ServerClientConfig};
///
/// let config = ServerClientConfig::with_token("https://api.cadence.example", "listener-1", "token");
/// let client = CadenceServerClient::new(config)?;
///
/// let catalog = client.fetch_catalog().await?;
/// println!("{} tracks mapped", catalog.len());
/// ```
#[derive(Clone)]
pub struct CadenceServerClient {
    http: Client,
    config: Arc<RwLock<ServerClientConfig>>,
}

impl CadenceServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        if config.listener_id.is_empty() {
            return Err(ServerClientError::InvalidUrl(
                "listener id cannot be empty".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ServerClientConfig { url, ..config })),
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Set the access token (e.g., after the app refreshed it).
    pub async fn set_access_token(&self, access_token: impl Into<String>) {
        self.config.write().await.access_token = Some(access_token.into());
    }

    /// Clear the stored token (logout).
    pub async fn logout(&self) {
        self.config.write().await.access_token = None;
        info!("Logged out");
    }

    /// Add a listening delta to the listener's record for the track.
    pub async fn upsert_listening(&self, delta: &ListeningDelta) -> Result<()> {
        let (url, token) = self.endpoint("listening").await?;
        debug!(
            url = %url,
            track_id = %delta.track_id,
            listening_secs = delta.listening_secs,
            "Upserting listening delta"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(delta)
            .send()
            .await
            .map_err(request_error)?;

        check_status(response).await?;
        Ok(())
    }

    /// Set or clear the listener's currently-playing track.
    pub async fn set_current_track(&self, track_id: Option<&BackendTrackId>) -> Result<()> {
        let (url, token) = self.endpoint("current-track").await?;
        debug!(url = %url, track_id = ?track_id.map(BackendTrackId::as_str), "Setting current track");

        let body = CurrentTrackRequest {
            track_id: track_id.cloned(),
        };
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        check_status(response).await?;
        Ok(())
    }

    /// Fetch every `local id -> backend id` pair of the listener's library.
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        let (url, token) = self.endpoint("catalog").await?;
        debug!(url = %url, "Fetching track catalog");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(request_error)?;

        let entries: Vec<CatalogEntry> = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| {
                ServerClientError::ParseError(format!("Failed to parse catalog response: {}", e))
            })?;

        debug!(entries = entries.len(), "Fetched track catalog");
        Ok(entries)
    }

    /// Build `{url}/api/listeners/{listener}/{resource}` and grab the token.
    async fn endpoint(&self, resource: &str) -> Result<(String, String)> {
        let config = self.config.read().await;
        let token = config
            .access_token
            .clone()
            .ok_or(ServerClientError::AuthRequired)?;
        let url = format!(
            "{}/api/listeners/{}/{}",
            config.url, config.listener_id, resource
        );
        Ok((url, token))
    }
}

impl std::fmt::Debug for CadenceServerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CadenceServerClient").finish_non_exhaustive()
    }
}

fn request_error(e: reqwest::Error) -> ServerClientError {
    if e.is_connect() || e.is_timeout() {
        ServerClientError::ServerUnreachable(e.to_string())
    } else {
        ServerClientError::Request(e)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else if status.as_u16() == 401 {
        Err(ServerClientError::AuthRequired)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ServerClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}
