//! Boundary loading and the session-scoped store.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use super::BoundaryCollection;
use crate::models::geojson::GeoJsonDocument;

/// Where the boundary document comes from.
#[derive(Debug, Clone)]
pub enum BoundarySource {
    Url(Url),
    File(PathBuf),
}

impl BoundarySource {
    /// Anything that parses as an http(s) URL is fetched; everything else is
    /// treated as a local path.
    pub fn parse(s: &str) -> Self {
        match Url::parse(s) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                BoundarySource::Url(url)
            }
            _ => BoundarySource::File(PathBuf::from(s)),
        }
    }
}

impl FromStr for BoundarySource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for BoundarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundarySource::Url(url) => write!(f, "{}", url),
            BoundarySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Why a boundary load failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch boundary document: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read boundary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse boundary document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("boundary document is not a feature collection or feature")]
    UnsupportedDocument,

    #[error("boundary document contains no features")]
    EmptyCollection,

    #[error("boundary feature has no usable geometry")]
    MissingGeometry,

    #[error("boundary feature geometry is not a polygon")]
    UnsupportedGeometry,

    #[error("boundary ring has fewer than three distinct vertices")]
    InvalidRing,
}

/// Load lifecycle of the boundary collection.
///
/// Consumers querying during `Loading` (or after a failure) see no
/// collection; a partial result is never exposed.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Arc<BoundaryCollection>),
    Failed,
}

impl LoadState {
    pub fn collection(&self) -> Option<Arc<BoundaryCollection>> {
        match self {
            LoadState::Loaded(collection) => Some(Arc::clone(collection)),
            _ => None,
        }
    }
}

/// Session-scoped holder of the boundary collection.
///
/// Loads once per session under normal operation; a reload after a failed
/// load is user-triggered. The loaded collection is shared read-only.
pub struct BoundaryStore {
    client: Client,
    state: RwLock<LoadState>,
    /// Serializes loads so concurrent callers cannot both fetch
    load_lock: tokio::sync::Mutex<()>,
}

impl BoundaryStore {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("warbler/0.1 (boundary checker)")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            state: RwLock::new(LoadState::NotLoaded),
            load_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Current load state (cheap clone; the collection is behind an Arc).
    pub fn state(&self) -> LoadState {
        self.state.read().expect("load state lock poisoned").clone()
    }

    /// The loaded collection, if any.
    pub fn collection(&self) -> Option<Arc<BoundaryCollection>> {
        self.state().collection()
    }

    /// Fetch, parse, and validate the boundary document.
    ///
    /// If a collection is already loaded it is returned as-is; the boundary
    /// set is fixed for the session.
    pub async fn load(&self, source: &BoundarySource) -> Result<Arc<BoundaryCollection>, LoadError> {
        let _guard = self.load_lock.lock().await;

        // A concurrent caller may have finished while we waited for the lock
        if let Some(existing) = self.collection() {
            return Ok(existing);
        }

        self.set_state(LoadState::Loading);
        info!("Loading boundary from {}", source);

        match self.fetch_and_validate(source).await {
            Ok(collection) => {
                info!("Loaded {} boundary features", collection.len());
                let collection = Arc::new(collection);
                self.set_state(LoadState::Loaded(Arc::clone(&collection)));
                Ok(collection)
            }
            Err(e) => {
                warn!("Boundary load failed: {}", e);
                self.set_state(LoadState::Failed);
                Err(e)
            }
        }
    }

    async fn fetch_and_validate(
        &self,
        source: &BoundarySource,
    ) -> Result<BoundaryCollection, LoadError> {
        let body = match source {
            BoundarySource::Url(url) => {
                let response = self.client.get(url.clone()).send().await?;
                response.error_for_status()?.text().await?
            }
            BoundarySource::File(path) => tokio::fs::read_to_string(path).await?,
        };

        let document: GeoJsonDocument = serde_json::from_str(&body)?;
        BoundaryCollection::from_document(document)
    }

    fn set_state(&self, state: LoadState) {
        *self.state.write().expect("load state lock poisoned") = state;
    }
}

impl Default for BoundaryStore {
    fn default() -> Self {
        Self::new()
    }
}
