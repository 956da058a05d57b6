//! Source fetchers.
//!
//! A [`Fetch`] implementation turns a source reference into the bytes of the
//! CSV it names. [`SourceFetcher`] is the default: URLs go to
//! [`HttpFetcher`], everything else is read from disk by [`FileFetcher`].

use dashfeed_core::config::is_url;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// Why a reference could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported URL scheme `{0}` (only http:// is supported)")]
    UnsupportedScheme(String),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Retrieves the raw bytes behind a source reference.
///
/// Implementations are shared between concurrently running loads, so they
/// must not rely on `&mut self`.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, reference: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// Reads references as filesystem paths, optionally relative to a base directory.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn path_for(&self, reference: &str) -> PathBuf {
        match &self.base {
            Some(base) => base.join(reference),
            None => PathBuf::from(reference),
        }
    }
}

impl Fetch for FileFetcher {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.path_for(reference);
        tracing::trace!(path = %path.display(), "reading source file");
        Ok(tokio::fs::read(&path).await?)
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Plain `http://` GET. Any non-2xx response is a failure.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client<HttpConnector, Empty<Bytes>>,
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher").finish_non_exhaustive()
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, FetchError> {
        let uri = reference
            .parse::<hyper::Uri>()
            .map_err(|e| FetchError::InvalidUrl {
                url: reference.to_string(),
                reason: e.to_string(),
            })?;

        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => return Err(FetchError::UnsupportedScheme(other.to_string())),
            None => {
                return Err(FetchError::InvalidUrl {
                    url: reference.to_string(),
                    reason: "missing scheme".to_string(),
                })
            }
        }

        tracing::trace!(%uri, "requesting source");
        let response = self
            .client
            .get(uri)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: reference.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?
            .to_bytes();
        Ok(body.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Sends URLs to [`HttpFetcher`] and paths to [`FileFetcher`].
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    file: FileFetcher,
    http: HttpFetcher,
}

impl SourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base`. URLs are unaffected.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            file: FileFetcher::with_base(base),
            http: HttpFetcher::new(),
        }
    }
}

impl Fetch for SourceFetcher {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, FetchError> {
        if is_url(reference) {
            self.http.fetch(reference).await
        } else {
            self.file.fetch(reference).await
        }
    }
}
