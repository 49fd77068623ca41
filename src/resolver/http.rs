//! HTTP manifest resolver.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::{pom_url, DependencyResolver};
use crate::parser::{pom, Coordinate, ParseError};

/// Default connect and read timeout for manifest downloads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("pomgraph/", env!("CARGO_PKG_VERSION"));

/// Errors raised while resolving a single manifest.
///
/// These are transient: [`HttpResolver::resolve`] logs them and reports
/// zero dependencies instead of propagating them.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed before a response arrived (DNS, connect, timeout).
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The repository answered with something other than 200 OK.
    #[error("HTTP error {status} for {url}")]
    Status { url: String, status: u16 },

    /// The manifest body could not be parsed.
    #[error("Invalid manifest at {url}: {source}")]
    Manifest {
        url: String,
        #[source]
        source: ParseError,
    },
}

impl ResolveError {
    /// Whether retrying later could succeed. Resolution errors never
    /// indicate a problem with the caller's configuration.
    pub fn is_transient(&self) -> bool {
        !matches!(self, ResolveError::Client(_))
    }
}

/// Settings for [`HttpResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Time allowed for the whole request, body included.
    pub timeout: Duration,
}

impl ResolverConfig {
    /// Uses the same value for connect and request timeouts.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            connect_timeout: timeout,
            timeout,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }
}

/// Resolves dependencies by downloading POMs over HTTP.
///
/// Blocks the calling thread for at most the configured timeout per
/// manifest.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    client: Client,
}

impl HttpResolver {
    /// Creates a resolver with its own blocking HTTP client.
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ResolveError::Client)?;

        Ok(Self { client })
    }

    /// Downloads a manifest body. Anything but 200 OK is an error.
    pub fn fetch_manifest(&self, url: &str) -> Result<String, ResolveError> {
        debug!("Fetching manifest: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| ResolveError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ResolveError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| ResolveError::Http {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches and parses the manifest for `coordinate`, surfacing every
    /// failure to the caller.
    pub fn try_resolve(
        &self,
        coordinate: &Coordinate,
        repository: &str,
    ) -> Result<Vec<String>, ResolveError> {
        let url = pom_url(coordinate, repository);
        let content = self.fetch_manifest(&url)?;

        pom::dependency_ids(&content).map_err(|source| ResolveError::Manifest { url, source })
    }
}

impl DependencyResolver for HttpResolver {
    fn resolve(&self, coordinate: &Coordinate, repository: &str) -> Vec<String> {
        match self.try_resolve(coordinate, repository) {
            Ok(deps) => {
                debug!(
                    coordinate = %coordinate,
                    count = deps.len(),
                    "Resolved direct dependencies"
                );
                deps
            }
            Err(err) => {
                warn!(
                    coordinate = %coordinate,
                    error = %err,
                    "Could not resolve dependencies; treating as none"
                );
                Vec::new()
            }
        }
    }
}
