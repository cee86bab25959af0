// crates/patterns-contract/src/client.rs
// ============================================================================
// Module: Patterns Client
// Description: GET-only HTTP client for the pattern directory API.
// Purpose: Send requests to the sandbox as the production virtual host.
// Dependencies: reqwest, tracing, url
// ============================================================================

//! ## Overview
//! [`PatternsClient`] appends a query suffix to the configured base URL and
//! issues a GET with `Accept: application/json` and a fixed `Host` header.
//! Only GET is exposed: the target may be a production dataset, so nothing in
//! this crate can mutate it.
//! Invariants:
//! - Redirects are not followed.
//! - Non-success statuses are returned to the caller, not raised.
//! - Transport failures surface as [`ClientError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::header::HOST;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ContractConfig;
use crate::tls::TlsError;
use crate::tls::client_config;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Transport-level failures. These are test errors, not contract violations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL plus suffix did not form a valid URL.
    #[error("invalid request url {url}: {reason}")]
    InvalidUrl {
        /// Attempted URL.
        url: String,
        /// Parse failure description.
        reason: String,
    },
    /// Configured `Host` value is not a valid header value.
    #[error("invalid host header: {0}")]
    InvalidHost(String),
    /// TLS configuration failed.
    #[error(transparent)]
    Tls(#[from] TlsError),
    /// HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Build(String),
    /// Request could not be sent or the response could not be read.
    #[error("request to {url} failed: {reason}")]
    Send {
        /// Request URL.
        url: String,
        /// Failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Response
// ============================================================================

/// Status and raw body of one API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// URL the request was sent to.
    pub url: String,
    /// Raw response body.
    pub body: String,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Read-only client for the pattern directory API.
#[derive(Debug, Clone)]
pub struct PatternsClient {
    /// Underlying blocking HTTP client.
    http: Client,
    /// Base URL; suffixes are appended verbatim.
    base_url: String,
    /// `Host` header sent with every request.
    host: HeaderValue,
}

impl PatternsClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the host header, TLS setup, or HTTP
    /// client construction fails.
    pub fn new(config: &ContractConfig) -> Result<Self, ClientError> {
        let host = HeaderValue::from_str(&config.host)
            .map_err(|err| ClientError::InvalidHost(err.to_string()))?;
        let tls = client_config(config.verify_hostname, config.ca_file.as_deref())?;
        let mut builder = Client::builder().redirect(Policy::none()).use_preconfigured_tls(tls);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            host,
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `GET <base_url><query>` and returns the status and body.
    ///
    /// `query` may be empty or start with `/` or `?`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the URL is invalid or the request fails
    /// before a complete response body is read.
    pub fn get(&self, query: &str) -> Result<ApiResponse, ClientError> {
        let raw = format!("{}{query}", self.base_url);
        let url = Url::parse(&raw).map_err(|err| ClientError::InvalidUrl {
            url: raw.clone(),
            reason: err.to_string(),
        })?;
        debug!(url = %url, "sending pattern directory request");
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .header(HOST, self.host.clone())
            .send()
            .map_err(|err| ClientError::Send {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|err| ClientError::Send {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        debug!(url = %url, status, bytes = body.len(), "received pattern directory response");
        Ok(ApiResponse {
            status,
            url: url.to_string(),
            body,
        })
    }
}
