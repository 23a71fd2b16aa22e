//! Blocking client for the Grafana HTTP API.
//!
//! Every operation validates its arguments, issues exactly one request per
//! API call through a [`Transport`], and checks the response against an
//! [`Expect`] predicate. There are no retries: the first failure is logged
//! and returned.

use serde_json::Value;
use tracing::{debug, error};

mod api;
mod config;
mod error;
mod expect;
mod resolver;
#[cfg(test)]
mod testing;
mod transport;
mod url_encoding;
mod validation;

pub use api::{DashboardApi, FolderApi, SnapshotApi};
pub use config::{ConfigError, DEFAULT_TIMEOUT_SECS, GrafanaConfig};
pub use error::GrafanaError;
pub use expect::Expect;
pub use grafana_common::{
    DashboardIdentity, DiffType, Endpoint, FolderEntry, FolderRef, NewSnapshot, VersionRef,
};
pub use resolver::{FolderResolver, FolderSource};
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct GrafanaClientBuilder {
    timeout_secs: Option<u64>,
    http2: Option<bool>,
}

impl GrafanaClientBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout_secs: None,
            http2: None,
        }
    }

    /// Overrides `timeout_secs` from the configuration.
    #[must_use]
    pub const fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Overrides `http2` from the configuration.
    #[must_use]
    pub const fn http2(mut self, http2: bool) -> Self {
        self.http2 = Some(http2);
        self
    }

    pub fn build(self, config: &GrafanaConfig) -> Result<GrafanaClient, GrafanaError> {
        let mut config = config.clone();
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(http2) = self.http2 {
            config.http2 = http2;
        }
        Ok(GrafanaClient::with_transport(HttpTransport::new(&config)?))
    }

    #[must_use]
    pub fn build_with_transport<T: Transport + 'static>(self, transport: T) -> GrafanaClient {
        GrafanaClient::with_transport(transport)
    }
}

impl Default for GrafanaClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Response that passed its predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    text: String,
    json: Option<Value>,
}

impl ApiResponse {
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Decoded body, or `Value::Null` when the body was not JSON.
    #[must_use]
    pub fn into_json(self) -> Value {
        self.json.unwrap_or(Value::Null)
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Decode into a typed shape. A body that passed its predicate but does
    /// not fit `T` is still an unexpected response.
    pub fn decode<T: serde::de::DeserializeOwned>(self) -> Result<T, GrafanaError> {
        let decoded = match self.json {
            Some(json) => serde_json::from_value(json).ok(),
            None => None,
        };
        decoded.ok_or_else(|| {
            error!(status = self.status, body = %self.text, "response does not match expected shape");
            GrafanaError::UnexpectedResponse {
                status: self.status,
                body: self.text,
            }
        })
    }
}

pub struct GrafanaClient {
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for GrafanaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrafanaClient").finish_non_exhaustive()
    }
}

impl GrafanaClient {
    #[must_use]
    pub const fn builder() -> GrafanaClientBuilder {
        GrafanaClientBuilder::new()
    }

    pub fn new(config: &GrafanaConfig) -> Result<Self, GrafanaError> {
        Self::builder().build(config)
    }

    #[must_use]
    pub fn with_transport<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    #[must_use]
    pub const fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    #[must_use]
    pub const fn folder(&self) -> FolderApi<'_> {
        FolderApi::new(self)
    }

    #[must_use]
    pub const fn snapshot(&self) -> SnapshotApi<'_> {
        SnapshotApi::new(self)
    }

    /// Issue one request and accept the response only if `expect` holds.
    ///
    /// A rejected response is logged with its body and returned as
    /// [`GrafanaError::UnexpectedResponse`].
    pub fn call(&self, request: &ApiRequest, expect: &Expect) -> Result<ApiResponse, GrafanaError> {
        debug!(method = %request.method, path = %request.path, "calling Grafana API");

        let raw = self.transport.send(request).inspect_err(|e| {
            error!(method = %request.method, path = %request.path, "request failed: {e}");
        })?;

        let json = if expect.inspects_body() {
            serde_json::from_str::<Value>(&raw.text).ok()
        } else {
            None
        };

        if expect.matches(raw.status, json.as_ref()) {
            Ok(ApiResponse {
                status: raw.status,
                text: raw.text,
                json,
            })
        } else {
            error!(
                method = %request.method,
                path = %request.path,
                status = raw.status,
                body = %raw.text,
                "unexpected response from Grafana"
            );
            Err(GrafanaError::UnexpectedResponse {
                status: raw.status,
                body: raw.text,
            })
        }
    }
}
