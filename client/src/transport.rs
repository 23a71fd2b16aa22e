//! The single seam between the client and the network.

use std::sync::Arc;

use reqwest::Url;
use reqwest::blocking::Client as ReqwestClient;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::error;

pub use reqwest::Method;

use crate::{GrafanaConfig, GrafanaError};

const USER_AGENT_VALUE: &str = concat!("GrafanaClient/", env!("CARGO_PKG_VERSION"));

/// One request against the API root: method, interpolated path, optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }

    pub fn post<B: serde::Serialize + ?Sized>(
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, GrafanaError> {
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            body: Some(encode_body(body)?),
        })
    }

    pub fn put<B: serde::Serialize + ?Sized>(
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, GrafanaError> {
        Ok(Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(encode_body(body)?),
        })
    }
}

fn encode_body<B: serde::Serialize + ?Sized>(body: &B) -> Result<Value, GrafanaError> {
    serde_json::to_value(body).map_err(|e| {
        error!("cannot encode request body: {e}");
        GrafanaError::Json(e)
    })
}

/// Status and undecoded body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub text: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }
}

/// Issues exactly one request per call. Any status code is a completed
/// exchange; only failures to complete the exchange are errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, GrafanaError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, GrafanaError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, GrafanaError> {
        (**self).send(request)
    }
}

/// Blocking `reqwest` transport bound to one Grafana instance.
#[derive(Debug)]
pub struct HttpTransport {
    api_root: String,
    client: ReqwestClient,
}

impl HttpTransport {
    pub fn new(config: &GrafanaConfig) -> Result<Self, GrafanaError> {
        config.validate()?;

        let api_root = config.api_root();
        Url::parse(&api_root)?;

        let headers = Self::set_headers(&config.token)?;
        let mut builder = ReqwestClient::builder()
            .default_headers(headers)
            .timeout(config.timeout());
        if config.http2 {
            builder = builder.http2_prior_knowledge();
        }

        Ok(Self {
            api_root,
            client: builder.build()?,
        })
    }

    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, path: &str) -> Result<Url, GrafanaError> {
        Ok(Url::parse(&format!("{}{path}", self.api_root))?)
    }

    fn set_headers(token: &str) -> Result<HeaderMap, GrafanaError> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, GrafanaError> {
        let url = self.url(&request.path)?;
        let req = self.client.request(request.method.clone(), url);
        let req = if let Some(b) = &request.body {
            req.json(b)
        } else {
            req
        };
        let response = req.send()?;
        let status = response.status().as_u16();
        let text = response.text()?;
        Ok(RawResponse { status, text })
    }
}
