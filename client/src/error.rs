use grafana_common::InvalidArgument;
use tracing::error;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum GrafanaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response (status {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
    #[error("Resolution error: {0}")]
    Resolution(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl GrafanaError {
    /// Argument errors are logged where they are raised, before any request.
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        error!("invalid argument: {message}");
        Self::InvalidArgument(message)
    }

    /// HTTP status of a rejected response, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::InvalidArgument(_)
            | Self::Transport(_)
            | Self::Resolution(_)
            | Self::Config(_)
            | Self::InvalidHeader(_)
            | Self::Json(_)
            | Self::UrlParse(_) => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<InvalidArgument> for GrafanaError {
    fn from(e: InvalidArgument) -> Self {
        Self::invalid(e.0)
    }
}
