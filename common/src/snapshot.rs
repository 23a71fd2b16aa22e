use serde::Serialize;
use serde_json::Value;

/// Body of `POST /snapshots`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSnapshot {
    pub dashboard: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lifetime in seconds; Grafana keeps the snapshot forever when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<u64>,
    pub external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_key: Option<String>,
}

impl NewSnapshot {
    #[must_use]
    pub const fn new(dashboard: Value) -> Self {
        Self {
            dashboard,
            name: None,
            expires: None,
            external: false,
            key: None,
            delete_key: None,
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn expires(mut self, seconds: u64) -> Self {
        self.expires = Some(seconds);
        self
    }

    #[must_use]
    pub const fn external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn delete_key(mut self, delete_key: impl Into<String>) -> Self {
        self.delete_key = Some(delete_key.into());
        self
    }
}
