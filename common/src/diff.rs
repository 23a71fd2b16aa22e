use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InvalidArgument;

/// Output format of `POST /dashboards/calculate-diff`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffType {
    Basic,
    #[default]
    Json,
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for DiffType {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "json" => Ok(Self::Json),
            other => Err(InvalidArgument(format!(
                "invalid diff type: '{other}' (expected 'basic' or 'json')"
            ))),
        }
    }
}

/// One side of a dashboard diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRef {
    pub dashboard_id: i64,
    pub version: i64,
}

impl VersionRef {
    #[must_use]
    pub const fn new(dashboard_id: i64, version: i64) -> Self {
        Self {
            dashboard_id,
            version,
        }
    }
}

/// Body of `POST /dashboards/calculate-diff`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRequest<'a> {
    pub base: &'a VersionRef,
    pub new: &'a VersionRef,
    pub diff_type: DiffType,
}
