//! Success predicates for API responses.

use serde_json::Value;

/// Description of what a successful response looks like for one operation.
///
/// Field checks treat a JSON `null` the same as a missing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expect {
    /// Transport status equals the code. The body is not inspected.
    Status(u16),
    /// Body is a JSON array, possibly empty.
    IsArray,
    FieldPresent(&'static str),
    FieldAbsent(&'static str),
    FieldEquals(&'static str, String),
    FieldStartsWith(&'static str, String),
    /// Body is a non-empty array whose first element carries the field.
    FirstElementHas(&'static str),
    All(Vec<Self>),
    Any(Vec<Self>),
}

impl Expect {
    #[must_use]
    pub fn field_equals(field: &'static str, value: impl Into<String>) -> Self {
        Self::FieldEquals(field, value.into())
    }

    #[must_use]
    pub fn field_starts_with(field: &'static str, prefix: impl Into<String>) -> Self {
        Self::FieldStartsWith(field, prefix.into())
    }

    /// Whether the operation needs the body decoded at all.
    #[must_use]
    pub fn inspects_body(&self) -> bool {
        match self {
            Self::Status(_) => false,
            Self::All(all) | Self::Any(all) => all.iter().any(Self::inspects_body),
            Self::IsArray
            | Self::FieldPresent(_)
            | Self::FieldAbsent(_)
            | Self::FieldEquals(..)
            | Self::FieldStartsWith(..)
            | Self::FirstElementHas(_) => true,
        }
    }

    #[must_use]
    pub fn matches(&self, status: u16, body: Option<&Value>) -> bool {
        match self {
            Self::Status(code) => status == *code,
            Self::IsArray => body.is_some_and(Value::is_array),
            Self::FieldPresent(field) => field_of(body, field).is_some(),
            Self::FieldAbsent(field) => {
                body.is_some_and(Value::is_object) && field_of(body, field).is_none()
            }
            Self::FieldEquals(field, expected) => {
                field_of(body, field).and_then(Value::as_str) == Some(expected.as_str())
            }
            Self::FieldStartsWith(field, prefix) => field_of(body, field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.starts_with(prefix.as_str())),
            Self::FirstElementHas(field) => body
                .and_then(Value::as_array)
                .and_then(|items| items.first())
                .and_then(|first| first.get(*field))
                .is_some_and(|v| !v.is_null()),
            Self::All(all) => all.iter().all(|e| e.matches(status, body)),
            Self::Any(any) => any.iter().any(|e| e.matches(status, body)),
        }
    }
}

fn field_of<'a>(body: Option<&'a Value>, field: &str) -> Option<&'a Value> {
    body.and_then(Value::as_object)
        .and_then(|object| object.get(field))
        .filter(|v| !v.is_null())
}
