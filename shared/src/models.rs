//! Shared data models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder rendered for any context field the caller left out.
pub const PLACEHOLDER: &str = "N/A";

/// A loosely typed request field: guests may send `3`, `"3"` or `"three"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// Whether the value counts as "provided": non-zero numbers, non-empty text, `true`.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && v.is_finite()),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    /// Interpret the value as a whole count, if it is one.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            FieldValue::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v < u32::MAX as f64)
                    .map(|v| v as u64)
            }),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => write!(f, "{}", i),
                (None, Some(v)) if v.fract() == 0.0 && v.abs() < 1e15 => {
                    write!(f, "{}", v as i64)
                }
                _ => write!(f, "{}", n),
            },
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Render an optional field, substituting the placeholder when absent or falsy.
pub fn or_placeholder(value: Option<&FieldValue>) -> String {
    match value {
        Some(v) if v.is_truthy() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Rewrite request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub draft: Option<String>,
    #[serde(default)]
    pub listing: Option<FieldValue>,
    #[serde(default)]
    pub host: Option<FieldValue>,
    #[serde(default)]
    pub guests: Option<FieldValue>,
    #[serde(default)]
    pub nights: Option<FieldValue>,
    #[serde(default)]
    pub notes: Option<FieldValue>,
    #[serde(default)]
    pub discount: Option<FieldValue>,
    /// Accepted for compatibility; prompts do not use it yet.
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_style() -> String {
    "friendly".to_string()
}

impl RewriteRequest {
    /// The draft text, if it is non-empty.
    pub fn draft_text(&self) -> Option<&str> {
        self.draft.as_deref().filter(|d| !d.is_empty())
    }

    /// Whether the named field holds a truthy value.
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "draft" => self.draft_text().is_some(),
            other => self.field(other).is_some_and(FieldValue::is_truthy),
        }
    }

    /// Look up a context field by name.
    pub fn field(&self, field: &str) -> Option<&FieldValue> {
        match field {
            "listing" => self.listing.as_ref(),
            "host" => self.host.as_ref(),
            "guests" => self.guests.as_ref(),
            "nights" => self.nights.as_ref(),
            "notes" => self.notes.as_ref(),
            "discount" => self.discount.as_ref(),
            _ => None,
        }
    }
}

/// Successful rewrite response body.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Clean request payload.
#[derive(Debug, Deserialize)]
pub struct CleanRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Clean response payload.
#[derive(Debug, Serialize)]
pub struct CleanResponse {
    pub cleaned: String,
}
