//! Gateway failures.

use serde::Deserialize;
use serde_json::Value;

/// A failed gateway call.
///
/// Stores never propagate this to consumers; they turn it into the
/// collection's `error` message using [`GatewayError::detail`] when present.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("service responded with status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request rejected: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { detail: Option<String> },
}

impl GatewayError {
    /// A rejection carrying a human-readable detail.
    pub fn rejected(detail: impl Into<String>) -> Self {
        GatewayError::Rejected {
            detail: Some(detail.into()),
        }
    }

    /// A rejection without any detail.
    pub fn transport() -> Self {
        GatewayError::Rejected { detail: None }
    }

    /// Build a status error from a non-success response body.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        GatewayError::Status {
            status,
            detail: decode_detail(body),
        }
    }

    /// Message supplied by the service, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            GatewayError::Status { detail, .. } | GatewayError::Rejected { detail } => {
                detail.as_deref()
            }
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Pull the `detail` message out of an error body.
///
/// A string is used verbatim; a list of validation entries is joined from
/// their `msg` fields. Anything else yields `None`.
pub(crate) fn decode_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

/// Result type for gateway calls.
pub type Result<T> = std::result::Result<T, GatewayError>;
