use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidEndpoint,
    Unreachable,
    Status,
    MalformedBody,
    UnaddressableSentence,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            FailureKind::InvalidEndpoint => "Invalid endpoint",
            FailureKind::Unreachable => "Service unreachable",
            FailureKind::Status => "Service error",
            FailureKind::MalformedBody => "Malformed response",
            FailureKind::UnaddressableSentence => "Unsendable sentence",
        }
    }
}

/// A failed request as the view layer remembers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureNotice {
    pub request_id: RequestId,
    pub kind: FailureKind,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl FailureNotice {
    pub fn new(request_id: RequestId, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            request_id,
            kind,
            message: message.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn headline(&self) -> &'static str {
        "Compression failed, please retry."
    }
}
