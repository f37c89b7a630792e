use shared::{
    domain::RequestId,
    error::{FailureKind, FailureNotice},
};
use thiserror::Error;

/// Failure of one compression request.
///
/// Cloneable so outcomes can travel over the broadcast event channel;
/// transport errors are therefore kept as rendered messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressionError {
    #[error("invalid compression endpoint {0}")]
    InvalidEndpoint(String),
    #[error("compression service unreachable: {0}")]
    Unreachable(String),
    #[error("compression service returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed compression response: {0}")]
    MalformedBody(String),
    #[error("sentence '{0}' cannot be sent as a URL path segment")]
    UnaddressableSentence(String),
}

impl CompressionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CompressionError::InvalidEndpoint(_) => FailureKind::InvalidEndpoint,
            CompressionError::Unreachable(_) => FailureKind::Unreachable,
            CompressionError::Status { .. } => FailureKind::Status,
            CompressionError::MalformedBody(_) => FailureKind::MalformedBody,
            CompressionError::UnaddressableSentence(_) => FailureKind::UnaddressableSentence,
        }
    }

    pub fn to_notice(&self, request_id: RequestId) -> FailureNotice {
        FailureNotice::new(request_id, self.kind(), self.to_string())
    }
}

impl From<reqwest::Error> for CompressionError {
    fn from(value: reqwest::Error) -> Self {
        if let Some(status) = value.status() {
            return CompressionError::Status {
                status: status.as_u16(),
            };
        }
        if value.is_decode() {
            return CompressionError::MalformedBody(value.to_string());
        }
        CompressionError::Unreachable(value.to_string())
    }
}

impl From<shared::protocol::DecodeError> for CompressionError {
    fn from(value: shared::protocol::DecodeError) -> Self {
        CompressionError::MalformedBody(value.0.to_string())
    }
}
