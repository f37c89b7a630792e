//! UI/backend events and error modeling for desktop GUI controller.

use client_core::SubmissionOutcome;
use shared::domain::RequestId;

pub enum UiEvent {
    Info(String),
    Issued { request_id: RequestId },
    Resolved(SubmissionOutcome),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Validation,
    Unknown,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorCategory::Configuration => "Configuration",
            UiErrorCategory::Transport => "Transport",
            UiErrorCategory::Validation => "Validation",
            UiErrorCategory::Unknown => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("endpoint")
            || message_lower.contains("startup failure")
            || message_lower.contains("settings")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
