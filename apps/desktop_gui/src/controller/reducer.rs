//! Folds backend events into the next view state and status line.

use client_core::{Applied, ResolutionPolicy, ViewState};

use crate::controller::events::{UiError, UiEvent};

pub struct Reduction {
    pub state: ViewState,
    pub status: Option<String>,
    pub error: Option<UiError>,
}

impl Reduction {
    fn state_only(state: ViewState) -> Self {
        Self {
            state,
            status: None,
            error: None,
        }
    }
}

fn idle_or_pending(state: &ViewState, idle: String) -> String {
    if state.is_pending() {
        "Compressing...".to_string()
    } else {
        idle
    }
}

pub fn reduce(state: &ViewState, event: UiEvent, policy: ResolutionPolicy) -> Reduction {
    match event {
        UiEvent::Info(message) => Reduction {
            status: Some(message),
            ..Reduction::state_only(state.clone())
        },
        UiEvent::Issued { request_id } => Reduction {
            status: Some("Compressing...".to_string()),
            ..Reduction::state_only(state.with_issued(request_id))
        },
        UiEvent::Resolved(outcome) => {
            let request_id = outcome.request_id;
            let (next, applied) = state.apply(outcome, policy);
            let status = match applied {
                Applied::Committed => {
                    let sequence = next.sequence();
                    format!(
                        "Kept {} of {} words",
                        sequence.kept_count(),
                        sequence.len()
                    )
                }
                Applied::FailureShown => "Compression failed".to_string(),
                Applied::FailureSuppressed => "Ready".to_string(),
                Applied::Stale => format!("Ignored out-of-order response #{}", request_id.0),
            };
            let status = idle_or_pending(&next, status);
            Reduction {
                status: Some(status),
                ..Reduction::state_only(next)
            }
        }
        UiEvent::Error(err) => Reduction {
            status: Some(format!("{}: {}", err.category().label(), err.message())),
            error: Some(err),
            ..Reduction::state_only(state.clone())
        },
    }
}

#[cfg(test)]
mod tests {
    use client_core::{
        CompressionError, FailureDisplay, ResponseOrdering, SubmissionOutcome, WordStyle,
    };
    use shared::domain::{RequestId, WordAnnotation};

    use super::*;
    use crate::controller::events::{UiErrorCategory, UiErrorContext};

    const POLICY: ResolutionPolicy = ResolutionPolicy {
        ordering: ResponseOrdering::LastIssuedWins,
        failures: FailureDisplay::Surface,
    };

    fn resolved(id: u64, words: &[(&str, bool)]) -> UiEvent {
        UiEvent::Resolved(SubmissionOutcome {
            request_id: RequestId(id),
            sentence: words.iter().map(|(w, _)| *w).collect::<Vec<_>>().join(" "),
            result: Ok(words
                .iter()
                .map(|(w, keep)| WordAnnotation::new(*w, *keep))
                .collect()),
        })
    }

    #[test]
    fn issued_then_resolved_updates_panels_and_status() {
        let reduced = reduce(
            &ViewState::new(),
            UiEvent::Issued {
                request_id: RequestId(1),
            },
            POLICY,
        );
        assert!(reduced.state.is_pending());
        assert_eq!(reduced.status.as_deref(), Some("Compressing..."));

        let reduced = reduce(
            &reduced.state,
            resolved(1, &[("The", false), ("cat", true), ("sat", true)]),
            POLICY,
        );
        let view = reduced.state.view();
        assert_eq!(view.annotated()[0].style, WordStyle::Removed);
        assert_eq!(view.compressed(), ["cat", "sat"]);
        assert_eq!(reduced.status.as_deref(), Some("Kept 2 of 3 words"));
    }

    #[test]
    fn status_stays_busy_while_other_requests_are_in_flight() {
        let state = ViewState::new()
            .with_issued(RequestId(1))
            .with_issued(RequestId(2));
        let reduced = reduce(&state, resolved(1, &[("a", true)]), POLICY);
        assert_eq!(reduced.status.as_deref(), Some("Compressing..."));
    }

    #[test]
    fn stale_response_is_reported_and_ignored() {
        let state = ViewState::new()
            .with_issued(RequestId(1))
            .with_issued(RequestId(2));
        let reduced = reduce(&state, resolved(2, &[("new", true)]), POLICY);
        let reduced = reduce(&reduced.state, resolved(1, &[("old", true)]), POLICY);

        assert_eq!(reduced.state.view().compressed(), ["new"]);
        assert_eq!(
            reduced.status.as_deref(),
            Some("Ignored out-of-order response #1")
        );
    }

    #[test]
    fn failure_sets_notice_but_keeps_words() {
        let reduced = reduce(&ViewState::new(), resolved(1, &[("kept", true)]), POLICY);
        let reduced = reduce(
            &reduced.state,
            UiEvent::Resolved(SubmissionOutcome {
                request_id: RequestId(2),
                sentence: "boom".to_string(),
                result: Err(CompressionError::Unreachable("connection refused".to_string())),
            }),
            POLICY,
        );
        assert!(reduced.state.failure().is_some());
        assert_eq!(reduced.state.view().compressed(), ["kept"]);
        assert_eq!(reduced.status.as_deref(), Some("Compression failed"));
    }

    #[test]
    fn backend_errors_are_classified() {
        let reduced = reduce(
            &ViewState::new(),
            UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                "invalid compression endpoint 'nope': relative URL without a base",
            )),
            POLICY,
        );
        let err = reduced.error.expect("error surfaced");
        assert_eq!(err.category(), UiErrorCategory::Configuration);
        assert!(reduced
            .status
            .expect("status")
            .starts_with("Configuration:"));
    }

    #[test]
    fn queue_failures_classify_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::Submit,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }
}
