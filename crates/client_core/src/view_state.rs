//! The explicit view-state value the UI folds submission outcomes into.
//!
//! A [`ViewState`] is never mutated in place: every transition returns a
//! new value, and the display projections are always derived from the
//! sequence it currently holds.

use std::sync::Arc;

use shared::{
    domain::{AnnotationSequence, RequestId},
    error::FailureNotice,
};
use tracing::{debug, info, warn};

use crate::{
    config::{FailureDisplay, ResponseOrdering},
    error::CompressionError,
    projector::{project, CompressionView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolutionPolicy {
    pub ordering: ResponseOrdering,
    pub failures: FailureDisplay,
}

/// What a resolved request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub request_id: RequestId,
    pub sentence: String,
    pub result: Result<AnnotationSequence, CompressionError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Committed,
    FailureShown,
    FailureSuppressed,
    /// Older than the last committed resolution; ignored.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    sequence: Arc<AnnotationSequence>,
    source_sentence: Option<Arc<str>>,
    committed: Option<RequestId>,
    in_flight: usize,
    failure: Option<FailureNotice>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(&self) -> &AnnotationSequence {
        &self.sequence
    }

    pub fn view(&self) -> CompressionView<'_> {
        project(&self.sequence)
    }

    pub fn source_sentence(&self) -> Option<&str> {
        self.source_sentence.as_deref()
    }

    pub fn committed(&self) -> Option<RequestId> {
        self.committed
    }

    pub fn failure(&self) -> Option<&FailureNotice> {
        self.failure.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    pub fn with_issued(&self, request_id: RequestId) -> Self {
        debug!(request_id = request_id.0, in_flight = self.in_flight + 1, "tracking issued request");
        Self {
            in_flight: self.in_flight + 1,
            ..self.clone()
        }
    }

    pub fn without_failure(&self) -> Self {
        Self {
            failure: None,
            ..self.clone()
        }
    }

    /// Folds one resolution into a new state.
    ///
    /// Under [`ResponseOrdering::LastIssuedWins`] the committed request id
    /// only moves forward, so a response that resolves after a newer one
    /// has already been applied is dropped. A failure of the newest request
    /// also advances the guard, even when it is not displayed.
    pub fn apply(&self, outcome: SubmissionOutcome, policy: ResolutionPolicy) -> (Self, Applied) {
        let mut next = Self {
            in_flight: self.in_flight.saturating_sub(1),
            ..self.clone()
        };

        let is_newer = self
            .committed
            .map_or(true, |committed| outcome.request_id > committed);
        if policy.ordering == ResponseOrdering::LastIssuedWins && !is_newer {
            warn!(
                request_id = outcome.request_id.0,
                committed = ?self.committed.map(|id| id.0),
                "dropping stale compression response"
            );
            return (next, Applied::Stale);
        }

        next.committed = Some(outcome.request_id);
        let applied = match outcome.result {
            Ok(sequence) => {
                info!(
                    request_id = outcome.request_id.0,
                    words = sequence.len(),
                    kept = sequence.kept_count(),
                    "committing compression response"
                );
                next.sequence = Arc::new(sequence);
                next.source_sentence = Some(Arc::from(outcome.sentence));
                next.failure = None;
                Applied::Committed
            }
            Err(err) => {
                warn!(request_id = outcome.request_id.0, error = %err, "compression request failed");
                match policy.failures {
                    FailureDisplay::Surface => {
                        next.failure = Some(err.to_notice(outcome.request_id));
                        Applied::FailureShown
                    }
                    FailureDisplay::Silent => Applied::FailureSuppressed,
                }
            }
        };
        (next, applied)
    }
}

#[cfg(test)]
mod tests {
    use shared::{domain::WordAnnotation, error::FailureKind};

    use super::*;

    const GUARDED: ResolutionPolicy = ResolutionPolicy {
        ordering: ResponseOrdering::LastIssuedWins,
        failures: FailureDisplay::Surface,
    };

    const LEGACY: ResolutionPolicy = ResolutionPolicy {
        ordering: ResponseOrdering::LastResolvedWins,
        failures: FailureDisplay::Silent,
    };

    fn success(id: u64, sentence: &str) -> SubmissionOutcome {
        SubmissionOutcome {
            request_id: RequestId(id),
            sentence: sentence.to_string(),
            result: Ok(sentence.split(' ').map(WordAnnotation::kept).collect()),
        }
    }

    fn failure(id: u64) -> SubmissionOutcome {
        SubmissionOutcome {
            request_id: RequestId(id),
            sentence: "anything".to_string(),
            result: Err(CompressionError::Status { status: 502 }),
        }
    }

    #[test]
    fn starts_empty() {
        let state = ViewState::new();
        assert!(state.sequence().is_empty());
        assert!(state.view().is_empty());
        assert!(!state.is_pending());
        assert_eq!(state.committed(), None);
    }

    #[test]
    fn success_replaces_the_sequence_wholesale() {
        let (state, _) = ViewState::new().apply(success(1, "one two three"), GUARDED);
        let (state, applied) = state.apply(success(2, "four"), GUARDED);

        assert_eq!(applied, Applied::Committed);
        assert_eq!(state.view().compressed(), ["four"]);
        assert_eq!(state.source_sentence(), Some("four"));
    }

    #[test]
    fn guarded_ordering_drops_a_response_older_than_the_committed_one() {
        let state = ViewState::new()
            .with_issued(RequestId(1))
            .with_issued(RequestId(2));
        assert!(state.is_pending());

        let (state, applied) = state.apply(success(2, "second"), GUARDED);
        assert_eq!(applied, Applied::Committed);
        let (state, applied) = state.apply(success(1, "first"), GUARDED);
        assert_eq!(applied, Applied::Stale);

        assert_eq!(state.view().compressed(), ["second"]);
        assert_eq!(state.committed(), Some(RequestId(2)));
        assert!(!state.is_pending());
    }

    // Unguarded mode: whichever response arrives last is shown.
    #[test]
    fn legacy_ordering_lets_the_last_resolved_response_win() {
        let (state, _) = ViewState::new().apply(success(2, "second"), LEGACY);
        let (state, applied) = state.apply(success(1, "first"), LEGACY);

        assert_eq!(applied, Applied::Committed);
        assert_eq!(state.view().compressed(), ["first"]);
    }

    #[test]
    fn surfaced_failure_keeps_the_previous_sequence_visible() {
        let (state, _) = ViewState::new().apply(success(1, "kept words"), GUARDED);
        let (state, applied) = state.apply(failure(2), GUARDED);

        assert_eq!(applied, Applied::FailureShown);
        assert_eq!(state.view().compressed(), ["kept", "words"]);
        let notice = state.failure().expect("failure notice");
        assert_eq!(notice.kind, FailureKind::Status);
        assert_eq!(notice.request_id, RequestId(2));
        assert!(notice.message.contains("502"));
    }

    #[test]
    fn silent_failure_changes_nothing_visible() {
        let policy = ResolutionPolicy {
            ordering: ResponseOrdering::LastIssuedWins,
            failures: FailureDisplay::Silent,
        };
        let (before, _) = ViewState::new().apply(success(1, "stay"), policy);
        let (after, applied) = before.apply(failure(2), policy);

        assert_eq!(applied, Applied::FailureSuppressed);
        assert!(after.failure().is_none());
        assert_eq!(after.sequence(), before.sequence());
    }

    #[test]
    fn failure_of_newest_request_makes_older_success_stale() {
        let (state, _) = ViewState::new().apply(failure(2), GUARDED);
        let (state, applied) = state.apply(success(1, "late"), GUARDED);

        assert_eq!(applied, Applied::Stale);
        assert!(state.sequence().is_empty());
        assert!(state.failure().is_some());
    }

    #[test]
    fn later_success_clears_a_surfaced_failure() {
        let (state, _) = ViewState::new().apply(failure(1), GUARDED);
        let (state, _) = state.apply(success(2, "fine"), GUARDED);
        assert!(state.failure().is_none());
    }

    #[test]
    fn transitions_leave_the_original_value_untouched() {
        let original = ViewState::new();
        let (next, _) = original.apply(success(1, "new"), GUARDED);
        assert!(original.sequence().is_empty());
        assert_eq!(next.sequence().len(), 1);
        assert!(next.without_failure().failure().is_none());
    }
}
