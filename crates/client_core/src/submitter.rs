use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::domain::RequestId;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::info;

use crate::{error::CompressionError, service::CompressionService, view_state::SubmissionOutcome};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub enum ClientEvent {
    Issued {
        request_id: RequestId,
        sentence: String,
    },
    Resolved(SubmissionOutcome),
}

/// A request that has been issued and may still be in flight.
pub struct PendingSubmission {
    pub request_id: RequestId,
    handle: JoinHandle<SubmissionOutcome>,
}

impl PendingSubmission {
    pub async fn outcome(self) -> SubmissionOutcome {
        let request_id = self.request_id;
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => SubmissionOutcome {
                request_id,
                sentence: String::new(),
                result: Err(CompressionError::Unreachable(format!(
                    "request task ended before resolving: {err}"
                ))),
            },
        }
    }
}

/// Issues one request per submitted sentence.
///
/// Submissions are never debounced or cancelled; overlapping requests
/// resolve in whatever order the service answers them, and each
/// resolution is broadcast as [`ClientEvent::Resolved`].
pub struct Submitter {
    service: Arc<dyn CompressionService>,
    last_issued: AtomicU64,
    events: broadcast::Sender<ClientEvent>,
}

impl Submitter {
    pub fn new(service: Arc<dyn CompressionService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            service,
            last_issued: AtomicU64::new(0),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Must be called from within a tokio runtime.
    pub fn submit(self: &Arc<Self>, sentence: impl Into<String>) -> PendingSubmission {
        let sentence = sentence.into();
        let request_id = RequestId(self.last_issued.fetch_add(1, Ordering::Relaxed)).next();
        info!(
            request_id = request_id.0,
            chars = sentence.chars().count(),
            "submitting sentence for compression"
        );
        let _ = self.events.send(ClientEvent::Issued {
            request_id,
            sentence: sentence.clone(),
        });

        let submitter = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let result = submitter.service.compress(&sentence).await;
            let outcome = SubmissionOutcome {
                request_id,
                sentence,
                result,
            };
            let _ = submitter
                .events
                .send(ClientEvent::Resolved(outcome.clone()));
            outcome
        });

        PendingSubmission { request_id, handle }
    }
}

#[cfg(test)]
#[path = "tests/submitter_tests.rs"]
mod tests;
