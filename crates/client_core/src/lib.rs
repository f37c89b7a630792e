//! Client side of the sentence compression service: settings, the
//! submitter that talks to the service, the view-state value outcomes are
//! folded into, and the projector that derives both display panels.

pub mod config;
pub mod error;
pub mod projector;
pub mod request_url;
pub mod service;
pub mod submitter;
pub mod view_state;

pub use config::{
    load_settings, ClientSettings, FailureDisplay, PathEncoding, ResponseOrdering,
    DEFAULT_BASE_ENDPOINT,
};
pub use error::CompressionError;
pub use projector::{project, AnnotatedUnit, CompressionView, WordStyle};
pub use service::{CompressionService, HttpCompressionService, MissingCompressionService};
pub use submitter::{ClientEvent, PendingSubmission, Submitter};
pub use view_state::{Applied, ResolutionPolicy, SubmissionOutcome, ViewState};
