use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::AnnotationSequence, protocol::decode_annotations};
use tracing::debug;
use url::Url;

use crate::{
    config::{ClientSettings, PathEncoding},
    error::CompressionError,
    request_url::{build_request_url, parse_base_endpoint},
};

#[async_trait]
pub trait CompressionService: Send + Sync {
    async fn compress(&self, sentence: &str) -> Result<AnnotationSequence, CompressionError>;
}

/// Talks to the remote compression endpoint with one GET per sentence.
pub struct HttpCompressionService {
    http: Client,
    base: Url,
    encoding: PathEncoding,
}

impl HttpCompressionService {
    pub fn new(settings: &ClientSettings) -> Result<Self, CompressionError> {
        Ok(Self::with_client(
            Client::new(),
            parse_base_endpoint(&settings.base_endpoint)?,
            settings.path_encoding,
        ))
    }

    pub fn with_client(http: Client, base: Url, encoding: PathEncoding) -> Self {
        Self {
            http,
            base,
            encoding,
        }
    }

    pub fn base_endpoint(&self) -> &Url {
        &self.base
    }

    pub fn request_url(&self, sentence: &str) -> Result<Url, CompressionError> {
        build_request_url(&self.base, sentence, self.encoding)
    }
}

#[async_trait]
impl CompressionService for HttpCompressionService {
    async fn compress(&self, sentence: &str) -> Result<AnnotationSequence, CompressionError> {
        let url = self.request_url(sentence)?;
        debug!(%url, "requesting compression");
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(decode_annotations(&body)?)
    }
}

/// Stands in when the configured endpoint is unusable, so every
/// submission fails visibly instead of the app refusing to start.
pub struct MissingCompressionService {
    reason: String,
}

impl MissingCompressionService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CompressionService for MissingCompressionService {
    async fn compress(&self, _sentence: &str) -> Result<AnnotationSequence, CompressionError> {
        Err(CompressionError::InvalidEndpoint(self.reason.clone()))
    }
}
