use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{AnnotationSequence, WordAnnotation};

/// Response body of the compression service.
///
/// The service has shipped two shapes over time: a plain array in token
/// order, and an object keyed by token index (`{"1": {...}, "2": {...}}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CompressionResponse {
    Ordered(Vec<WordAnnotation>),
    Indexed(BTreeMap<String, WordAnnotation>),
}

#[derive(Debug, Error)]
#[error("malformed compression response: {0}")]
pub struct DecodeError(#[from] pub serde_json::Error);

impl CompressionResponse {
    /// Numeric keys come first in ascending order; any other keys follow
    /// lexicographically.
    pub fn into_sequence(self) -> AnnotationSequence {
        match self {
            Self::Ordered(annotations) => AnnotationSequence::new(annotations),
            Self::Indexed(by_key) => {
                let mut numbered = Vec::new();
                let mut named = Vec::new();
                for (key, annotation) in by_key {
                    match key.trim().parse::<u64>() {
                        Ok(index) => numbered.push((index, annotation)),
                        Err(_) => named.push(annotation),
                    }
                }
                numbered.sort_by_key(|(index, _)| *index);
                numbered
                    .into_iter()
                    .map(|(_, annotation)| annotation)
                    .chain(named)
                    .collect()
            }
        }
    }
}

pub fn decode_annotations(body: &[u8]) -> Result<AnnotationSequence, DecodeError> {
    let response: CompressionResponse = serde_json::from_slice(body)?;
    Ok(response.into_sequence())
}
