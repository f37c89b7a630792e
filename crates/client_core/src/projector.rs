//! Turns an annotation sequence into the two display projections.

use shared::domain::{AnnotationSequence, WordAnnotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStyle {
    Kept,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedUnit<'a> {
    pub word: &'a str,
    pub style: WordStyle,
    pub pos: Option<&'a str>,
    pub dep: Option<&'a str>,
}

impl<'a> From<&'a WordAnnotation> for AnnotatedUnit<'a> {
    fn from(annotation: &'a WordAnnotation) -> Self {
        Self {
            word: &annotation.word,
            style: if annotation.keep {
                WordStyle::Kept
            } else {
                WordStyle::Removed
            },
            pos: annotation.pos.as_deref(),
            dep: annotation.dep.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionView<'a> {
    annotated: Vec<AnnotatedUnit<'a>>,
    compressed: Vec<&'a str>,
}

impl<'a> CompressionView<'a> {
    /// Every word in sentence order, styled by its keep flag.
    pub fn annotated(&self) -> &[AnnotatedUnit<'a>] {
        &self.annotated
    }

    /// Kept words only, in sentence order.
    pub fn compressed(&self) -> &[&'a str] {
        &self.compressed
    }

    pub fn compressed_sentence(&self) -> String {
        self.compressed.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.annotated.is_empty()
    }
}

pub fn project(sequence: &AnnotationSequence) -> CompressionView<'_> {
    let annotated: Vec<AnnotatedUnit<'_>> = sequence.iter().map(AnnotatedUnit::from).collect();
    let compressed = sequence
        .iter()
        .filter(|annotation| annotation.keep)
        .map(|annotation| annotation.word.as_str())
        .collect();
    CompressionView {
        annotated,
        compressed,
    }
}
