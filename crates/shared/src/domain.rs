use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(RequestId);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// One token of the submitted sentence and whether the compression model kept it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnnotation {
    pub word: String,
    pub keep: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep: Option<String>,
}

impl WordAnnotation {
    pub fn new(word: impl Into<String>, keep: bool) -> Self {
        Self {
            word: word.into(),
            keep,
            pos: None,
            dep: None,
        }
    }

    pub fn kept(word: impl Into<String>) -> Self {
        Self::new(word, true)
    }

    pub fn removed(word: impl Into<String>) -> Self {
        Self::new(word, false)
    }
}

/// Annotations in sentence order. Replaced wholesale per response, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSequence(Vec<WordAnnotation>);

impl AnnotationSequence {
    pub fn new(annotations: Vec<WordAnnotation>) -> Self {
        Self(annotations)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordAnnotation> {
        self.0.iter()
    }

    pub fn kept_count(&self) -> usize {
        self.0.iter().filter(|annotation| annotation.keep).count()
    }

    pub fn as_slice(&self) -> &[WordAnnotation] {
        &self.0
    }
}

impl From<Vec<WordAnnotation>> for AnnotationSequence {
    fn from(value: Vec<WordAnnotation>) -> Self {
        Self(value)
    }
}

impl FromIterator<WordAnnotation> for AnnotationSequence {
    fn from_iter<T: IntoIterator<Item = WordAnnotation>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AnnotationSequence {
    type Item = &'a WordAnnotation;
    type IntoIter = std::slice::Iter<'a, WordAnnotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
