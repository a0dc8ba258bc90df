//! Request and response types exchanged with the annotation oracle.

use serde::{Deserialize, Serialize};

/// One annotated token as emitted by the oracle.
///
/// This is the wire shape only. The document layer wraps it with session
/// state (study flag, provenance sources) that the oracle never sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    /// The word, punctuation mark, or the reserved line-break text.
    pub original: String,

    /// Modern-language definition of this occurrence.
    pub modern_translation: String,

    /// Dictionary headword the surface form belongs to.
    pub lemma: String,

    /// Part of speech.
    pub part_of_speech: String,

    /// Contextual morphology (case, number, gender, tense, ...).
    pub grammatical_info: String,

    /// Brief etymology notes. Optional in the declared schema.
    #[serde(default)]
    pub etymology: String,

    /// True for punctuation marks and line-break tokens.
    pub is_punctuation: bool,
}

/// A request to annotate one segment of the input text.
#[derive(Debug, Clone)]
pub struct SegmentRequest {
    /// Raw segment text, intra-segment line breaks preserved verbatim.
    pub text: String,

    /// 1-based position of this segment in the document.
    pub index: usize,

    /// Total number of segments in the document.
    pub total: usize,
}

impl SegmentRequest {
    /// Create a request for segment `index` of `total`.
    pub fn new(text: impl Into<String>, index: usize, total: usize) -> Self {
        Self {
            text: text.into(),
            index,
            total,
        }
    }
}

/// A request to re-analyze a single existing token in context.
#[derive(Debug, Clone)]
pub struct DeepAnalysisRequest {
    /// The token's surface form.
    pub original: String,

    /// The token's current lemma, given to the oracle as a starting point.
    pub lemma: String,

    /// Bounded textual window around the token.
    pub context: String,
}

impl DeepAnalysisRequest {
    /// Create a deep-analysis request for one token.
    pub fn new(
        original: impl Into<String>,
        lemma: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            original: original.into(),
            lemma: lemma.into(),
            context: context.into(),
        }
    }
}

/// Partial overwrite of a token's descriptive fields.
///
/// Only fields present in the oracle's response are set; `original` and
/// `isPunctuation` are deliberately absent so a re-analysis can never
/// change what a token *is*, only how it is glossed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPatch {
    /// Revised modern-language definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modern_translation: Option<String>,

    /// Revised lemma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,

    /// Revised part of speech.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,

    /// Revised morphology.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammatical_info: Option<String>,

    /// Revised etymology notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
}

impl TokenPatch {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.modern_translation.is_none()
            && self.lemma.is_none()
            && self.part_of_speech.is_none()
            && self.grammatical_info.is_none()
            && self.etymology.is_none()
    }
}

/// A grounding citation reported by the oracle alongside a deep analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Human-readable source title.
    pub title: String,

    /// Source URI.
    pub uri: String,
}

impl SourceRef {
    /// Create a new source reference.
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// Result of a single-token deep analysis.
#[derive(Debug, Clone, Default)]
pub struct DeepAnalysis {
    /// Field revisions to apply to the token.
    pub updates: TokenPatch,

    /// Grounding citations, in the order the oracle reported them.
    pub sources: Vec<SourceRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn token_record_uses_camel_case_fields() {
        let json = r#"{
            "original": "Hwæt",
            "modernTranslation": "Lo!",
            "lemma": "hwæt",
            "partOfSpeech": "Interjection",
            "grammaticalInfo": "N/A",
            "isPunctuation": false
        }"#;

        let record: TokenRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.original, "Hwæt");
        assert_eq!(record.etymology, "");
        assert!(!record.is_punctuation);
    }

    #[test]
    fn token_patch_parses_partial_objects() {
        let patch: TokenPatch = serde_json::from_str(r#"{"lemma": "gān"}"#).unwrap();
        assert_eq!(patch.lemma.as_deref(), Some("gān"));
        assert!(patch.modern_translation.is_none());
        assert!(!patch.is_empty());

        let empty: TokenPatch = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
