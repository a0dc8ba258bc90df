//! The atomic glossed unit: a word, punctuation mark, or line-break
//! sentinel.

use serde::{Deserialize, Serialize};

use gloss_oracle::{SourceRef, TokenPatch, TokenRecord};

/// Reserved surface text marking an explicit line break.
pub const LINE_BREAK: &str = "\n";

/// Escaped line-break form some oracle responses emit instead.
const LINE_BREAK_ESCAPED: &str = "\\n";

/// One lexical unit, punctuation mark, or line-break marker in the
/// document sequence.
///
/// Serialized field names are camelCase so exported documents round-trip
/// with files produced by earlier versions of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// The exact surface text. [`LINE_BREAK`] is treated specially
    /// throughout: it never receives inter-token spacing and always
    /// forces a block-level break at render time.
    pub original: String,

    /// Modern-language definition of this occurrence.
    pub modern_translation: String,

    /// Dictionary headword the surface form belongs to.
    pub lemma: String,

    /// Part of speech.
    pub part_of_speech: String,

    /// Contextual morphology (case, number, gender, tense, ...).
    pub grammatical_info: String,

    /// Brief etymology notes; may be empty.
    #[serde(default)]
    pub etymology: String,

    /// True for punctuation marks and line-break tokens. Drives both
    /// rendering (non-interactive) and attachment defaults.
    pub is_punctuation: bool,

    /// Session-level study flag. User-controlled; the pipeline never
    /// writes it.
    #[serde(default)]
    pub is_flagged: bool,

    /// Provenance evidence attached only by the deep-analysis path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceRef>>,
}

impl Token {
    /// Create a word token.
    pub fn word(
        original: impl Into<String>,
        modern_translation: impl Into<String>,
        lemma: impl Into<String>,
        part_of_speech: impl Into<String>,
        grammatical_info: impl Into<String>,
    ) -> Self {
        Self {
            original: original.into(),
            modern_translation: modern_translation.into(),
            lemma: lemma.into(),
            part_of_speech: part_of_speech.into(),
            grammatical_info: grammatical_info.into(),
            etymology: String::new(),
            is_punctuation: false,
            is_flagged: false,
            sources: None,
        }
    }

    /// Create a punctuation token.
    pub fn punctuation(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            modern_translation: String::new(),
            lemma: String::new(),
            part_of_speech: "Punctuation".to_string(),
            grammatical_info: String::new(),
            etymology: String::new(),
            is_punctuation: true,
            is_flagged: false,
            sources: None,
        }
    }

    /// Create a line-break token carrying the fixed sentinel values.
    pub fn line_break() -> Self {
        Self {
            original: LINE_BREAK.to_string(),
            modern_translation: "Line Break".to_string(),
            lemma: "N/A".to_string(),
            part_of_speech: "Formatting".to_string(),
            grammatical_info: "N/A".to_string(),
            etymology: "N/A".to_string(),
            is_punctuation: true,
            is_flagged: false,
            sources: None,
        }
    }

    /// Set the etymology notes.
    pub fn with_etymology(mut self, etymology: impl Into<String>) -> Self {
        self.etymology = etymology.into();
        self
    }

    /// Whether this token is an explicit line break.
    pub fn is_line_break(&self) -> bool {
        self.original == LINE_BREAK || self.original == LINE_BREAK_ESCAPED
    }

    /// Whether this token ends a sentence (`.`, `?` or `!`).
    pub fn is_sentence_terminator(&self) -> bool {
        self.is_punctuation && self.original.contains(['.', '?', '!'])
    }

    /// Overwrite the descriptive fields present in `patch`, leaving
    /// everything else (including the study flag) untouched.
    pub fn apply_patch(&mut self, patch: &TokenPatch) {
        if let Some(modern_translation) = &patch.modern_translation {
            self.modern_translation = modern_translation.clone();
        }
        if let Some(lemma) = &patch.lemma {
            self.lemma = lemma.clone();
        }
        if let Some(part_of_speech) = &patch.part_of_speech {
            self.part_of_speech = part_of_speech.clone();
        }
        if let Some(grammatical_info) = &patch.grammatical_info {
            self.grammatical_info = grammatical_info.clone();
        }
        if let Some(etymology) = &patch.etymology {
            self.etymology = etymology.clone();
        }
    }
}

impl From<TokenRecord> for Token {
    fn from(record: TokenRecord) -> Self {
        Self {
            original: record.original,
            modern_translation: record.modern_translation,
            lemma: record.lemma,
            part_of_speech: record.part_of_speech,
            grammatical_info: record.grammatical_info,
            etymology: record.etymology,
            is_punctuation: record.is_punctuation,
            is_flagged: false,
            sources: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_break_carries_the_fixed_sentinels() {
        let token = Token::line_break();
        assert!(token.is_line_break());
        assert!(token.is_punctuation);
        assert_eq!(token.modern_translation, "Line Break");
        assert_eq!(token.lemma, "N/A");
        assert_eq!(token.part_of_speech, "Formatting");
    }

    #[test]
    fn escaped_newline_is_also_a_line_break() {
        let mut token = Token::line_break();
        token.original = "\\n".to_string();
        assert!(token.is_line_break());
    }

    #[test]
    fn sentence_terminators_require_punctuation() {
        assert!(Token::punctuation(".").is_sentence_terminator());
        assert!(Token::punctuation("?").is_sentence_terminator());
        assert!(!Token::punctuation(",").is_sentence_terminator());
        // A word containing a dot is not a terminator.
        assert!(!Token::word("etc.", "etc", "etc", "Abbrev", "N/A").is_sentence_terminator());
    }

    #[test]
    fn apply_patch_overwrites_only_present_fields() {
        let mut token = Token::word("cwæð", "spoke", "cweðan", "Verb", "3rd Sg. Past");
        token.is_flagged = true;

        token.apply_patch(&gloss_oracle::TokenPatch {
            lemma: Some("cweþan".to_string()),
            etymology: Some("From Proto-Germanic *kweþaną.".to_string()),
            ..Default::default()
        });

        assert_eq!(token.lemma, "cweþan");
        assert_eq!(token.etymology, "From Proto-Germanic *kweþaną.");
        assert_eq!(token.modern_translation, "spoke");
        assert!(token.is_flagged);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let token = Token::word("Hwæt", "Lo!", "hwæt", "Interjection", "N/A");
        let json = serde_json::to_value(&token).unwrap();

        assert_eq!(json["original"], "Hwæt");
        assert_eq!(json["modernTranslation"], "Lo!");
        assert_eq!(json["partOfSpeech"], "Interjection");
        assert_eq!(json["isPunctuation"], false);
        assert_eq!(json["isFlagged"], false);
        assert!(json.get("sources").is_none());
    }
}
