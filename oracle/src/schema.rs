//! Response-schema declarations and defensive validation.
//!
//! The oracle is asked to emit output conforming to these schemas, but its
//! output is still checked field-by-field on the way in: a malformed
//! response must become a typed failure, never a silently incomplete token.

use serde_json::Value;

use crate::error::{OracleError, Result};
use crate::types::TokenRecord;

/// Fields every token object in a segment response must carry.
///
/// `etymology` is intentionally absent: it is declared in the schema but
/// not required, and an omitted value deserializes to an empty string.
pub const REQUIRED_TOKEN_FIELDS: [&str; 6] = [
    "original",
    "modernTranslation",
    "lemma",
    "partOfSpeech",
    "grammaticalInfo",
    "isPunctuation",
];

/// JSON schema for a segment annotation response: an array of token objects.
pub fn token_array_schema() -> Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "original": {
                    "type": "STRING",
                    "description": "The word, punctuation, or '\\n' for a newline."
                },
                "modernTranslation": {
                    "type": "STRING",
                    "description": "Modern English definition. For '\\n', return 'Line Break'."
                },
                "lemma": {
                    "type": "STRING",
                    "description": "Standard dictionary headword. For '\\n', return 'N/A'."
                },
                "partOfSpeech": {
                    "type": "STRING",
                    "description": "Part of speech. For '\\n', return 'Formatting'."
                },
                "grammaticalInfo": {
                    "type": "STRING",
                    "description": "Contextual morphology (case, number, gender, etc.). For '\\n', return 'N/A'."
                },
                "etymology": {
                    "type": "STRING",
                    "description": "Brief etymology notes. For '\\n', return 'N/A'."
                },
                "isPunctuation": {
                    "type": "BOOLEAN",
                    "description": "True if punctuation or newline ('\\n')."
                }
            },
            "required": REQUIRED_TOKEN_FIELDS
        }
    })
}

/// JSON schema for a deep-analysis response: a single revision object.
///
/// `original` and `isPunctuation` are deliberately not part of this shape.
pub fn deep_analysis_schema() -> Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "modernTranslation": {
                "type": "STRING",
                "description": "Verified modern English definition for this occurrence."
            },
            "lemma": {
                "type": "STRING",
                "description": "Verified dictionary headword."
            },
            "partOfSpeech": {
                "type": "STRING",
                "description": "Verified part of speech."
            },
            "grammaticalInfo": {
                "type": "STRING",
                "description": "Verified contextual morphology."
            },
            "etymology": {
                "type": "STRING",
                "description": "Verified etymology notes."
            }
        },
        "required": [
            "modernTranslation",
            "lemma",
            "partOfSpeech",
            "grammaticalInfo",
            "etymology"
        ]
    })
}

/// Validate a parsed segment response against the token array schema.
///
/// Rejects non-arrays, empty arrays, and elements missing any required
/// field, reporting the first offending element and field by name.
pub fn validate_token_records(value: Value) -> Result<Vec<TokenRecord>> {
    let items = match &value {
        Value::Array(items) => items,
        other => {
            return Err(OracleError::MalformedResponse(format!(
                "expected a token array, got {}",
                json_type_name(other)
            )));
        }
    };

    if items.is_empty() {
        return Err(OracleError::EmptyAnnotation);
    }

    for (index, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or_else(|| {
            OracleError::MalformedResponse(format!(
                "token {index} is not an object, got {}",
                json_type_name(item)
            ))
        })?;
        for field in REQUIRED_TOKEN_FIELDS {
            if !object.contains_key(field) {
                return Err(OracleError::SchemaViolation { index, field });
            }
        }
    }

    serde_json::from_value(value)
        .map_err(|err| OracleError::MalformedResponse(err.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token_json(original: &str) -> Value {
        serde_json::json!({
            "original": original,
            "modernTranslation": "what",
            "lemma": original.to_lowercase(),
            "partOfSpeech": "Pronoun",
            "grammaticalInfo": "Nom. Sg.",
            "etymology": "From Proto-Germanic *hwat.",
            "isPunctuation": false
        })
    }

    #[test]
    fn validates_a_conforming_array() {
        let records =
            validate_token_records(Value::Array(vec![token_json("Hwæt"), token_json("wē")]))
                .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].original, "Hwæt");
        assert_eq!(records[0].part_of_speech, "Pronoun");
    }

    #[test]
    fn rejects_non_arrays() {
        let err = validate_token_records(serde_json::json!({"original": "Hwæt"})).unwrap_err();
        assert!(matches!(err, OracleError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_empty_arrays() {
        let err = validate_token_records(Value::Array(Vec::new())).unwrap_err();
        assert!(matches!(err, OracleError::EmptyAnnotation));
    }

    #[test]
    fn reports_the_missing_field_by_name() {
        let mut token = token_json("Hwæt");
        token.as_object_mut().unwrap().remove("lemma");

        let err = validate_token_records(Value::Array(vec![token_json("wē"), token])).unwrap_err();
        match err {
            OracleError::SchemaViolation { index, field } => {
                assert_eq!(index, 1);
                assert_eq!(field, "lemma");
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn etymology_is_optional() {
        let mut token = token_json("Hwæt");
        token.as_object_mut().unwrap().remove("etymology");

        let records = validate_token_records(Value::Array(vec![token])).unwrap();
        assert_eq!(records[0].etymology, "");
    }

    #[test]
    fn schemas_declare_the_required_sets() {
        let array = token_array_schema();
        assert_eq!(array["items"]["required"].as_array().unwrap().len(), 6);

        let deep = deep_analysis_schema();
        assert_eq!(deep["required"].as_array().unwrap().len(), 5);
        assert!(deep["properties"].get("original").is_none());
        assert!(deep["properties"].get("isPunctuation").is_none());
    }
}
