//! Document import/export: JSON session files and CSV study cards.

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use serde_json::Value;
use tracing::debug;

use crate::context::sentence_context;
use crate::error::{GlossError, Result};
use crate::token::Token;

/// Fixed study-card CSV header. Flash-card importers do not strictly
/// require one, but it keeps the columns self-describing.
const CSV_HEADERS: [&str; 3] = [
    "Lemma (Root)",
    "Context Sentence (Front)",
    "Definition & Grammar (Back)",
];

/// Fields the first imported element must carry to be accepted.
const IMPORT_MARKER_FIELDS: [&str; 2] = ["original", "lemma"];

/// Serialize the full token sequence as a pretty-printed JSON array.
///
/// An empty document is a silent no-op (`Ok(None)`), not an error.
pub fn export_json(tokens: &[Token]) -> Result<Option<String>> {
    if tokens.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string_pretty(tokens)?))
}

/// Date-stamped filename for a JSON document export.
pub fn export_filename(date: NaiveDate) -> String {
    format!("gloss_analysis_{}.json", date.format("%Y-%m-%d"))
}

/// [`export_filename`] stamped with today's local date.
pub fn export_filename_today() -> String {
    export_filename(chrono::Local::now().date_naive())
}

/// Parse a previously exported document.
///
/// Validation is deliberately minimal: the content must be a JSON array,
/// and its first element must carry `original` and `lemma`. An empty
/// array is accepted trivially. Anything else is rejected whole — there
/// is no partial import.
pub fn import_json(text: &str) -> Result<Vec<Token>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| GlossError::ImportValidation(format!("not valid JSON: {err}")))?;

    let items = value.as_array().ok_or_else(|| {
        GlossError::ImportValidation("expected a JSON array of tokens".to_string())
    })?;

    if items.is_empty() {
        return Ok(Vec::new());
    }

    for field in IMPORT_MARKER_FIELDS {
        if items[0].get(field).is_none() {
            return Err(GlossError::ImportValidation(format!(
                "first token is missing the `{field}` field"
            )));
        }
    }

    serde_json::from_value(value).map_err(|err| {
        GlossError::ImportValidation(format!("token array failed to deserialize: {err}"))
    })
}

/// Render the flagged subset of the document as study-card CSV rows.
///
/// One row per flagged token, ordered by ascending document index (not
/// flagging order). Every cell is wrapped in quotes with embedded quotes
/// doubled. An empty flagged set is a silent no-op (`Ok(None)`).
pub fn export_study_csv(tokens: &[Token]) -> Result<Option<String>> {
    let flagged: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is_flagged)
        .map(|(index, _)| index)
        .collect();

    if flagged.is_empty() {
        return Ok(None);
    }

    debug!("exporting {} study rows", flagged.len());

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for index in flagged {
        let token = &tokens[index];
        let context = sentence_context(tokens, index).text;
        writer.write_record([
            token.lemma.as_str(),
            context.as_str(),
            definition_block(token).as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| GlossError::Csv(err.into_error().into()))?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Back-of-card definition block: translation, morphology, part of
/// speech, and (when present) etymology, flattened to a single line.
fn definition_block(token: &Token) -> String {
    let mut block = format!(
        "<p><b>Meaning:</b> {}</p><p><b>Grammar:</b> {}</p><p><i>{}</i></p>",
        token.modern_translation, token.grammatical_info, token.part_of_speech
    );
    if !token.etymology.is_empty() {
        block.push_str(&format!("<small>{}</small>", token.etymology));
    }
    block.replace('\n', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloss_oracle::SourceRef;
    use pretty_assertions::assert_eq;

    fn word(original: &str) -> Token {
        Token::word(original, "gloss", original, "Noun", "N/A")
    }

    fn punct(original: &str) -> Token {
        Token::punctuation(original)
    }

    #[test]
    fn empty_document_exports_are_no_ops() {
        assert!(export_json(&[]).unwrap().is_none());
        assert!(export_study_csv(&[]).unwrap().is_none());
    }

    #[test]
    fn unflagged_documents_export_no_study_rows() {
        let tokens = vec![word("Hwæt"), punct("!")];
        assert!(export_study_csv(&tokens).unwrap().is_none());
    }

    #[test]
    fn export_filename_is_date_stamped() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(export_filename(date), "gloss_analysis_2026-03-14.json");
    }

    #[test]
    fn json_round_trip_preserves_flags_and_sources() {
        let mut flagged = word("cwæð").with_etymology("From Proto-Germanic *kweþaną.");
        flagged.is_flagged = true;
        flagged.sources = Some(vec![SourceRef::new(
            "Bosworth-Toller",
            "https://bosworthtoller.com/cwedan",
        )]);
        let tokens = vec![word("Hē"), flagged, punct(".")];

        let json = export_json(&tokens).unwrap().unwrap();
        let reimported = import_json(&json).unwrap();

        assert_eq!(reimported, tokens);
    }

    #[test]
    fn import_rejects_non_arrays() {
        let err = import_json(r#"{"original": "Hwæt"}"#).unwrap_err();
        assert!(matches!(err, GlossError::ImportValidation(_)));
        assert!(err.to_string().contains("expected a JSON array"));
    }

    #[test]
    fn import_rejects_a_first_element_without_marker_fields() {
        let err = import_json(r#"[{"original": "Hwæt"}]"#).unwrap_err();
        assert!(err.to_string().contains("`lemma`"));

        let err = import_json(r#"[{"lemma": "hwæt"}]"#).unwrap_err();
        assert!(err.to_string().contains("`original`"));
    }

    #[test]
    fn import_accepts_an_empty_array() {
        assert_eq!(import_json("[]").unwrap(), Vec::<Token>::new());
    }

    #[test]
    fn import_rejects_unparseable_text() {
        let err = import_json("not json").unwrap_err();
        assert!(matches!(err, GlossError::ImportValidation(_)));
    }

    #[test]
    fn study_rows_follow_document_order_not_flagging_order() {
        let mut tokens = vec![word("ān"), word("twēgen"), word("þrīe"), punct(".")];
        tokens[2].is_flagged = true;
        tokens[0].is_flagged = true;

        let csv = export_study_csv(&tokens).unwrap().unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("\"ān\""));
        assert!(rows[2].starts_with("\"þrīe\""));
    }

    #[test]
    fn cells_are_always_quoted_and_embedded_quotes_doubled() {
        let mut token = word("wīg");
        token.modern_translation = "war, \"strife\"".to_string();
        token.is_flagged = true;

        let csv = export_study_csv(&[token]).unwrap().unwrap();
        assert!(csv.contains(r#"war, ""strife"""#));
        // Every cell of the header row is wrapped too.
        assert!(csv.starts_with("\"Lemma (Root)\",\"Context Sentence (Front)\""));
    }

    #[test]
    fn definition_block_is_single_line_and_omits_empty_etymology() {
        let mut token = word("wīg");
        token.modern_translation = "war,\nbattle".to_string();

        let block = definition_block(&token);
        assert!(!block.contains('\n'));
        assert!(!block.contains("<small>"));

        let with_etymology = definition_block(&token.clone().with_etymology("Cf. ON víg."));
        assert!(with_etymology.ends_with("<small>Cf. ON víg.</small>"));
    }

    #[test]
    fn study_context_emphasizes_the_flagged_token() {
        let mut tokens = vec![word("Hē"), word("cwæð"), punct(".")];
        tokens[1].is_flagged = true;

        let csv = export_study_csv(&tokens).unwrap().unwrap();
        assert!(csv.contains("Hē <b>cwæð</b>."));
    }
}
