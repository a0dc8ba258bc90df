//! Context extraction around a target token.
//!
//! Two views over the same document sequence serve two purposes: a flat
//! window of nearby tokens for on-screen orientation, and the full
//! enclosing sentence for study export. The sentence view uses a
//! deliberately simplified punctuation-attachment heuristic (every
//! punctuation mark attaches left, with no opener or quote distinction);
//! it is not the render-time resolver in `layout` and is not meant to be.

use crate::token::Token;

/// Default token radius of the display context window.
pub const DEFAULT_CONTEXT_RADIUS: usize = 10;

/// The sentence enclosing a target token, as reconstructed text plus the
/// token span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceContext {
    /// Index of the first token of the sentence.
    pub start: usize,

    /// Index of the last token of the sentence (terminator included).
    pub end: usize,

    /// Reconstructed sentence with the target wrapped in `<b>` emphasis.
    pub text: String,
}

/// Flat window of surrounding tokens for quick orientation.
///
/// Covers `max(0, index - radius)` through `min(len - 1, index + radius)`
/// inclusive. Line-break tokens become a single space and whitespace runs
/// collapse, so the result is always a single line.
pub fn window_context(tokens: &[Token], index: usize, radius: usize) -> String {
    if tokens.is_empty() || index >= tokens.len() {
        return String::new();
    }

    let start = index.saturating_sub(radius);
    let end = (index + radius).min(tokens.len() - 1);

    let joined = tokens[start..=end]
        .iter()
        .map(|token| {
            if token.is_line_break() {
                " "
            } else {
                token.original.as_str()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The full sentence enclosing the token at `index`.
///
/// Scans backward until a sentence-terminator token (`.`, `?`, `!`) or
/// the document start — the terminator itself is excluded, the sentence
/// starts just after it — then forward until a terminator (included) or
/// the document end.
pub fn sentence_context(tokens: &[Token], index: usize) -> SentenceContext {
    if tokens.is_empty() || index >= tokens.len() {
        return SentenceContext {
            start: 0,
            end: 0,
            text: String::new(),
        };
    }

    let mut start = index;
    while start > 0 && !tokens[start - 1].is_sentence_terminator() {
        start -= 1;
    }

    let mut end = index;
    while end < tokens.len() - 1 && !tokens[end].is_sentence_terminator() {
        end += 1;
    }

    let mut parts: Vec<String> = Vec::new();
    for (offset, token) in tokens[start..=end].iter().enumerate() {
        let mut text = token.original.clone();
        if start + offset == index {
            text = format!("<b>{text}</b>");
        }

        if token.is_punctuation {
            // Attach punctuation to the previously emitted text.
            match parts.last_mut() {
                Some(last) => {
                    let trimmed = last.trim_end().to_string();
                    *last = format!("{trimmed}{text} ");
                }
                None => parts.push(format!("{text} ")),
            }
        } else {
            parts.push(format!("{text} "));
        }
    }

    SentenceContext {
        start,
        end,
        text: parts.concat().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn word(original: &str) -> Token {
        Token::word(original, "gloss", original, "Noun", "N/A")
    }

    fn punct(original: &str) -> Token {
        Token::punctuation(original)
    }

    fn two_sentences() -> Vec<Token> {
        vec![
            word("Hē"),
            word("cwæð"),
            punct("."),
            word("Þā"),
            word("ēode"),
            punct("."),
        ]
    }

    #[test]
    fn window_is_bounded_by_the_document_edges() {
        let tokens = two_sentences();
        assert_eq!(window_context(&tokens, 0, 2), "Hē cwæð .");
        assert_eq!(window_context(&tokens, 5, 2), "Þā ēode .");
        assert_eq!(window_context(&tokens, 2, 10), "Hē cwæð . Þā ēode .");
    }

    #[test]
    fn window_collapses_line_breaks_to_single_spaces() {
        let tokens = vec![
            word("gefrūnon"),
            Token::line_break(),
            Token::line_break(),
            word("Þā"),
        ];
        assert_eq!(window_context(&tokens, 0, 10), "gefrūnon Þā");
    }

    #[test]
    fn window_of_an_out_of_range_index_is_empty() {
        assert_eq!(window_context(&two_sentences(), 17, 10), "");
        assert_eq!(window_context(&[], 0, 10), "");
    }

    #[test]
    fn sentence_starts_after_the_previous_terminator() {
        let tokens = two_sentences();
        let context = sentence_context(&tokens, 3);

        assert_eq!(context.start, 3);
        assert_eq!(context.end, 5);
        assert_eq!(context.text, "<b>Þā</b> ēode.");
    }

    #[test]
    fn sentence_spans_the_whole_document_without_terminators() {
        let tokens = vec![word("Hwæt"), word("wē"), word("Gārdena")];
        let context = sentence_context(&tokens, 1);

        assert_eq!(context.start, 0);
        assert_eq!(context.end, 2);
        assert_eq!(context.text, "Hwæt <b>wē</b> Gārdena");
    }

    #[test]
    fn target_terminator_closes_its_own_sentence() {
        let tokens = two_sentences();
        let context = sentence_context(&tokens, 2);

        assert_eq!(context.start, 0);
        assert_eq!(context.end, 2);
        assert_eq!(context.text, "Hē cwæð<b>.</b>");
    }

    #[test]
    fn punctuation_attaches_left_in_the_reconstruction() {
        let tokens = vec![word("Hē"), punct(","), word("cwæð"), punct(".")];
        let context = sentence_context(&tokens, 2);

        assert_eq!(context.text, "Hē, <b>cwæð</b>.");
    }

    #[test]
    fn leading_punctuation_has_nothing_to_attach_to() {
        let tokens = vec![punct("¡"), word("Hwæt"), punct(".")];
        let context = sentence_context(&tokens, 1);

        assert_eq!(context.text, "¡ <b>Hwæt</b>.");
    }
}
