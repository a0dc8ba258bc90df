//! Render-time spacing and attachment decisions for the token stream.
//!
//! Words render with horizontal padding (click-target size and visual
//! separation); punctuation does not. Placing a default gap or a zero
//! gap between mismatched elements produces visibly wrong typography, so
//! every adjacent pair gets one of five explicit spacing decisions, and
//! the padding correction is asymmetric when only one side is a word.

use crate::token::Token;

/// Punctuation that attaches to what follows rather than what precedes.
const OPENERS: [&str; 10] = ["(", "[", "{", "\u{201c}", "\u{2018}", "#", "$", "¿", "¡", "<"];

/// Dash variants keep space on both sides.
const DASHES: [&str; 3] = ["-", "\u{2013}", "\u{2014}"];

/// The neutral double quote, ambiguous without sequence context.
const NEUTRAL_QUOTE: &str = "\"";

/// Whether a neutral double quote opens or closes at its position.
///
/// The glyph alone cannot tell; the role is a property of sequence
/// position, alternating strictly pairwise across the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteRole {
    /// First quote of a pair; attaches to what follows.
    Open,
    /// Second quote of a pair; attaches to what precedes.
    Close,
}

/// Spacing decision for one adjacent token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Default inter-token gap.
    Gap,
    /// Attached; both sides are padded words, cancel both paddings.
    OverlapBoth,
    /// Attached; exactly one side is a padded word, cancel that side only.
    OverlapOne,
    /// Attached; punctuation abutting punctuation, remove the gap only.
    Flush,
    /// A line-break token borders the pair: full-width block break, no
    /// margin computation runs across it.
    Break,
}

/// Classify every neutral double quote in one left-to-right pass.
///
/// Produced once per document and consumed read-only by the attachment
/// tests, rather than re-running the state machine inside the render
/// pass.
pub fn quote_roles(tokens: &[Token]) -> Vec<Option<QuoteRole>> {
    let mut roles = vec![None; tokens.len()];
    let mut open = false;

    for (index, token) in tokens.iter().enumerate() {
        if token.original.trim() == NEUTRAL_QUOTE {
            roles[index] = Some(if open { QuoteRole::Close } else { QuoteRole::Open });
            open = !open;
        }
    }

    roles
}

/// Whether `token` attaches to its left neighbor (no space before it).
pub fn left_attaching(token: &Token, role: Option<QuoteRole>) -> bool {
    if token.is_line_break() {
        return false;
    }
    let text = token.original.trim();
    if text.is_empty() {
        return false;
    }
    if text == NEUTRAL_QUOTE {
        return role == Some(QuoteRole::Close);
    }
    if token.is_punctuation {
        if DASHES.contains(&text) || text == "&" {
            return false;
        }
        // Openers attach to what follows instead.
        if OPENERS.contains(&text) {
            return false;
        }
        return true;
    }
    false
}

/// Whether `token` attaches to its right neighbor (no space after it).
pub fn right_attaching(token: &Token, role: Option<QuoteRole>) -> bool {
    if token.is_line_break() {
        return false;
    }
    let text = token.original.trim();
    if text == NEUTRAL_QUOTE {
        return role == Some(QuoteRole::Open);
    }
    OPENERS.contains(&text)
}

fn carries_padding(token: &Token) -> bool {
    !token.is_punctuation
}

/// Compute the spacing decision for every adjacent token pair.
///
/// Returns one entry per pair, so the result has `tokens.len() - 1`
/// elements (and is empty for documents of fewer than two tokens).
pub fn resolve_spacing(tokens: &[Token]) -> Vec<Spacing> {
    let roles = quote_roles(tokens);
    let mut spacing = Vec::with_capacity(tokens.len().saturating_sub(1));

    for index in 0..tokens.len().saturating_sub(1) {
        let current = &tokens[index];
        let next = &tokens[index + 1];

        if current.is_line_break() || next.is_line_break() {
            spacing.push(Spacing::Break);
            continue;
        }

        let attached =
            right_attaching(current, roles[index]) || left_attaching(next, roles[index + 1]);
        if !attached {
            spacing.push(Spacing::Gap);
            continue;
        }

        spacing.push(
            match (carries_padding(current), carries_padding(next)) {
                (true, true) => Spacing::OverlapBoth,
                (true, false) | (false, true) => Spacing::OverlapOne,
                (false, false) => Spacing::Flush,
            },
        );
    }

    spacing
}
