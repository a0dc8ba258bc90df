//! In-memory document session state.
//!
//! The token sequence is the single source of truth: the flagged set is
//! derived by filtering on demand rather than kept as a second mutable
//! collection that could drift out of sync.

use gloss_oracle::{DeepAnalysis, TokenPatch};

use crate::token::Token;

/// The glossed document held for the session lifetime.
///
/// Order is reading order and is never changed after merge; mutations are
/// wholesale replacement, ordered appends, or element-wise patches.
#[derive(Debug, Clone, Default)]
pub struct Document {
    tokens: Vec<Token>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from an existing token sequence.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// The token sequence, in reading order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the document holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Replace the whole sequence after a successful pipeline run.
    pub fn replace(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
    }

    /// Discard all session state.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Append a follow-up analysis to the document.
    ///
    /// When the current text does not already end on a line break, two
    /// line-break separators go in first so the appended text starts on
    /// its own paragraph instead of running into the previous line.
    pub fn append(&mut self, tokens: Vec<Token>) {
        let needs_separator = self
            .tokens
            .last()
            .is_some_and(|last| !last.is_line_break());

        if needs_separator {
            self.tokens.push(Token::line_break());
            self.tokens.push(Token::line_break());
        }
        self.tokens.extend(tokens);
    }

    /// Toggle the study flag on one token. Out-of-range is a no-op.
    pub fn toggle_flag(&mut self, index: usize) {
        if let Some(token) = self.tokens.get_mut(index) {
            token.is_flagged = !token.is_flagged;
        }
    }

    /// Manually overwrite the fields present in `patch`. Out-of-range is
    /// a no-op.
    pub fn update_token(&mut self, index: usize, patch: &TokenPatch) {
        if let Some(token) = self.tokens.get_mut(index) {
            token.apply_patch(patch);
        }
    }

    /// Apply a deep-analysis result: field revisions plus provenance
    /// sources. The study flag is session state and survives untouched.
    pub fn apply_deep_analysis(&mut self, index: usize, analysis: &DeepAnalysis) {
        if let Some(token) = self.tokens.get_mut(index) {
            token.apply_patch(&analysis.updates);
            if !analysis.sources.is_empty() {
                token.sources = Some(analysis.sources.clone());
            }
        }
    }

    /// Indices of flagged tokens, in ascending document order.
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.is_flagged)
            .map(|(index, _)| index)
            .collect()
    }
}
