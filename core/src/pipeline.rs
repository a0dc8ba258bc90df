//! Chunked annotation pipeline orchestration.
//!
//! A document run is a single-threaded loop with one suspension point
//! per segment: split, annotate each segment in order with one awaited
//! oracle call, merge. There is no concurrency and no cancellation path
//! once a run has started; the caller either receives the full token
//! sequence or a failure carrying the offending segment.

use std::sync::Arc;

use tracing::{debug, info};

use gloss_oracle::{
    AnnotationProvider, DeepAnalysis, DeepAnalysisRequest, SegmentRequest,
};

use crate::context::{window_context, DEFAULT_CONTEXT_RADIUS};
use crate::error::{GlossError, Result};
use crate::splitter::{split_segments, DEFAULT_MAX_SEGMENT_LINES};
use crate::token::Token;

/// Configuration for the annotation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of input lines per oracle segment.
    pub max_segment_lines: usize,

    /// Token radius of the context window handed to deep analysis.
    pub context_radius: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_segment_lines: DEFAULT_MAX_SEGMENT_LINES,
            context_radius: DEFAULT_CONTEXT_RADIUS,
        }
    }
}

/// The document annotation pipeline.
pub struct GlossPipeline {
    config: PipelineConfig,
    provider: Arc<dyn AnnotationProvider>,
}

impl GlossPipeline {
    /// Create a pipeline with default configuration.
    pub fn new(provider: Arc<dyn AnnotationProvider>) -> Self {
        Self::with_config(provider, PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(provider: Arc<dyn AnnotationProvider>, config: PipelineConfig) -> Self {
        Self { config, provider }
    }

    /// Annotate a whole document.
    ///
    /// Segments are annotated strictly in order, one call at a time. The
    /// policy is all-or-nothing by design, not by accident of early
    /// return: the first failing segment aborts the run, every
    /// already-fetched segment is dropped, and the error names the
    /// segment. A partially annotated document with silent gaps would be
    /// worse than a clear failure.
    pub async fn annotate_document(&self, text: &str) -> Result<Vec<Token>> {
        let segments = split_segments(text, self.config.max_segment_lines);
        if segments.is_empty() {
            return Ok(Vec::new());
        }

        let total = segments.len();
        info!("annotating document in {total} segments");

        let mut per_segment: Vec<Vec<Token>> = Vec::with_capacity(total);
        for (position, segment) in segments.into_iter().enumerate() {
            let index = position + 1;
            debug!("annotating segment {index}/{total}");

            let records = self
                .provider
                .annotate_segment(SegmentRequest::new(segment, index, total))
                .await
                .map_err(|source| GlossError::SegmentAnnotation {
                    index,
                    total,
                    source,
                })?;

            per_segment.push(records.into_iter().map(Token::from).collect());
        }

        let tokens = merge_segments(per_segment);
        info!("document annotated: {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Re-analyze the token at `index` with a bounded context window.
    ///
    /// The token sequence is read, never written: on success the caller
    /// applies the returned analysis (via
    /// [`Document::apply_deep_analysis`](crate::Document::apply_deep_analysis)),
    /// and on failure the document is untouched.
    pub async fn deep_analyze(&self, tokens: &[Token], index: usize) -> Result<DeepAnalysis> {
        let token = tokens.get(index).ok_or(GlossError::IndexOutOfBounds {
            index,
            len: tokens.len(),
        })?;

        let context = window_context(tokens, index, self.config.context_radius);
        debug!("deep-analyzing \"{}\" at index {index}", token.original);

        self.provider
            .deep_analyze(DeepAnalysisRequest::new(
                &token.original,
                &token.lemma,
                context,
            ))
            .await
            .map_err(|source| GlossError::DeepAnalysis {
                original: token.original.clone(),
                source,
            })
    }
}

/// Concatenate per-segment token lists in submission order.
///
/// No deduplication and no reconciliation across segment boundaries: a
/// word split oddly by a bad chunk boundary is accepted as emitted. The
/// chunk-position preamble in the oracle prompt is the only cross-chunk
/// context.
pub fn merge_segments(segments: Vec<Vec<Token>>) -> Vec<Token> {
    segments.into_iter().flatten().collect()
}
