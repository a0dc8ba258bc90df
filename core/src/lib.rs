//! # Glossing Engine
//!
//! This crate implements the document model and annotation pipeline for
//! glossing historical-language text. It provides:
//!
//! - **Chunked Annotation Pipeline**: bounded segments, one oracle call
//!   per segment, ordered merge with all-or-nothing failure semantics
//! - **Token Stream Presentation Model**: quote-aware attachment and
//!   spacing decisions reconstructed from the flat token list
//! - **Context Extraction**: display windows and sentence spans around a
//!   target token
//! - **Import/Export**: JSON session documents and CSV study cards
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Chunked Annotation Pipeline                  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  raw text ──► split_segments ──► AnnotationProvider (per chunk) │
//! │                                        │                        │
//! │                                        ▼                        │
//! │  Document ◄── Vec<Token> ◄── merge_segments                     │
//! └─────────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Token Stream Presentation Model                 │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  quote_roles ──► resolve_spacing ──► render-time margins        │
//! │  window_context / sentence_context ──► display and study export │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod context;
pub mod document;
pub mod error;
pub mod export;
pub mod layout;
pub mod pipeline;
pub mod splitter;
pub mod token;

pub use context::{sentence_context, window_context, SentenceContext, DEFAULT_CONTEXT_RADIUS};
pub use document::Document;
pub use error::{GlossError, Result, ANALYSIS_FAILED_MESSAGE};
pub use export::{
    export_filename, export_filename_today, export_json, export_study_csv, import_json,
};
pub use layout::{left_attaching, quote_roles, resolve_spacing, right_attaching, QuoteRole, Spacing};
pub use pipeline::{merge_segments, GlossPipeline, PipelineConfig};
pub use splitter::{split_segments, DEFAULT_MAX_SEGMENT_LINES};
pub use token::{Token, LINE_BREAK};

// The oracle types that appear in this crate's public API.
pub use gloss_oracle::{
    AnnotationProvider, DeepAnalysis, DeepAnalysisRequest, OracleError, SegmentRequest, SourceRef,
    TokenPatch, TokenRecord,
};
