//! # Annotation Oracle Client
//!
//! This crate talks to the external annotation oracle that glosses
//! historical-language text. The oracle is opaque: it receives a text
//! fragment plus a declared response schema and returns either a
//! structured token array (segment annotation) or a single structured
//! revision (deep analysis). Its reasoning is not modelled here.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Annotation Oracle Client                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  AnnotationProvider ──► SegmentRequest ──► Vec<TokenRecord>     │
//! │       │                 DeepAnalysisRequest ──► DeepAnalysis    │
//! │       ▼                                                         │
//! │  GeminiProvider ──► prompt + schema ──► defensive validation    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call is single-attempt: failures surface as typed
//! [`OracleError`]s and retry is the caller's (or the user's) decision.

pub mod error;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod types;

pub use error::{OracleError, Result};
pub use provider::{AnnotationProvider, GeminiProvider};
pub use schema::{deep_analysis_schema, token_array_schema, validate_token_records};
pub use types::{
    DeepAnalysis, DeepAnalysisRequest, SegmentRequest, SourceRef, TokenPatch, TokenRecord,
};
