//! Error types for the glossing engine.

use gloss_oracle::OracleError;
use thiserror::Error;

/// Result type alias for glossing operations.
pub type Result<T> = std::result::Result<T, GlossError>;

/// The single user-facing message for annotation-pipeline failures.
///
/// The UI boundary does not distinguish root causes; the underlying
/// error stays available through `source()` for diagnostic logging.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze text. Please try again or check your oracle configuration.";

/// Errors that can occur in the glossing engine.
#[derive(Error, Debug)]
pub enum GlossError {
    /// One segment failed to annotate. The whole run is aborted and no
    /// partial token sequence is kept.
    #[error("annotation failed on segment {index} of {total}: {source}")]
    SegmentAnnotation {
        /// 1-based index of the failing segment.
        index: usize,
        /// Total segments in the run.
        total: usize,
        /// The underlying oracle failure.
        #[source]
        source: OracleError,
    },

    /// Single-token re-analysis failed. The document is left unmodified.
    #[error("deep analysis of \"{original}\" failed: {source}")]
    DeepAnalysis {
        /// Surface form of the token being re-analyzed.
        original: String,
        /// The underlying oracle failure.
        #[source]
        source: OracleError,
    },

    /// Token index outside the document.
    #[error("token index {index} out of bounds for document of {len} tokens")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Imported content is not an acceptable token array.
    #[error("import rejected: {0}")]
    ImportValidation(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV formatting error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl GlossError {
    /// Collapse any annotation-pipeline failure into the one user-facing
    /// category; everything else keeps its own message.
    pub fn user_message(&self) -> String {
        match self {
            Self::SegmentAnnotation { .. } | Self::DeepAnalysis { .. } => {
                ANALYSIS_FAILED_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pipeline_failures_share_one_user_message() {
        let segment = GlossError::SegmentAnnotation {
            index: 2,
            total: 3,
            source: OracleError::EmptyResponse,
        };
        let deep = GlossError::DeepAnalysis {
            original: "cwæð".to_string(),
            source: OracleError::EmptyResponse,
        };

        assert_eq!(segment.user_message(), ANALYSIS_FAILED_MESSAGE);
        assert_eq!(deep.user_message(), ANALYSIS_FAILED_MESSAGE);
        // The diagnostic rendering still names the segment.
        assert!(segment.to_string().contains("segment 2 of 3"));
    }

    #[test]
    fn import_failures_keep_their_descriptive_message() {
        let err = GlossError::ImportValidation("expected a JSON array of tokens".to_string());
        assert!(err.user_message().contains("expected a JSON array"));
    }
}
