//! Error types for the annotation oracle client.

use thiserror::Error;

/// Result type alias for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;

/// Errors that can occur when talking to the annotation oracle.
#[derive(Error, Debug)]
pub enum OracleError {
    /// API key not configured.
    #[error("oracle api key not configured")]
    MissingApiKey,

    /// API request failed.
    #[error("api request failed: {0}")]
    ApiRequest(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The oracle returned no structured text.
    #[error("oracle returned no structured text")]
    EmptyResponse,

    /// The oracle returned an empty token array for a non-empty segment.
    #[error("oracle returned an empty annotation")]
    EmptyAnnotation,

    /// The response text failed to parse as the declared schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A token in the response is missing a required field.
    #[error("token {index} in response is missing required field `{field}`")]
    SchemaViolation { index: usize, field: &'static str },

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
