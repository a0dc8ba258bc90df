//! Annotation providers.
//!
//! The oracle is an opaque, schema-constrained request/response
//! collaborator. The provider trait is the seam: the pipeline talks to
//! `dyn AnnotationProvider`, and the concrete Gemini implementation lives
//! behind it.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{OracleError, Result};
use crate::prompt::{deep_analysis_instruction, segment_instruction};
use crate::schema::{deep_analysis_schema, token_array_schema, validate_token_records};
use crate::types::{
    DeepAnalysis, DeepAnalysisRequest, SegmentRequest, SourceRef, TokenPatch, TokenRecord,
};

/// Trait for annotation oracle providers.
#[async_trait]
pub trait AnnotationProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Check if the provider is configured (API key set, etc.).
    fn is_available(&self) -> bool;

    /// Annotate one segment of input text. One attempt, no retry.
    async fn annotate_segment(&self, request: SegmentRequest) -> Result<Vec<TokenRecord>>;

    /// Re-analyze a single token in context, collecting grounding citations.
    async fn deep_analyze(&self, request: DeepAnalysisRequest) -> Result<DeepAnalysis>;
}

/// Google Gemini annotation provider.
pub struct GeminiProvider {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model used for both segment annotation and deep analysis.
    model: String,

    /// Sampling temperature. Kept low so glosses stay stable.
    temperature: f32,
}

impl GeminiProvider {
    /// Create a new Gemini provider, reading the key from `GEMINI_API_KEY`.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            client: reqwest::Client::new(),
            model: "gemini-3-flash-preview".to_string(),
            temperature: 0.1,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Issue one generateContent call and return the structured text plus
    /// any grounding citations the oracle reported alongside it.
    async fn generate(
        &self,
        instruction: String,
        response_schema: serde_json::Value,
        with_grounding: bool,
    ) -> Result<(String, Vec<SourceRef>)> {
        let api_key = self.api_key.as_ref().ok_or(OracleError::MissingApiKey)?;

        let mut body = serde_json::json!({
            "contents": [{ "parts": [{ "text": instruction }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema,
                "temperature": self.temperature,
                "thinkingConfig": { "thinkingBudget": 0 }
            }
        });

        if with_grounding {
            body["tools"] = serde_json::json!([{ "googleSearch": {} }]);
        }

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(OracleError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OracleError::ApiRequest(format!(
                "API error: {error_text}"
            )));
        }

        let result: GenerateContentResponse = response.json().await?;

        let candidate = result
            .candidates
            .into_iter()
            .next()
            .ok_or(OracleError::EmptyResponse)?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(OracleError::EmptyResponse);
        }

        let sources = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| SourceRef::new(web.title, web.uri))
                    .collect()
            })
            .unwrap_or_default();

        Ok((text.trim().to_string(), sources))
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnnotationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn annotate_segment(&self, request: SegmentRequest) -> Result<Vec<TokenRecord>> {
        debug!(
            "annotating segment {}/{} with model: {}",
            request.index, request.total, self.model
        );

        let instruction = segment_instruction(&request);
        let (text, _) = self
            .generate(instruction, token_array_schema(), false)
            .await?;

        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|err| OracleError::MalformedResponse(err.to_string()))?;
        let records = validate_token_records(value)?;

        info!(
            "segment {}/{} annotated: {} tokens",
            request.index,
            request.total,
            records.len()
        );

        Ok(records)
    }

    async fn deep_analyze(&self, request: DeepAnalysisRequest) -> Result<DeepAnalysis> {
        debug!(
            "deep-analyzing \"{}\" with model: {}",
            request.original, self.model
        );

        let instruction = deep_analysis_instruction(&request);
        let (text, sources) = self
            .generate(instruction, deep_analysis_schema(), true)
            .await?;

        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|err| OracleError::MalformedResponse(err.to_string()))?;
        if !value.is_object() {
            return Err(OracleError::MalformedResponse(
                "expected a single revision object".to_string(),
            ));
        }
        let updates: TokenPatch = serde_json::from_value(value)
            .map_err(|err| OracleError::MalformedResponse(err.to_string()))?;

        info!(
            "deep analysis of \"{}\" returned {} sources",
            request.original,
            sources.len()
        );

        Ok(DeepAnalysis { updates, sources })
    }
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    title: String,
    #[serde(default)]
    uri: String,
}
