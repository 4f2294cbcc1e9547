use crate::citations::sources_from_grounding;
use crate::error::{AnalysisError, Result};
use crate::input::AnalysisInput;
use crate::model::SeoReport;
use crate::prompt::build_prompt;
use crate::schema::report_schema;
use crate::wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Tool};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used for every audit. Not user-configurable.
pub const MODEL: &str = "gemini-3-pro-preview";
/// Credential travels in a header so it never ends up in a logged URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can turn an [`AnalysisInput`] into a report.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn request(&self, input: &AnalysisInput) -> Result<SeoReport>;
}

/// Requests audits from the Gemini `generateContent` endpoint with Google
/// Search grounding and a fixed response schema.
///
/// One call per request: no retries, no streaming, no timeout beyond the
/// HTTP client's defaults.
pub struct GeminiAnalyzer {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiAnalyzer {
    /// `api_key` may be absent; every request then fails with
    /// [`AnalysisError::MissingCredential`] without touching the network.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("seointel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point at a different API root (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        MODEL
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, MODEL)
    }

    pub fn build_request(input: &AnalysisInput) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(build_prompt(input))],
            tools: vec![Tool::default()],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: report_schema().to_wire(),
            },
        }
    }

    /// Turn a decoded API response into a report: extract the answer text,
    /// parse it, validate it against the schema, then attach citations.
    pub fn parse_response(response: &GenerateContentResponse) -> Result<SeoReport> {
        let text = response.text().ok_or(AnalysisError::EmptyResponse)?;
        let payload: serde_json::Value = serde_json::from_str(text.trim())?;

        report_schema().validate(&payload)?;
        let mut report: SeoReport = serde_json::from_value(payload)?;
        report.sources = sources_from_grounding(response.grounding_chunks());

        Ok(report)
    }

    async fn fetch(&self, api_key: &str, input: &AnalysisInput) -> Result<SeoReport> {
        let body = Self::build_request(input);

        debug!(model = MODEL, "Sending audit request to Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let decoded: GenerateContentResponse = serde_json::from_str(&raw)?;
        debug!(finish_reason = ?decoded.finish_reason(), "Gemini responded");

        Self::parse_response(&decoded)
    }
}

#[async_trait]
impl ReportSource for GeminiAnalyzer {
    async fn request(&self, input: &AnalysisInput) -> Result<SeoReport> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AnalysisError::MissingCredential);
        };

        info!("Starting SEO audit of {}", input.url.trim());

        match self.fetch(api_key, input).await {
            Ok(report) => {
                info!(
                    health_score = report.health_score,
                    sources = report.sources.len(),
                    "Audit complete"
                );
                Ok(report)
            }
            Err(e) => {
                error!("Audit of {} failed: {}", input.url.trim(), e);
                Err(e)
            }
        }
    }
}
