//! Transparent relay to the external generation service.
//!
//! The client injects the service credential header and forwards payloads
//! byte-for-byte. It never caches, transforms, or retries: provider errors
//! are returned with their upstream status and body intact so callers can
//! react to provider-specific failure semantics (rate limits, invalid
//! prompts). Only transport failures surface as errors.

use serde_json::Value;

/// Header carrying the service-level API key.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Logical endpoint names accepted by the generation proxy.
pub const GENERATION_ENDPOINTS: &[&str] = &["text2image", "image2image", "upscale"];

/// Check whether a logical endpoint name is one the proxy will forward.
pub fn is_valid_endpoint(endpoint: &str) -> bool {
    GENERATION_ENDPOINTS.contains(&endpoint)
}

/// Connection settings for the generation service.
#[derive(Debug, Clone)]
pub struct DiffusionConfig {
    /// Base HTTP URL, e.g. `https://api.example.com/v1`.
    pub base_url: String,
    /// Service credential sent in the `X-Api-Key` header. Never exposed to
    /// clients.
    pub api_key: String,
}

impl DiffusionConfig {
    /// Load from `DIFFUSION_API_URL` and `DIFFUSION_API_KEY`.
    ///
    /// # Panics
    ///
    /// Panics if either variable is unset.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("DIFFUSION_API_URL").expect("DIFFUSION_API_URL must be set");
        let api_key = std::env::var("DIFFUSION_API_KEY").expect("DIFFUSION_API_KEY must be set");
        Self { base_url, api_key }
    }
}

/// Any HTTP response from the upstream service, success or provider error.
///
/// Handlers relay both status and body verbatim.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

/// Errors from the generation service client.
#[derive(Debug, thiserror::Error)]
pub enum DiffusionError {
    /// The HTTP request itself failed (network, DNS, TLS). No upstream
    /// response exists to relay.
    #[error("Generation service transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Explicitly constructed client for one generation service; inject via
/// application state rather than a global singleton so tests can substitute
/// a fake upstream.
#[derive(Debug, Clone)]
pub struct DiffusionClient {
    client: reqwest::Client,
    config: DiffusionConfig,
}

impl DiffusionClient {
    pub fn new(config: DiffusionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Forward a generation request: `POST {base_url}/{endpoint}`.
    pub async fn generate(
        &self,
        endpoint: &str,
        payload: &Value,
    ) -> Result<UpstreamResponse, DiffusionError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);
        tracing::debug!(%endpoint, "Forwarding generation request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(payload)
            .send()
            .await?;

        Self::relay(response).await
    }

    /// Poll a generation result: `GET {base_url}/get_result?id={id}`.
    pub async fn fetch_result(&self, id: &str) -> Result<UpstreamResponse, DiffusionError> {
        let url = format!("{}/get_result", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[("id", id)])
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;

        Self::relay(response).await
    }

    /// Capture status and body for verbatim relay. A body that is not valid
    /// JSON is wrapped so the caller still gets a JSON response.
    async fn relay(response: reqwest::Response) -> Result<UpstreamResponse, DiffusionError> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text)
            .unwrap_or_else(|_| serde_json::json!({ "raw": text }));

        if status >= 400 {
            tracing::warn!(status, "Generation service returned an error response");
        }

        Ok(UpstreamResponse { status, body })
    }
}
