use async_trait::async_trait;
use ekyc_core::{EkycError, TokenCollection};
use ekyc_extraction::collect_text_fields;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Default OCR endpoint when none is configured.
pub const DEFAULT_OCR_ENDPOINT: &str =
    "https://westcentralus.api.cognitive.microsoft.com/vision/v1.0/ocr";

/// Where and how to reach the OCR endpoint.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub endpoint: String,
    pub subscription_key: String,
}

/// Anything that can turn an image into a token collection.
///
/// The dialog engine depends on this seam rather than on the concrete
/// HTTP client.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn recognize_bytes(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<TokenCollection, EkycError>;

    async fn recognize_url(&self, image_url: &str) -> Result<TokenCollection, EkycError>;
}

/// HTTP client for the OCR provider.
pub struct OcrClient {
    config: OcrConfig,
    http: Client,
}

impl OcrClient {
    pub fn new(config: OcrConfig) -> Self {
        Self { config, http: Client::new() }
    }

    async fn extract_tokens(
        &self,
        resp: reqwest::Response,
    ) -> Result<TokenCollection, EkycError> {
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(EkycError::Vision { status: status.as_u16(), detail });
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| EkycError::VisionTransport(e.to_string()))?;
        let tokens = collect_text_fields(&body);
        debug!(count = tokens.len(), "collected text fields from vision response");
        Ok(tokens)
    }
}

#[async_trait]
impl TokenSource for OcrClient {
    /// Run OCR over raw image bytes (octet-stream upload).
    async fn recognize_bytes(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<TokenCollection, EkycError> {
        info!(size = bytes.len(), "submitting image stream for OCR");
        let resp = self
            .http
            .post(&self.config.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| EkycError::VisionTransport(e.to_string()))?;
        self.extract_tokens(resp).await
    }

    /// Run OCR over an image the provider fetches itself by URL.
    async fn recognize_url(&self, image_url: &str) -> Result<TokenCollection, EkycError> {
        info!(url = image_url, "submitting image url for OCR");
        let resp = self
            .http
            .post(&self.config.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .json(&serde_json::json!({ "url": image_url }))
            .send()
            .await
            .map_err(|e| EkycError::VisionTransport(e.to_string()))?;
        self.extract_tokens(resp).await
    }
}
