//! Google Cloud Vision client.
//!
//! One client per process, created on first use from credentials in the
//! environment and shared read-only afterwards.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

use seikyu_core::models::config::OcrConfig;
use seikyu_core::models::invoice::elapsed_ms;
use seikyu_core::ocr::vision::strip_data_url;
use seikyu_core::ocr::{AnnotateImageRequest, BatchAnnotateImagesRequest};
use seikyu_core::OcrResult;

static CLIENT: OnceLock<VisionClient> = OnceLock::new();

/// How requests authenticate.
enum Credential {
    /// API key sent as the `key` query parameter.
    ApiKey(String),
    /// OAuth access token sent as a bearer header.
    Bearer(String),
}

/// Raw provider response alongside the parsed result.
pub struct Annotation {
    pub result: OcrResult,
    pub body: String,
}

pub struct VisionClient {
    http: reqwest::Client,
    credential: Credential,
    config: OcrConfig,
}

impl VisionClient {
    /// Build a client from the environment variables named in `config`.
    pub fn from_env(config: &OcrConfig) -> anyhow::Result<Self> {
        let credential = if let Some(key) = non_empty_env(&config.api_key_env) {
            debug!("Using API key from {}", config.api_key_env);
            Credential::ApiKey(key)
        } else if let Some(token) = non_empty_env(&config.access_token_env) {
            debug!("Using access token from {}", config.access_token_env);
            Credential::Bearer(token)
        } else {
            anyhow::bail!(
                "No OCR credentials: set {} or {}",
                config.api_key_env,
                config.access_token_env
            );
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            credential,
            config: config.clone(),
        })
    }

    /// Run text detection on raw image bytes or a base64 data URL.
    pub async fn annotate(&self, image: &[u8]) -> anyhow::Result<Annotation> {
        let start = Instant::now();

        let content = encode_image(image);
        let body = BatchAnnotateImagesRequest::single(AnnotateImageRequest::text_detection(
            &content,
            &self.config,
        ));

        let request = self.http.post(&self.config.endpoint).json(&body);
        let request = match &self.credential {
            Credential::ApiKey(key) => request.query(&[("key", key)]),
            Credential::Bearer(token) => request.bearer_auth(token),
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!("OCR failed: request timed out after {}s", self.config.timeout_secs)
            } else {
                anyhow::anyhow!("OCR failed: {}", e)
            }
        })?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            anyhow::bail!("OCR failed ({}): {}", status, text);
        }

        let mut result = OcrResult::from_response_json(&text)
            .map_err(|e| anyhow::anyhow!("OCR failed: {}", e))?;
        result.processing_time_ms = elapsed_ms(start.elapsed());

        info!(
            "OCR recognized {} chars in {}ms",
            result.text.chars().count(),
            result.processing_time_ms
        );

        Ok(Annotation { result, body: text })
    }
}

/// The process-wide client, created on first call.
pub fn shared_client(config: &OcrConfig) -> anyhow::Result<&'static VisionClient> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }

    let client = VisionClient::from_env(config)?;
    Ok(CLIENT.get_or_init(|| client))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Base64 content for the request body.
///
/// Files already holding a `data:image/...;base64,` URL are passed through
/// without the prefix.
fn encode_image(image: &[u8]) -> String {
    match std::str::from_utf8(image) {
        Ok(text) if text.starts_with("data:image/") => strip_data_url(text.trim()).to_string(),
        _ => STANDARD.encode(image),
    }
}
