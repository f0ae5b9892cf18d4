use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use crate::app_config::VoiceConfig;
use crate::errors::ProviderError;
use crate::providers::SpeechSynthesizer;

/// Client for the public Google Translate text-to-speech endpoint
///
/// The endpoint serves an MP3 stream for a GET request carrying the text and
/// language as query parameters. Requests are retried with exponential
/// backoff on transport and server errors.
#[derive(Debug)]
pub struct GoogleTranslateTts {
    /// Base URL of the TTS endpoint
    endpoint: String,
    /// Spoken language code
    language: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

impl GoogleTranslateTts {
    /// Create a new client from the voice configuration
    pub fn with_config(config: &VoiceConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            language: config.language.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            max_retries: config.retry_count,
            backoff_base_ms: config.backoff_base_ms,
        }
    }

    /// Create a new client with an explicit endpoint and language
    #[allow(dead_code)]
    pub fn new(endpoint: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            language: language.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
            backoff_base_ms: 1000,
        }
    }

    /// Issue one TTS request and return the raw audio bytes
    async fn fetch_audio(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ProviderError::EmptyResponse(text.to_string()));
        }

        Ok(bytes.to_vec())
    }

    /// Whether a failed attempt is worth retrying
    fn is_retryable(error: &ProviderError) -> bool {
        match error {
            ProviderError::ConnectionError(_) => true,
            ProviderError::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<(), ProviderError> {
        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            match self.fetch_audio(text).await {
                Ok(bytes) => {
                    tokio::fs::write(output_path, &bytes).await?;
                    info!("Voice file created: {:?}", output_path);
                    return Ok(());
                }
                Err(e) if Self::is_retryable(&e) => {
                    error!(
                        "TTS request failed: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }

            attempt += 1;

            // Exponential backoff before the next attempt
            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                debug!("Backing off {}ms before retry", backoff_ms);
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "TTS request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }

    fn name(&self) -> &str {
        "Google Translate TTS"
    }
}
