//! Decode probes.

use async_trait::async_trait;
use thiserror::Error;

/// Why a probe failed. Only ever informative: the tracker counts a failed
/// probe the same as a successful one.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("not an image: {0}")]
    NotAnImage(String),

    #[error("empty response body")]
    EmptyBody,
}

/// Checks that one URL resolves to a decodable image.
#[async_trait]
pub trait DecodeProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<(), ProbeError>;
}

/// HTTP-backed probe: fetches the URL and checks it plausibly decodes
/// (2xx, image content type, nonempty body).
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DecodeProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ProbeError::Request(err.to_string()))?
            .error_for_status()
            .map_err(|err| ProbeError::Request(err.to_string()))?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(ProbeError::NotAnImage(content_type));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| ProbeError::Request(err.to_string()))?;
        if body.is_empty() {
            return Err(ProbeError::EmptyBody);
        }
        Ok(())
    }
}
