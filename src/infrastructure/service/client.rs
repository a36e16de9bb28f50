//! Ollama-compatible service client: probe, generate, list models

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use url::Url;

use super::wire::{
    GENERATE_PATH, GenerateOptions, GenerateRequest, GenerateResponse, TAGS_PATH, TagsResponse,
};
use crate::core::config::ServiceConfig;
use crate::generation::sanitizers::{extract_code, sanitize_generated_code};
use crate::generation::{ServiceError, ServiceReply, TextGenerationService};

/// Availability of the service as last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Unknown,
    Available,
    Unavailable,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Unknown => write!(f, "unknown"),
            ServiceState::Available => write!(f, "available"),
            ServiceState::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Thin client over the service's HTTP API.
///
/// Requests are made once with a bounded timeout and never retried.
pub struct ServiceClient {
    client: Client,
    base_url: String,
    model: String,
    probe_timeout: Duration,
    request_timeout: Duration,
    state: ServiceState,
}

impl ServiceClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| ServiceError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().to_string(),
            model: config.model.clone(),
            probe_timeout: config.probe_timeout(),
            request_timeout: config.request_timeout(),
            state: ServiceState::Unknown,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    /// `path` joined onto the base URL, which is treated as a directory
    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        let invalid = |reason: String| ServiceError::InvalidEndpoint {
            url: self.base_url.clone(),
            reason,
        };

        let mut base = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path).map_err(|e| invalid(e.to_string()))
    }

    fn transport_error(url: &Url, error: reqwest::Error) -> ServiceError {
        if error.is_timeout() {
            ServiceError::Timeout {
                url: url.to_string(),
            }
        } else {
            ServiceError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }

    /// Checks availability once; Available iff the tags endpoint answers 200.
    ///
    /// Only the status counts; the body is not read. Never fails. The
    /// observed state is kept on the client.
    pub async fn probe(&mut self) -> ServiceState {
        self.state = match self.get_tags(self.probe_timeout).await {
            Ok(_) => {
                tracing::info!(url = %self.base_url, model = %self.model, "Text-generation service available");
                ServiceState::Available
            }
            Err(e) => {
                tracing::info!(url = %self.base_url, error = %e, "Text-generation service unavailable");
                ServiceState::Unavailable
            }
        };
        self.state
    }

    /// Names of the models the service has installed
    pub async fn list_models(&self) -> Result<Vec<String>, ServiceError> {
        let (url, response) = self.get_tags(self.probe_timeout).await?;
        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tags: TagsResponse = serde_json::from_str(&body).map_err(|e| ServiceError::Malformed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(tags.models.into_iter().map(|model| model.name).collect())
    }

    /// `GET` the tags endpoint; anything but 200 is an error
    async fn get_tags(&self, timeout: Duration) -> Result<(Url, reqwest::Response), ServiceError> {
        let url = self.endpoint(TAGS_PATH)?;
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ServiceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok((url, response))
    }

    async fn request_generation(&self, prompt: &str) -> Result<String, ServiceError> {
        let url = self.endpoint(GENERATE_PATH)?;
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions::default(),
        };

        tracing::debug!(url = %url, prompt_chars = prompt.len(), "Requesting generation");
        let response = self
            .client
            .post(url.clone())
            .timeout(self.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ServiceError::Malformed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        match reply.response {
            Some(text) if !extract_code(&text).trim().is_empty() => Ok(text),
            _ => Err(ServiceError::EmptyReply {
                url: url.to_string(),
                field: "response",
            }),
        }
    }
}

#[async_trait]
impl TextGenerationService for ServiceClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> ServiceReply {
        match self.request_generation(prompt).await {
            Ok(text) => ServiceReply::Text(text),
            Err(e) => ServiceReply::from_error(e),
        }
    }

    fn sanitize(&self, text: &str, package: &str) -> String {
        sanitize_generated_code(text, package)
    }
}
