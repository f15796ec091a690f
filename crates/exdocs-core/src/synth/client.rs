//! Structured generation over the Generative Language REST API.
//!
//! The request asks for a JSON response constrained to the
//! [`GeneratedExample`] schema. A reply that still does not fit the schema
//! is [`Error::SchemaMismatch`]; nothing is retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::config::GeneratorConfig;
use crate::types::GeneratedExample;
use crate::{Error, Result};

/// Anything that can turn a prompt into a [`GeneratedExample`].
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Submit `prompt` and return the parsed example.
    ///
    /// # Errors
    ///
    /// [`Error::SchemaMismatch`] when the reply does not fit the schema,
    /// [`Error::Generation`] when the API rejects the request.
    async fn generate(&self, prompt: &str) -> Result<GeneratedExample>;
}

/// Client for `models/{model}:generateContent`.
pub struct GeminiClient {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from generator settings and an API credential.
    pub fn new(config: &GeneratorConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("exdocs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    #[instrument(level = "debug", skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<GeneratedExample> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Generation {
                status: status.as_u16(),
                body,
            });
        }
        debug!("generation response: {} bytes", body.len());
        parse_response(&body)
    }
}

/// JSON schema the reply must follow.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "python_code": {
                "type": "STRING",
                "description": "Annotated Python example program"
            },
            "shell_code": {
                "type": "STRING",
                "description": "Shell commands that run the program, with sample output"
            },
            "requests_code": {
                "type": "STRING",
                "nullable": true,
                "description": "Python requests code replicating curl examples, if any"
            },
            "requires_image": {
                "type": "BOOLEAN",
                "description": "Whether the page needs an image of the output"
            }
        },
        "required": ["python_code", "shell_code", "requires_image"],
        "propertyOrdering": ["python_code", "shell_code", "requests_code", "requires_image"]
    })
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Part {
    text: Option<String>,
}

/// Extract and validate the example from a raw API response body.
pub fn parse_response(body: &str) -> Result<GeneratedExample> {
    let mismatch = |reason: String| Error::SchemaMismatch {
        reason,
        raw: body.to_string(),
    };

    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| mismatch(format!("response is not valid JSON: {e}")))?;
    let text: String = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(mismatch("response contains no candidate text".to_string()));
    }

    parse_generated(&text)
}

/// Validate the candidate text against the [`GeneratedExample`] schema.
pub fn parse_generated(text: &str) -> Result<GeneratedExample> {
    serde_json::from_str(text).map_err(|e| Error::SchemaMismatch {
        reason: e.to_string(),
        raw: text.to_string(),
    })
}
