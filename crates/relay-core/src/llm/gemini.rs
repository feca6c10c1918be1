//! Gemini `generateContent` client.
//!
//! The whole diff goes into a single prompt; there is no truncation or
//! chunking, so very large diffs are sent as-is and may be rejected upstream.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

/// Posted in place of a review when the model returns no text.
pub const FALLBACK_REVIEW: &str = "No feedback from AI.";

/// Builds the reviewer prompt with the diff embedded verbatim.
pub fn build_review_prompt(diff: &str) -> String {
    format!(
        "\nYou are a senior software engineer reviewing a pull request.\n\
         \n\
         Analyze the code diff below and provide concise, constructive feedback:\n\
         - Point out bugs or logic issues.\n\
         - Suggest improvements for clarity, performance, or security.\n\
         - If everything looks good, reply with: \"✅ Looks good to me.\"\n\
         \n\
         ```diff\n\
         {}\n\
         ```\n",
        diff
    )
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if non-empty.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

/// A generated review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewText {
    pub text: String,
    /// True when the model returned nothing and [`FALLBACK_REVIEW`] was substituted.
    pub is_fallback: bool,
}

impl ReviewText {
    fn from_response(response: GenerateContentResponse) -> Self {
        match response.first_text() {
            Some(text) => Self {
                text,
                is_fallback: false,
            },
            None => Self {
                text: FALLBACK_REVIEW.to_string(),
                is_fallback: true,
            },
        }
    }
}

/// Client for the Gemini generative language API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_base: String,
    model: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: SecretString,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            model: model.into(),
            api_key,
        }
    }

    /// Endpoint without the key; the key is attached as a query parameter.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    /// Asks the model to review `diff`.
    pub async fn generate_review(&self, diff: &str) -> Result<ReviewText> {
        let prompt = build_review_prompt(diff);
        let request = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: &prompt }],
            }],
        };

        // Strip the URL from transport errors: its query string carries the API key.
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Generation(format!("request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Generation(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Generation(format!("failed to read response: {}", e.without_url())))?;

        // An unexpected shape is treated like an empty answer, not a failure.
        let parsed = serde_json::from_str::<GenerateContentResponse>(&body).unwrap_or_else(|e| {
            tracing::warn!("Unexpected Gemini response shape: {}", e);
            GenerateContentResponse::default()
        });

        Ok(ReviewText::from_response(parsed))
    }
}
