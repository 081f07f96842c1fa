//! Generative-language API client for performer insights
//!
//! Sends a performer's collected history to the hosted generative-language
//! API and returns its free-text summary. Prompt building and response
//! extraction are pure and unit-tested; only `generate` touches the network.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::db::HistoryRow;

const GENERATIVE_LANGUAGE_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";
const USER_AGENT: &str = "dayls-sd/0.1.0";

/// Insight client errors
#[derive(Debug, Error)]
pub enum InsightError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// The API returned a non-success status
    #[error("Insight API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse the API response JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// The API answered but carried no candidate text
    #[error("Insight API returned no candidates")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Response shape, reduced to the path we read
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Build the insight prompt from a performer's history rows.
pub fn build_prompt(performer_name: &str, history: &[HistoryRow]) -> String {
    let history_summary: Vec<String> = history
        .iter()
        .map(|entry| {
            format!(
                "Date: {}, Activity: \"{}\", Roles: {}, Type: {}, Notes: \"{}\"",
                entry.date,
                entry.activity_name,
                entry.roles,
                entry.kind.as_deref().unwrap_or("N/A"),
                if entry.notes.is_empty() { "N/A" } else { &entry.notes },
            )
        })
        .collect();

    format!(
        "Given the following historical activities for performer \"{}\":\n\n{}\n\n\
         Based on this data, provide an insightful summary of their primary instruments, \
         frequency of participation, any notable observations from the notes, and suggest \
         2-3 specific development recommendations (e.g., focus on a new genre, improve \
         specific technique, try leading a session). Keep it concise, 3-5 sentences for \
         summary and 2-3 bullet points for recommendations.",
        performer_name,
        history_summary.join("\n"),
    )
}

/// Pull the first candidate's first text part, if any.
pub fn extract_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()
        .map(|part| part.text)
}

/// Generative-language API client
pub struct InsightClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl InsightClient {
    pub fn new() -> Result<Self, InsightError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| InsightError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: GENERATIVE_LANGUAGE_BASE_URL.to_string(),
        })
    }

    /// Generate a free-text insight for one prompt.
    ///
    /// The API key travels only in the query string of this single request
    /// and is never logged.
    pub async fn generate(
        &self,
        model: &str,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, InsightError> {
        let url = format!("{}/{}:generateContent?key={}", self.base_url, model, api_key);

        debug!(model = %model, prompt_chars = prompt.len(), "Requesting performer insight");

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(InsightError::Api(status.as_u16(), error_text));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InsightError::Parse(e.to_string()))?;

        extract_text(parsed).ok_or(InsightError::EmptyResponse)
    }
}
