use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::MealSuggestion;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_MEAL_API_URL: &str = "https://foodish-api.com/api/";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("meal suggestion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("meal suggestion response was not JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("meal suggestion response had no image URL")]
    MissingImage,
}

impl FetchError {
    /// Message shown inline to the user; the full error goes to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::MissingImage => "Unable to retrieve meal suggestion.",
            FetchError::Transport(_) | FetchError::Malformed(_) => {
                "Error fetching meal suggestion"
            }
        }
    }
}

#[async_trait]
pub trait MealSource: Send + Sync {
    async fn fetch_suggestion(&self) -> Result<MealSuggestion, FetchError>;
}

/// Fetches a random meal image from a Foodish-compatible endpoint.
/// One GET per call: no retry, timeout or caching.
pub struct FoodishClient {
    http: Client,
    endpoint: String,
}

impl FoodishClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for FoodishClient {
    fn default() -> Self {
        Self::new(DEFAULT_MEAL_API_URL)
    }
}

#[async_trait]
impl MealSource for FoodishClient {
    async fn fetch_suggestion(&self) -> Result<MealSuggestion, FetchError> {
        debug!(endpoint = %self.endpoint, "fetching meal suggestion");
        let body = self
            .http
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let suggestion = parse_suggestion(&body)?;
        info!(image = %suggestion.image, "meal suggestion received");
        Ok(suggestion)
    }
}

/// Accepts only a JSON object whose `image` field is a non-empty string.
pub fn parse_suggestion(body: &str) -> Result<MealSuggestion, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    match value.get("image").and_then(Value::as_str) {
        Some(image) if !image.trim().is_empty() => Ok(MealSuggestion {
            image: image.to_string(),
        }),
        _ => Err(FetchError::MissingImage),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
