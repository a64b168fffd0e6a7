// search.rs

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::SearchError;

/// Base URL of the Spoonacular REST API.
pub const SPOONACULAR_URL: &str = "https://api.spoonacular.com";

/// Result cap when the caller does not ask for one.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

// Spoonacular rejects `number` outside 1..=100.
const MAX_RESULTS_CAP: u32 = 100;

// Single connection pool shared by every client instance.
static HTTP: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// One dish as shown to the user: image plus a little metadata.
///
/// Built fresh from every upstream response. `image` falls back to an
/// empty string when the upstream item has none; the two numeric fields
/// stay absent (and are left out of serialized JSON) rather than
/// defaulting to zero.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
}

/// Wire shape of the upstream response. A payload without a `results`
/// array maps to an empty list, not an error.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Presence check shared by the HTML form and the JSON API. Runs before
/// any network traffic.
pub fn validate_inputs(query: &str, api_key: &str) -> Result<(), SearchError> {
    if query.trim().is_empty() || api_key.trim().is_empty() {
        return Err(SearchError::MissingInput);
    }
    Ok(())
}

/// Client for the Spoonacular recipe search endpoint.
pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    pub fn new() -> Self {
        Self::with_base_url(SPOONACULAR_URL)
    }

    /// Point the client somewhere else; tests use a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: HTTP.clone(),
            base_url: base_url.into(),
        }
    }

    /// Search dishes by free-text name.
    ///
    /// Issues one GET to `/recipes/complexSearch` with the key, the
    /// query, the result cap and the extended-metadata flag, then maps
    /// the `results` array into [`SearchResult`]s.
    pub async fn search_dishes(
        &self,
        query: &str,
        api_key: &str,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let number = max_results.clamp(1, MAX_RESULTS_CAP).to_string();
        tracing::info!(query = %query, number = %number, "searching dishes");

        let url = format!("{}/recipes/complexSearch", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", api_key),
                ("query", query),
                ("number", number.as_str()),
                ("addRecipeInformation", "true"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        tracing::debug!(count = parsed.results.len(), "search response mapped");
        Ok(parsed.results)
    }
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}
