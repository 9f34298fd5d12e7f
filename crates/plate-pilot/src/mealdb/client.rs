// HTTP client for TheMealDB.
//
// Every endpoint returns the same `{"meals": [...] | null}` envelope; the
// client decodes it and hands each entry to the adapter.

use std::collections::HashSet;
use std::time::Duration;

use futures_util::future::join_all;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::{debug, warn};

use super::adapter::{self, MealDbMeal, MealDbResponse};
use crate::config::ApiConfig;
use crate::model::Meal;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure talking to MealDB. `Display` output is shown to the user as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response from server")]
    InvalidResponse(StatusCode),

    #[error("Failed to decode data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No data received")]
    NoData,
}

// ---------------------------------------------------------------------------
// MealDbClient
// ---------------------------------------------------------------------------

pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    /// Build a client from the `[api]` config section.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_timeouts(
            &config.base_url,
            config.request_timeout(),
            config.resource_timeout(),
        )
    }

    /// `request_timeout` bounds connecting; `resource_timeout` bounds the
    /// whole exchange including the body.
    pub fn with_timeouts(
        base_url: &str,
        request_timeout: Duration,
        resource_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(request_timeout)
            .timeout(resource_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET search.php?s=<query>`. No match yields an empty list.
    pub async fn search_meals(&self, query: &str) -> Result<Vec<Meal>, ApiError> {
        let url = self.endpoint("search.php", &[("s", query)])?;
        let raw = self.get_meals(url).await?;
        debug!(query, results = raw.len(), "search complete");
        Ok(convert_all(raw))
    }

    /// `GET random.php`: one random meal.
    pub async fn fetch_random_meal(&self) -> Result<Meal, ApiError> {
        let url = self.endpoint("random.php", &[])?;
        let raw = self.get_meals(url).await?;
        convert_all(raw).into_iter().next().ok_or(ApiError::NoData)
    }

    /// Fire `count` random requests concurrently. Any failure fails the
    /// batch. Repeated ids are dropped, keeping the first occurrence.
    pub async fn fetch_random_meals(&self, count: usize) -> Result<Vec<Meal>, ApiError> {
        let results = join_all((0..count).map(|_| self.fetch_random_meal())).await;

        let mut seen = HashSet::new();
        let mut meals = Vec::with_capacity(count);
        for result in results {
            let meal = result?;
            if seen.insert(meal.id.clone()) {
                meals.push(meal);
            }
        }
        if meals.len() < count {
            debug!(requested = count, unique = meals.len(), "dropped duplicate random meals");
        }
        Ok(meals)
    }

    /// `GET lookup.php?i=<id>`. `None` when the id is unknown.
    pub async fn lookup_meal(&self, id: &str) -> Result<Option<Meal>, ApiError> {
        let url = self.endpoint("lookup.php", &[("i", id)])?;
        let raw = self.get_meals(url).await?;
        Ok(convert_all(raw).into_iter().next())
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse_with_params(&raw, params).map_err(|e| {
            warn!("invalid MealDB URL {raw}: {e}");
            ApiError::InvalidUrl
        })
    }

    async fn get_meals(&self, url: Url) -> Result<Vec<MealDbMeal>, ApiError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "MealDB returned non-success status");
            return Err(ApiError::InvalidResponse(status));
        }

        let body = response.text().await?;
        let envelope: MealDbResponse = serde_json::from_str(&body)?;
        Ok(envelope.meals.unwrap_or_default())
    }
}

fn convert_all(raw: Vec<MealDbMeal>) -> Vec<Meal> {
    let mut rng = rand::rng();
    raw.into_iter()
        .map(|m| adapter::convert(m, &mut rng))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
