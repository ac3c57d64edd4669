//! Genesys Cloud REST client
//!
//! Authenticated, paginated read access to the public API. Holds a
//! bearer token obtained through the OAuth client-credentials grant and
//! exposes exactly the listing calls the directory adapters need.

use serde::Deserialize;
use tracing::debug;
use vela_core::{DirectoryError, DirectoryResult};

use crate::config::GenesysConfig;

const PAGE_SIZE: &str = "100";

/// Authenticated Genesys Cloud API client
pub struct GenesysClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// One page of a Genesys entity listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Listing {
    pub entities: Vec<serde_json::Value>,
    pub page_count: u32,
    pub page_number: u32,
}

impl GenesysClient {
    /// Authenticate with the client-credentials grant and return a
    /// ready-to-use client.
    pub async fn connect(config: &GenesysConfig) -> DirectoryResult<Self> {
        let http = reqwest::Client::new();
        let url = format!("{}/oauth/token", config.login_base());

        let response = http
            .post(&url)
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| DirectoryError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))?;

        debug!(region = %config.region, "authenticated with Genesys Cloud");
        Ok(Self {
            http,
            api_base: config.api_base(),
            token: token.access_token,
        })
    }

    /// Build a client around an existing bearer token
    pub fn with_token(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    /// Fetch one page of a listing endpoint
    pub async fn get_list(&self, path: &str, query: &[(&str, &str)]) -> DirectoryResult<Listing> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| DirectoryError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }

    /// Walk every page of a listing endpoint and collect the entities
    pub async fn fetch_all(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> DirectoryResult<Vec<serde_json::Value>> {
        let mut entities = Vec::new();
        let mut page = 1u32;

        loop {
            let page_number = page.to_string();
            let mut page_query: Vec<(&str, &str)> =
                vec![("pageSize", PAGE_SIZE), ("pageNumber", &page_number)];
            page_query.extend_from_slice(query);

            let listing = self.get_list(path, &page_query).await?;
            debug!(path, page, count = listing.entities.len(), "fetched listing page");
            entities.extend(listing.entities);

            if page >= listing.page_count {
                break;
            }
            page += 1;
        }

        Ok(entities)
    }
}

/// Map a non-success HTTP status to the directory error taxonomy
fn status_error(status: u16, body: String) -> DirectoryError {
    match status {
        401 | 403 => DirectoryError::Auth { status },
        _ => DirectoryError::Api {
            status,
            message: extract_api_message(&body),
        },
    }
}

/// Pull the human-readable message out of a Genesys error body, falling
/// back to the raw body when it is not the usual JSON shape.
fn extract_api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}
