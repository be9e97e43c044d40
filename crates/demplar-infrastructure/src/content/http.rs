//! HTTP client for the content store query API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use demplar_core::character::Character;
use demplar_core::config::{CatalogConfig, ContentConfig};
use demplar_core::content::ContentSource;
use demplar_core::news::NewsEntry;
use demplar_core::{DemplarError, Result};

use super::queries::{CHARACTERS_QUERY, NEWS_QUERY};
use crate::dto::{CharacterRecord, NewsRecord, RecordMapper};

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    #[serde(default = "Vec::new")]
    result: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Reads characters and news from the hosted content store.
pub struct HttpContentSource {
    client: Client,
    endpoint: String,
    token: Option<String>,
    mapper: RecordMapper,
}

impl HttpContentSource {
    /// Builds a client for the configured project.
    ///
    /// Fails with a configuration error when no project id is set.
    pub fn new(content: &ContentConfig, catalog: &CatalogConfig) -> Result<Self> {
        if !content.has_remote() {
            return Err(DemplarError::config(
                "content.project_id is not set; run `demplar config init` or set DEMPLAR_PROJECT_ID",
            ));
        }

        Ok(Self {
            client: Client::new(),
            endpoint: query_endpoint(content),
            token: content.token.clone().filter(|t| !t.trim().is_empty()),
            mapper: RecordMapper::new(catalog.npc_character_ids.iter().cloned()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query<T: DeserializeOwned>(&self, query: &str) -> Result<Vec<T>> {
        let mut request = self.client.get(&self.endpoint).query(&[("query", query)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| DemplarError::remote(format!("Content request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: QueryResponse<T> = response
            .json()
            .await
            .map_err(|err| DemplarError::remote(format!("Failed to parse content response: {err}")))?;
        Ok(parsed.result)
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_characters(&self) -> Result<Vec<Character>> {
        let records: Vec<CharacterRecord> = self.query(CHARACTERS_QUERY).await?;
        tracing::debug!("Fetched {} character records", records.len());
        Ok(self.mapper.characters(records))
    }

    async fn fetch_news(&self) -> Result<Vec<NewsEntry>> {
        let records: Vec<NewsRecord> = self.query(NEWS_QUERY).await?;
        tracing::debug!("Fetched {} news records", records.len());
        Ok(records.into_iter().map(NewsRecord::into_entry).collect())
    }
}

/// `https://<project>.(apicdn|api).sanity.io/v<version>/data/query/<dataset>`
fn query_endpoint(content: &ContentConfig) -> String {
    let host = if content.use_cdn { "apicdn" } else { "api" };
    let version = content.api_version.trim_start_matches('v');
    format!(
        "https://{}.{}.sanity.io/v{}/data/query/{}",
        content.project_id.trim(),
        host,
        version,
        content.dataset
    )
}

fn map_http_error(status: StatusCode, body: &str) -> DemplarError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.description.or(wrapper.error.message))
        .unwrap_or_else(|| body.to_string());
    DemplarError::remote(format!("Content store returned {}: {}", status.as_u16(), message))
}
