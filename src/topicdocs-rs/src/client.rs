use crate::{ClientError, Operation, Result};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use topicdocs_core::{SearchResult, TopicDetail, TopicSummary};

/// topicdocs REST API Client
///
/// Every call issues exactly one GET. Nothing is cached, retried or
/// cancelled, and no timeout is set beyond what the HTTP client carries.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    client: HttpClient,
}

impl Client {
    /// Create a new client connected to the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, HttpClient::new())
    }

    /// Create a client on top of a preconfigured `reqwest::Client`
    pub fn with_http_client(base_url: impl Into<String>, client: HttpClient) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List top-level topics
    pub async fn list_topics(&self) -> Result<Vec<TopicSummary>> {
        let url = format!("{}/api/topics", self.base_url);
        self.fetch(Operation::ListTopics, self.client.get(&url)).await
    }

    /// Get a topic by path.
    ///
    /// `path` is appended to the URL as given; encoding path segments is the
    /// caller's job.
    pub async fn get_topic(&self, path: impl AsRef<str>) -> Result<TopicDetail> {
        let url = format!("{}/api/topics/{}", self.base_url, path.as_ref());
        self.fetch(Operation::GetTopic, self.client.get(&url)).await
    }

    /// Search topics, optionally restricted to a sub-tree.
    ///
    /// An empty or absent `scope` is left out of the query string entirely.
    pub async fn search_topics(
        &self,
        query: &str,
        scope: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let url = format!("{}/api/search", self.base_url);

        let mut request = self.client.get(&url).query(&[("q", query)]);
        if let Some(scope) = scope.filter(|s| !s.is_empty()) {
            request = request.query(&[("scope", scope)]);
        }

        self.fetch(Operation::Search, request).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(?operation, url = %response.url(), %status, "topicdocs response");

        if !status.is_success() {
            tracing::debug!(?operation, %status, "topicdocs request failed");
            return Err(ClientError::RequestFailed(operation));
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }
}
