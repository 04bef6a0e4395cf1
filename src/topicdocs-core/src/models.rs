use serde::{Deserialize, Serialize};

/// TopicSummary is one entry of a topic listing (a directory or a markdown file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_dir: bool,
}

/// Breadcrumb is one step of the trail from the content root to a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub path: String,
}

/// TopicDetail is a fully rendered topic page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDetail {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content_html: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<TopicSummary>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// SearchResult is a single search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// SearchParams are the query parameters of `GET /api/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// ErrorResponse represents an API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Servers written against the same shape emit `null` for empty lists.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
