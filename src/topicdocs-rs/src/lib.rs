//! topicdocs Client Library
//!
//! HTTP client for the topicdocs REST API: list topics, fetch a topic and
//! search.

mod client;

pub use client::Client;
pub use topicdocs_core::{Breadcrumb, SearchResult, TopicDetail, TopicSummary};

/// The API operation a request was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListTopics,
    GetTopic,
    Search,
}

impl Operation {
    /// Fixed message reported when the server answers with a non-2xx status
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListTopics => "Failed to fetch topics",
            Operation::GetTopic => "Failed to fetch topic",
            Operation::Search => "Failed to search",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status
    #[error("{}", .0.failure_message())]
    RequestFailed(Operation),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
