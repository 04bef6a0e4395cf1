//! topicdocs Core Library
//!
//! This crate provides the shared pieces of topicdocs, including:
//! - Wire models for topics, breadcrumbs and search hits
//! - Configuration loading
//! - Front matter parsing and markdown rendering
//! - Reading the content tree
//! - Recursive full-text search

pub mod config;
pub mod content;
pub mod frontmatter;
pub mod models;
pub mod search;

// Re-export commonly used types
pub use config::Config;
pub use content::{ContentError, ContentStore};
pub use frontmatter::FrontMatter;
pub use models::*;
pub use search::TopicSearcher;
