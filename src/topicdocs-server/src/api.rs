use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use topicdocs_core::config::{Config, CorsConfig};
use topicdocs_core::content::{ContentError, ContentStore};
use topicdocs_core::models::{ErrorResponse, SearchParams};
use topicdocs_core::search::TopicSearcher;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub searcher: Arc<TopicSearcher>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(content_root: impl Into<PathBuf>, config: Config) -> Self {
        let store = ContentStore::new(content_root);
        let searcher = TopicSearcher::new(store.clone(), &config.search);
        Self {
            store,
            searcher: Arc::new(searcher),
            config: Arc::new(config),
        }
    }
}

/// Errors surfaced by the topic endpoints
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to read topics")]
    ListFailed(#[source] ContentError),

    #[error("Topic not found")]
    TopicNotFound,

    #[error("Failed to read topic")]
    TopicFailed(#[source] ContentError),

    #[error("Internal error")]
    Blocking(#[from] actix_web::error::BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::TopicNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Details stay in the logs; they carry filesystem paths
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            message: None,
        })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
}

/// List top-level topics
/// GET /api/topics
#[tracing::instrument(skip(state))]
pub async fn list_topics(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let store = state.store.clone();
    let topics = web::block(move || store.list_topics())
        .await?
        .map_err(|e| {
            tracing::error!("Failed to list topics: {}", e);
            ApiError::ListFailed(e)
        })?;

    tracing::debug!(count = topics.len(), "Listed topics");
    Ok(HttpResponse::Ok().json(topics))
}

/// Get a topic by path; an empty path lists the top-level topics
/// GET /api/topics/{path:.*}
#[tracing::instrument(skip(path, state))]
pub async fn get_topic(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let topic_path = path.into_inner();
    if topic_path.trim_matches('/').is_empty() {
        return list_topics(state).await;
    }
    tracing::debug!(path = %topic_path, "Getting topic");

    let store = state.store.clone();
    let lookup = topic_path.clone();
    let detail = web::block(move || store.get_topic(&lookup))
        .await?
        .map_err(|e| match e {
            ContentError::NotFound(_) => {
                tracing::debug!(path = %topic_path, "Topic not found");
                ApiError::TopicNotFound
            }
            other => {
                tracing::error!(path = %topic_path, "Failed to read topic: {}", other);
                ApiError::TopicFailed(other)
            }
        })?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Recursive full-text search
/// GET /api/search?q={query}&scope={scope}
#[tracing::instrument(skip(params, state))]
pub async fn search(
    params: web::Query<SearchParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let SearchParams { q, scope } = params.into_inner();
    tracing::debug!(
        query_len = q.len(),
        scope = scope.as_deref().unwrap_or(""),
        "Searching topics"
    );

    let searcher = state.searcher.clone();
    let results = web::block(move || searcher.search(&q, scope.as_deref())).await?;

    Ok(HttpResponse::Ok().json(results))
}

/// Health check
/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/topics", web::get().to(list_topics))
            .route("/topics/{path:.*}", web::get().to(get_topic))
            .route("/search", web::get().to(search)),
    )
    .route("/health", web::get().to(health));
}

/// CORS policy for the API. Disabled CORS falls back to actix-cors' restrictive default.
pub fn build_cors(cors_config: &CorsConfig) -> Cors {
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default();
    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods(vec!["GET"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

/// Serve the built frontend, falling back to `index.html` for client-side routes
pub fn frontend_service(dist: &Path) -> Files {
    let index = dist.join("index.html");

    Files::new("/", dist)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(index).await?;
                let res = file.into_response(&req);
                Ok::<_, actix_web::Error>(ServiceResponse::new(req, res))
            }
        }))
}
