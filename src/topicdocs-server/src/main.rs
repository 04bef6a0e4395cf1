use actix_web::{web, App, HttpServer};
use anyhow::Result;
use std::path::{Path, PathBuf};
use topicdocs_core::config::Config;
use topicdocs_server::{api, telemetry};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> Result<()> {
    let _guard = telemetry::init_telemetry(Path::new("./logs"))?;

    let mut config = Config::load("config.json").unwrap_or_else(|_| {
        tracing::warn!("Failed to load config.json, using defaults");
        Config::default()
    });
    config.apply_env_overrides();

    let content_dir = config.resolve_content_dir()?;
    if !content_dir.is_dir() {
        tracing::warn!("Content directory {} does not exist", content_dir.display());
    }

    tracing::info!("topicdocs starting");
    tracing::info!("  Content directory: {}", content_dir.display());
    tracing::info!("  Port: {}", config.port);
    tracing::info!(
        "  Search: max_results={}, snippet_length={}",
        config.search.max_results,
        config.search.snippet_length
    );
    tracing::info!(
        "  CORS: enabled={}, origins={:?}",
        config.cors.enabled,
        config.cors.allowed_origins
    );

    let frontend_dist = Some(PathBuf::from(&config.frontend_dist)).filter(|p| p.is_dir());
    match &frontend_dist {
        Some(dist) => tracing::info!("  Serving frontend from {}", dist.display()),
        None => tracing::info!("  No frontend build at {}", config.frontend_dist),
    }

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let cors_config = config.cors.clone();
    let app_state = web::Data::new(api::AppState::new(content_dir, config));

    tracing::info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        let app = App::new()
            .app_data(app_state.clone())
            .wrap(api::build_cors(&cors_config))
            .wrap(TracingLogger::default())
            .configure(api::configure);

        match &frontend_dist {
            Some(dist) => app.service(api::frontend_service(dist)),
            None => app,
        }
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}
