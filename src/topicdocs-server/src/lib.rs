//! topicdocs - a markdown topic browser backend
//!
//! This crate provides both a library and binary for serving a directory
//! tree of markdown topics over HTTP.
//!
//! # Embedded Usage
//!
//! ```rust,no_run
//! use actix_web::{App, HttpServer};
//! use topicdocs_core::Config;
//! use topicdocs_server::api;
//!
//! #[actix_web::main]
//! async fn main() -> anyhow::Result<()> {
//!     let state = actix_web::web::Data::new(api::AppState::new("./content", Config::default()));
//!     HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
//!         .bind("127.0.0.1:8080")?
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Server Usage
//!
//! Run the binary to start the REST API server:
//! ```bash
//! CONTENT_DIR=./content topicdocs-server
//! ```

pub use topicdocs_core;

pub mod api;
pub mod telemetry;
