//! HTTP server: configuration, shared context, DAOs and route handlers.
use std::sync::Arc;

use axum::extract::Extension;
use color_eyre::Result;
use http::Method;

mod config;
mod context;
mod dao;
mod error;
mod handler;

pub use config::Config;
pub use context::Context;
pub use dao::{DeleteOutcome, TuitDao, UpdateOutcome, UserDao};
pub use error::{ApiError, ApiResult};
pub use handler::router;


/// Serve the API with the given config until the server is stopped.
///
/// # Errors
/// Fails if the bind address is taken or the database is unreachable.
pub async fn serve_with_config(config: Config) -> Result<()> {
    let config = Arc::new(config);
    tracing::debug!(config = ?config);

    let server = axum::Server::bind(&config.bind);
    let ctx = Context::new(config).await?;

    let cors_layer = tower_http::cors::CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
        // Credentials are passed in request bodies, never in cookies
        .allow_credentials(false)
        // Allow requests from any origin
        .allow_origin(tower_http::cors::Any);

    let trace_layer = tower_http::trace::TraceLayer::new_for_http();

    let app = router()
        .layer(Extension(ctx))
        .layer(cors_layer)
        .layer(trace_layer)
        .into_make_service();

    tracing::info!("Server starting");

    server.serve(app).await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Serve the API with config taken from `TUITER_*` environment variables.
///
/// # Errors
/// See [`serve_with_config`].
pub async fn serve() -> Result<()> {
    serve_with_config(Config::from_env()?).await
}
