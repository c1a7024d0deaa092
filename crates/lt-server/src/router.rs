//! Axum router construction.
//!
//! Builds the full application router with the API routes, middleware
//! layers, and static file serving.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::middleware::request_id::tag_request;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Path parameters are percent-decoded exactly once by the extractor.
    let api = Router::new()
        .route("/courses", get(routes::courses::list_courses))
        .route(
            "/video/{course}/{module}/{filename}",
            get(routes::stream::stream_video),
        )
        .route(
            "/subtitles/{course}/{module}/{filename}",
            get(routes::subtitles::get_subtitle),
        )
        .fallback(routes::api_not_found);

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api)
        .layer(middleware::from_fn(tag_request))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Static file serving for the frontend build. Unknown paths get
    // `index.html` with 200 so client-side routes resolve.
    if let Some(dir) = static_dir {
        if dir.is_dir() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                tower_http::services::ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .fallback(tower_http::services::ServeFile::new(index_path)),
            );
        }
    }

    app
}
