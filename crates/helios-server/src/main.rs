//! Helios dashboard server
//!
//! Axum-based JSON API over the reports directory. Rendering is left to
//! whatever front end consumes these endpoints.

mod handlers;
mod state;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use helios::{HeliosConfig, ReportCatalog};

use crate::handlers::{get_report, health_check, list_reports};
use crate::state::AppState;

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/reports", get(list_reports))
        .route("/api/reports/{file}", get(get_report))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load `.env` before reading `RUST_LOG`
fn log_filter(default: &str) -> EnvFilter {
    dotenvy::dotenv().ok();
    EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(log_filter("info,tower_http=debug"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = HeliosConfig::from_env()?;
    let catalog = ReportCatalog::new(config.reports_dir);

    match catalog.list().await {
        Ok(reports) => tracing::info!(
            "✓ {} report(s) in {}",
            reports.len(),
            catalog.dir().display()
        ),
        Err(e) => tracing::warn!("⚠ Cannot read {}: {}", catalog.dir().display(), e),
    }

    let app = router(AppState::new(catalog));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 Helios dashboard API running on http://{}", addr);
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  GET  /api/reports        - List reports, newest first");
    tracing::info!("  GET  /api/reports/{{file}} - Validated report view");

    axum::serve(listener, app).await?;

    Ok(())
}
