// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use dashboard_navigation::application::presenter::Translator;
use dashboard_navigation::infrastructure::config::{load_navigation_config, load_service_config};
use dashboard_navigation::infrastructure::hierarchy_client::HttpHierarchyRepository;
use dashboard_navigation::infrastructure::translations::StaticTranslator;
use dashboard_navigation::presentation::app_state::AppState;
use dashboard_navigation::presentation::handlers::{
    check_actionable, drilldown_paths, drilldown_state, get_jtd_config, health_check, jump_actions,
    matching_targets,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let service_config = load_service_config()?;
    let navigation = load_navigation_config(&service_config.server.navigation_file)?;
    let translator = Arc::new(StaticTranslator::new());
    let widgets = navigation
        .resolve()
        .map_err(|e| anyhow::anyhow!("{} ({})", translator.translate(e.translation_key()), e))?;
    tracing::info!("Loaded navigation settings for {} widgets", widgets.len());

    // Create repository (infrastructure layer)
    let hierarchy_repository = Arc::new(HttpHierarchyRepository::new(&service_config.hierarchy)?);

    // Create application state
    let state = Arc::new(AppState {
        widgets,
        hierarchy_repository,
        translator,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/widgets/:oid/jtd", get(get_jtd_config))
        .route("/widgets/:oid/jtd/actionable", post(check_actionable))
        .route("/widgets/:oid/jtd/targets", post(matching_targets))
        .route("/widgets/:oid/jtd/actions", post(jump_actions))
        .route("/drilldown/state", post(drilldown_state))
        .route("/drilldown/paths", post(drilldown_paths))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state);

    // Start server
    let addr: SocketAddr = service_config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {}", service_config.server.bind_address))?;
    tracing::info!("Starting dashboard-navigation service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
