use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_import::api::router;
use course_import::client::CourseApiHttpClient;
use course_import::config::{CourseApiConfig, ServerConfig};
use course_import::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_import=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = CourseApiConfig::new_from_env()?;
    let server_config = ServerConfig::new_from_env()?;

    info!("forwarding imports to {}", api_config.base_url);
    let api = Arc::new(CourseApiHttpClient::new(api_config)?);
    let state = AppState::new(api, server_config.allocation_timeout);

    let app = router(state);

    info!("listening on http://{}", server_config.bind_addr);
    let listener = tokio::net::TcpListener::bind(server_config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
