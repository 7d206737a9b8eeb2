pub mod handlers;
pub mod types;

pub use handlers::AppState;

use crate::{Result, config::Config, feedback::FeedbackService, llm::OpenAiClient};
use axum::{Router, routing::post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub const FEEDBACK_ROUTE: &str = "/api/llm/feedback";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(FEEDBACK_ROUTE, post(handlers::feedback))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let llm_client = OpenAiClient::new(config.llm.clone())?;
    info!(
        "Using model '{}' at {}",
        llm_client.model(),
        config.llm.base_url
    );

    let app_state = AppState {
        feedback: Arc::new(FeedbackService::new(
            Arc::new(llm_client),
            config.llm.sampling,
        )),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Feedback server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
