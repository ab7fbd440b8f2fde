mod agent;
mod models;
mod parser;
mod tools;

use anyhow::Result;
use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use models::{AskReply, ResearchQuery};
use tower_http::cors::CorsLayer;
use tracing::{error, info, instrument};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("research_agent_server=debug")
        .init();

    let app = Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Research agent server running on http://0.0.0.0:3000");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

/// Logical failures share the 200 status with successes; the envelope's
/// `success` flag is the only discriminator.
#[instrument(skip(req))]
async fn ask(Json(req): Json<ResearchQuery>) -> Json<AskReply> {
    let request_id = Uuid::new_v4().to_string();
    let start = std::time::Instant::now();
    info!("Handling research query {}", request_id);

    let reply = match agent::run_research(&req.query).await {
        Ok(output) => reply_from_output(&output),
        Err(e) => {
            error!("Agent invocation {} failed: {}", request_id, e);
            AskReply::failure(e.to_string())
        }
    };

    info!("Query {} finished in {:?}", request_id, start.elapsed());
    Json(reply)
}

fn reply_from_output(output: &str) -> AskReply {
    if output.is_empty() {
        return AskReply::failure("Empty response.");
    }
    match parser::parse_research_response(output) {
        Ok(parsed) => AskReply::success(parsed),
        Err(e) => AskReply::failure(e.to_string()),
    }
}
