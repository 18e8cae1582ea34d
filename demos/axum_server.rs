//! Serves a single `/api` endpoint behind the CORS layer.
//!
//! ```text
//! cargo run --example axum_server -- path/to/cors.toml
//! ```
//!
//! Without a path the API preset allowing `http://localhost:*` is used.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::post};
use edge_cors::{Cors, CorsLayer, CorsOptions};
use tracing_subscriber::EnvFilter;

async fn query(body: String) -> String {
    format!("{{\"received\":{}}}", body.len())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("edge_cors=debug")),
        )
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => CorsOptions::from_toml_file(path)?,
        None => CorsOptions::api(["http://localhost:*"]),
    };
    let cors = Arc::new(Cors::new(options));
    tracing::info!(?cors, "CORS policy compiled");

    let app = Router::new()
        .route("/api", post(query))
        .layer(CorsLayer::from_shared(cors));

    let addr: SocketAddr = "127.0.0.1:5001".parse()?;
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
