//! HTTP server - request routing over the value store
//!
//! The handlers own all request/response translation and input validation;
//! the store behind [`AppState`] is reached only through the
//! [`ValueStore`](crate::store::ValueStore) trait, so the in-memory and
//! SQLite backends are interchangeable here.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::store::ValueStore;

pub mod routes;

/// Server state
pub struct AppState {
    pub store: Arc<dyn ValueStore>,
}

/// Build the router; separate from [`start_server`] so tests can drive it.
pub fn app(store: Arc<dyn ValueStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/strings", post(routes::create_string))
        .route("/strings", get(routes::list_strings))
        .route(
            "/strings/filter-by-natural-language",
            get(routes::natural_filter),
        )
        .route("/strings/{value}", get(routes::get_string))
        .route("/strings/{value}", delete(routes::delete_string))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, store: Arc<dyn ValueStore>) -> anyhow::Result<()> {
    let app = app(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
