//! This file defines the floodcast binary entry point.

use floodcast::app;
use floodcast::app_state::AppState;
use floodcast::cli;
use floodcast::metrics;
use floodcast::server;
use floodcast::tracing::init_tracing;

use std::sync::Arc;
use tracing::{event, Level};

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    init_tracing();
    metrics::register_metrics();
    let state = Arc::new(AppState::new(&args));
    // An initial load failure is not fatal: the server starts with empty
    // collections and a later refresh can recover.
    if let Err(err) = state.query.reload() {
        event!(Level::WARN, "initial data load failed: {}", err);
    }
    let service = app::service(state);
    server::serve(&args, service).await;
}
