use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, State},
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::client::{ChatClient, PlaceBackend};
use crate::config::AppConfig;
use crate::frontend::{Outcome, QueryFrontEnd};
use crate::render;

/// Form bodies are a single text field.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// Build the application router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/ask", post(ask_handler))
        .nest_service("/static", ServeDir::new(&state.config.server.static_dir))
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let client = ChatClient::new(&config.backend.base_url)?;
    info!(
        name: "backend.config.loaded",
        endpoint = %client.endpoint(),
        "Chat backend configured"
    );

    let backend: Arc<dyn PlaceBackend> = Arc::new(client);
    let state = AppState {
        frontend: QueryFrontEnd::new(backend),
        config: Arc::clone(&config),
    };

    let app = router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Body of the query form.
#[derive(Debug, Deserialize)]
struct AskForm {
    /// Raw query text as typed.
    #[serde(default)]
    q: String,
}

/// GET / - Empty query page.
async fn index_handler() -> impl IntoResponse {
    Html(render::page("", &Outcome::Idle))
}

/// POST /ask - Submit a query.
///
/// HTMX requests get only the results fragment; plain form posts get the
/// whole page with the input kept.
async fn ask_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AskForm>,
) -> impl IntoResponse {
    let outcome = state.frontend.submit(&form.q).await;

    if headers.contains_key("hx-request") {
        Html(render::results(&outcome))
    } else {
        Html(render::page(&form.q, &outcome))
    }
}
