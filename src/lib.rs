//! GeoChatBot front-end
//!
//! A single-page web front-end that forwards a free-text place query to a
//! chat backend and renders the answer, a key-facts table, nearby cities and
//! a map.
//!
//! # Architecture
//!
//! - **Server**: Axum-based HTTP server rendering HTML, HTMX-aware
//! - **Client**: one `POST {backend}/chat` per submission, no retries
//! - **Rendering**: server-side HTML with local scripts only
//!
//! # Modules
//!
//! - [`config`]: CLI, environment and file configuration
//! - [`client`]: chat backend trait and HTTP client
//! - [`frontend`]: the submit operation
//! - [`place`]: query and response entities
//! - [`render`]: view model and HTML

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::unused_async)]

pub mod client;
pub mod config;
pub mod error;
pub mod frontend;
pub mod place;
pub mod render;
pub mod server;
pub mod telemetry;

use crate::config::AppConfig;

use frontend::QueryFrontEnd;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Submits queries to the chat backend.
    pub frontend: QueryFrontEnd,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
