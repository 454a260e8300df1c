//! GeoChatBot server
//!
//! Entry point for the query front-end.

use std::sync::Arc;

use dotenvy::dotenv;
use mimalloc::MiMalloc;

use geochat::config::AppConfig;
use geochat::{server, telemetry};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    // Load .env (if present)
    let _ = dotenv();

    let config = match AppConfig::load() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init(config.log.format);

    if let Err(e) = server::start_server(config).await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
