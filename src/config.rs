use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::client::chat_endpoint;

/// Default chat backend when neither `BACKEND_URL` nor a config file sets one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8091";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Base URL of the chat backend (`/chat` is appended)
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Directory served under /static
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Backend host, without the `/chat` suffix and without trailing slashes.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

/// Formatter used for log output.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Load configuration. Precedence, lowest first: defaults, YAML file,
    /// `GEOCHAT_*` environment variables, CLI flags (and their env fallbacks).
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 8501)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.static_dir", "static")?
            .set_default("backend.base_url", DEFAULT_BACKEND_URL)?
            .set_default("log.format", "compact")?;

        // Explicit file must exist; ./config.yaml is picked up only if present.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::from(Path::new(path)).required(true));
        } else if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::from(Path::new("config.yaml")));
        }

        // E.g. GEOCHAT_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("GEOCHAT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(dir) = cli.static_dir {
            builder = builder.set_override("server.static_dir", dir)?;
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.backend.base_url = cfg.backend.base_url.trim_end_matches('/').to_string();
        Ok(cfg)
    }

    /// `{backend.base_url}/chat`.
    #[must_use]
    pub fn chat_endpoint(&self) -> String {
        chat_endpoint(&self.backend.base_url)
    }

    /// `host:port` to bind the listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
