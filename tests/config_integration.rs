use geochat::config::{AppConfig, DEFAULT_BACKEND_URL, LogFormat};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("GEOCHAT_SERVER__PORT");
        env::remove_var("GEOCHAT_BACKEND__BASE_URL");
        env::remove_var("GEOCHAT_LOG__FORMAT");
        env::remove_var("BACKEND_URL");
        env::remove_var("PORT");
        env::remove_var("HOST");
        env::remove_var("STATIC_DIR");
        env::remove_var("CONFIG_FILE");
    }
}

fn load(args: &[&str]) -> AppConfig {
    let argv = std::iter::once("geochat").chain(args.iter().copied());
    AppConfig::load_from_args(argv).expect("Failed to load config")
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = load(&[]);
    assert_eq!(config.server.port, 8501);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.static_dir, "static");
    assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
    assert_eq!(config.log.format, LogFormat::Compact);
    assert_eq!(config.chat_endpoint(), "http://localhost:8091/chat");
}

#[test]
#[serial]
fn test_backend_url_env_strips_trailing_slash() {
    clear_env_vars();
    unsafe {
        env::set_var("BACKEND_URL", "http://geo-backend:9000/");
    }

    let config = load(&[]);
    assert_eq!(config.backend.base_url, "http://geo-backend:9000");
    assert_eq!(config.chat_endpoint(), "http://geo-backend:9000/chat");

    clear_env_vars();
}

#[test]
#[serial]
fn test_host_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("HOST", "127.0.0.1");
    }

    let config = load(&[]);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.bind_address(), "127.0.0.1:8501");

    clear_env_vars();
}

#[test]
#[serial]
fn test_prefixed_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("GEOCHAT_SERVER__PORT", "9090");
        env::set_var("GEOCHAT_LOG__FORMAT", "json");
    }

    let config = load(&[]);
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.log.format, LogFormat::Json);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_flags_win_over_env() {
    clear_env_vars();
    unsafe {
        env::set_var("GEOCHAT_SERVER__PORT", "9090");
        env::set_var("BACKEND_URL", "http://from-env:8091");
    }

    let config = load(&[
        "--port",
        "7000",
        "--host",
        "127.0.0.1",
        "--backend-url",
        "http://from-cli:8091//",
    ]);
    assert_eq!(config.bind_address(), "127.0.0.1:7000");
    assert_eq!(config.backend.base_url, "http://from-cli:8091");

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    write!(
        file,
        r#"
server:
  port: 7070
backend:
  base_url: "http://file-backend:8091/"
"#
    )
    .expect("Failed to write temp config");

    let path = file.path().to_str().unwrap().to_string();
    let config = load(&["--config", &path]);
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.backend.base_url, "http://file-backend:8091");
    // Untouched keys keep their defaults
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let res = AppConfig::load_from_args(["geochat", "--config", "does-not-exist.yaml"]);
    assert!(res.is_err());
}

#[test]
#[serial]
fn test_cwd_config_fallback() {
    clear_env_vars();

    // Create ./config.yaml
    let config_content = r#"
server:
  port: 6060
    "#;
    let cwd_path = "config.yaml";
    fs::write(cwd_path, config_content).expect("Failed to write ./config.yaml");

    let config = AppConfig::load_from_args(["geochat"]);

    fs::remove_file(cwd_path).unwrap();

    assert_eq!(config.expect("Failed to load config").server.port, 6060);
}
