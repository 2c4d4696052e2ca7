/**
 * Server Configuration
 *
 * Startup configuration is resolved once into a `ServerConfig` and handed to
 * `bootstrap`. Nothing below reads the environment after that point.
 *
 * # Configuration Sources
 *
 * `ServerConfig::from_env` reads process environment variables (after
 * `.env` has been loaded). `ServerConfig::from_lookup` takes any lookup
 * function so the same parsing can run against a fixed map.
 *
 * | Variable | Default |
 * |---|---|
 * | `PORT` | `5000` |
 * | `APP_ENV` | `development` |
 * | `DATABASE_URL` | required |
 * | `STREAM_API_KEY` | required |
 * | `STREAM_API_SECRET` | required |
 * | `JWT_SECRET_KEY` | required |
 * | `FRONTEND_DIR` | `../frontend/dist` |
 * | `CORS_ORIGINS` | local dev server and the hosted frontend |
 * | `SERVE_FRONTEND` | on in production |
 * | `WARMUP_SYNC` | on outside production |
 */

use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::backend::stream::StreamCredentials;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FRONTEND_DIR: &str = "../frontend/dist";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "http://localhost:5173",
    "https://stellar-chat-and-collab-app.onrender.com",
];

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    MissingValue(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Deployment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Production,
    Development,
}

impl RunMode {
    /// Anything other than `production` is treated as development
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            RunMode::Production
        } else {
            RunMode::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == RunMode::Production
    }
}

/// Everything `bootstrap` needs to start the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub mode: RunMode,
    /// Serve the prebuilt frontend bundle with an SPA fallback
    pub serves_frontend: bool,
    /// Run one directory sync before listening
    pub runs_warmup_sync: bool,
    pub database_url: String,
    pub stream: StreamCredentials,
    /// Session token signing secret
    pub jwt_secret: String,
    pub frontend_dir: PathBuf,
    /// CORS allow-list
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Create a config with mode-derived defaults
    ///
    /// Production serves the frontend and skips the warm-up sync;
    /// development does the opposite.
    pub fn new(
        mode: RunMode,
        database_url: impl Into<String>,
        stream: StreamCredentials,
        jwt_secret: impl Into<String>,
    ) -> Self {
        Self {
            port: DEFAULT_PORT,
            mode,
            serves_frontend: mode.is_production(),
            runs_warmup_sync: !mode.is_production(),
            database_url: database_url.into(),
            stream,
            jwt_secret: jwt_secret.into(),
            frontend_dir: PathBuf::from(DEFAULT_FRONTEND_DIR),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_frontend_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.frontend_dir = dir.into();
        self
    }

    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn serving_frontend(mut self, enabled: bool) -> Self {
        self.serves_frontend = enabled;
        self
    }

    pub fn with_warmup_sync(mut self, enabled: bool) -> Self {
        self.runs_warmup_sync = enabled;
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::MissingValue(name));

        let mode = get("APP_ENV")
            .map(|v| RunMode::parse(&v))
            .unwrap_or(RunMode::Development);

        let stream = StreamCredentials::new(
            required("STREAM_API_KEY")?,
            required("STREAM_API_SECRET")?,
        );

        let mut config = Self::new(
            mode,
            required("DATABASE_URL")?,
            stream,
            required("JWT_SECRET_KEY")?,
        );

        if let Some(port) = get("PORT") {
            let port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port.clone(),
            })?;
            config = config.with_port(port);
        }

        if let Some(dir) = get("FRONTEND_DIR") {
            config = config.with_frontend_dir(dir);
        }

        if let Some(origins) = get("CORS_ORIGINS") {
            config = config.with_allowed_origins(parse_origins(&origins)?);
        }

        if let Some(value) = get("SERVE_FRONTEND") {
            config = config.serving_frontend(parse_flag("SERVE_FRONTEND", &value)?);
        }

        if let Some(value) = get("WARMUP_SYNC") {
            config = config.with_warmup_sync(parse_flag("WARMUP_SYNC", &value)?);
        }

        Ok(config)
    }
}

/// What the one-shot `sync-stream-users` binary needs
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub database_url: String,
    pub stream: StreamCredentials,
}

impl SyncConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads `DATABASE_URL`, `STREAM_API_KEY` and `STREAM_API_SECRET` only
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingValue(name))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            stream: StreamCredentials::new(
                required("STREAM_API_KEY")?,
                required("STREAM_API_SECRET")?,
            ),
        })
    }
}

/// Split a comma-separated allow-list
///
/// Credentialed CORS needs explicit origins, so `*` is rejected along with
/// anything that cannot be sent as a header value.
fn parse_origins(value: &str) -> Result<Vec<String>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|origin| {
            if origin == "*" || HeaderValue::from_str(origin).is_err() {
                Err(ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    value: origin.to_string(),
                })
            } else {
                Ok(origin.to_string())
            }
        })
        .collect()
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mut env: HashMap<String, String> = [
            ("DATABASE_URL", "postgres://localhost/stellar"),
            ("STREAM_API_KEY", "key"),
            ("STREAM_API_SECRET", "secret"),
            ("JWT_SECRET_KEY", "jwt-secret"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in pairs {
            env.insert(k.to_string(), v.to_string());
        }
        move |name: &str| env.get(name).cloned()
    }

    #[test]
    fn test_development_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.mode, RunMode::Development);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.serves_frontend);
        assert!(config.runs_warmup_sync);
        assert_eq!(config.frontend_dir, PathBuf::from(DEFAULT_FRONTEND_DIR));
        assert_eq!(config.allowed_origins, DEFAULT_ALLOWED_ORIGINS.to_vec());
        assert_eq!(config.stream, StreamCredentials::new("key", "secret"));
    }

    #[test]
    fn test_production_serves_frontend_without_sync() {
        let config = ServerConfig::from_lookup(lookup(&[("APP_ENV", "production")])).unwrap();

        assert_eq!(config.mode, RunMode::Production);
        assert!(config.serves_frontend);
        assert!(!config.runs_warmup_sync);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("FRONTEND_DIR", "/srv/app"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("SERVE_FRONTEND", "true"),
            ("WARMUP_SYNC", "0"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.frontend_dir, PathBuf::from("/srv/app"));
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(config.serves_frontend);
        assert!(!config.runs_warmup_sync);
    }

    #[test]
    fn test_missing_required_value() {
        let err = ServerConfig::from_lookup(lookup(&[("STREAM_API_SECRET", "")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingValue("STREAM_API_SECRET"));
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_flag() {
        let err = ServerConfig::from_lookup(lookup(&[("WARMUP_SYNC", "sometimes")])).unwrap_err();
        assert_matches::assert_matches!(err, ConfigError::Invalid { name: "WARMUP_SYNC", .. });
    }

    #[test]
    fn test_wildcard_origin_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("CORS_ORIGINS", "*")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "CORS_ORIGINS",
                value: "*".to_string()
            }
        );
    }

    #[test]
    fn test_origin_that_is_not_a_header_value_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[(
            "CORS_ORIGINS",
            "https://ok.example,https://bad\u{7f}.example",
        )]))
        .unwrap_err();
        assert_matches::assert_matches!(err, ConfigError::Invalid { name: "CORS_ORIGINS", .. });
    }

    #[test]
    fn test_sync_config_needs_no_session_secret() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "postgres://localhost/stellar"),
            ("STREAM_API_KEY", "key"),
            ("STREAM_API_SECRET", "secret"),
        ]
        .into_iter()
        .collect();

        let config = SyncConfig::from_lookup(|name: &str| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/stellar");
        assert_eq!(config.stream, StreamCredentials::new("key", "secret"));
    }

    #[test]
    fn test_sync_config_requires_stream_credentials() {
        let err = SyncConfig::from_lookup(|name: &str| {
            (name == "DATABASE_URL").then(|| "postgres://localhost/stellar".to_string())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingValue("STREAM_API_KEY"));
    }

    #[test]
    fn test_run_mode_parse() {
        assert_eq!(RunMode::parse("production"), RunMode::Production);
        assert_eq!(RunMode::parse(" Production "), RunMode::Production);
        assert_eq!(RunMode::parse("staging"), RunMode::Development);
    }
}
