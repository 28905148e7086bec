/// Configuration management for Board Service
///
/// This module handles loading configuration from environment variables.
/// A `.env` file, if present, is loaded by the binary before this runs.
use std::fmt;

const DEV_JWT_SECRET: &str = "board-service-development-secret";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),

    #[error("Failed to parse {key}='{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{0}")]
    Insecure(String),
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Session token settings
    pub auth: AuthConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Number of HTTP worker threads
    pub workers: usize,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let app = AppConfig {
            env: app_env,
            host: lookup("BOARD_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or_default(&lookup, "BOARD_SERVICE_PORT", 8080)?,
            workers: parse_or_default(&lookup, "BOARD_SERVICE_WORKERS", 4)?,
        };

        let cors = {
            let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
                Some(value) => value,
                None if production => return Err(ConfigError::Missing("CORS_ALLOWED_ORIGINS")),
                None => "http://localhost:3000".to_string(),
            };

            if production && allowed_origins.trim() == "*" {
                return Err(ConfigError::Insecure(
                    "CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string(),
                ));
            }

            CorsConfig { allowed_origins }
        };

        let auth = {
            let jwt_secret = match lookup("JWT_SECRET") {
                Some(secret) => secret,
                None if production => return Err(ConfigError::Missing("JWT_SECRET")),
                None => {
                    tracing::warn!("JWT_SECRET not set; using development signing secret");
                    DEV_JWT_SECRET.to_string()
                }
            };

            if production && jwt_secret == DEV_JWT_SECRET {
                return Err(ConfigError::Insecure(
                    "JWT_SECRET must be set to a non-default value in production".to_string(),
                ));
            }

            AuthConfig {
                jwt_secret,
                cookie_secure: parse_or_default(&lookup, "COOKIE_SECURE", production)?,
            }
        };

        Ok(Config { app, cors, auth })
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_development_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.app.workers, 4);
        assert_eq!(config.cors.allowed_origins, "http://localhost:3000");
        assert_eq!(config.auth.jwt_secret, DEV_JWT_SECRET);
        assert!(!config.auth.cookie_secure);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BOARD_SERVICE_PORT", "9000"),
            ("BOARD_SERVICE_WORKERS", "2"),
            ("JWT_SECRET", "a-much-better-secret-value"),
            ("COOKIE_SECURE", "true"),
        ])
        .unwrap();

        assert_eq!(config.app.port, 9000);
        assert_eq!(config.app.workers, 2);
        assert_eq!(config.auth.jwt_secret, "a-much-better-secret-value");
        assert!(config.auth.cookie_secure);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = load(&[("BOARD_SERVICE_PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "BOARD_SERVICE_PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_production_requires_secret_and_origins() {
        let err = load(&[("APP_ENV", "production"), ("CORS_ALLOWED_ORIGINS", "https://board.dev")])
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));

        let err = load(&[("APP_ENV", "production"), ("JWT_SECRET", "prod-secret-value-123")])
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("CORS_ALLOWED_ORIGINS"));
    }

    #[test]
    fn test_production_rejects_wildcard_cors_and_dev_secret() {
        let err = load(&[
            ("APP_ENV", "production"),
            ("CORS_ALLOWED_ORIGINS", "*"),
            ("JWT_SECRET", "prod-secret-value-123"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Insecure(_)));

        let err = load(&[
            ("APP_ENV", "production"),
            ("CORS_ALLOWED_ORIGINS", "https://board.dev"),
            ("JWT_SECRET", DEV_JWT_SECRET),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Insecure(_)));
    }

    #[test]
    fn test_production_defaults_to_secure_cookies() {
        let config = load(&[
            ("APP_ENV", "production"),
            ("CORS_ALLOWED_ORIGINS", "https://board.dev"),
            ("JWT_SECRET", "prod-secret-value-123"),
        ])
        .unwrap();

        assert!(config.app.is_production());
        assert!(config.auth.cookie_secure);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = load(&[("JWT_SECRET", "super-secret-do-not-print")]).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-do-not-print"));
    }
}
