use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Token used when `INTERNAL_SCORER_TOKEN` is unset. Only acceptable outside production.
pub const DEFAULT_INTERNAL_TOKEN: &str = "dev-internal-token";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scoring service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("SCORER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("SCORER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let request_timeout_secs = env::var("SCORER_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let internal_token = env::var("INTERNAL_SCORER_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INTERNAL_TOKEN.to_string());
        if environment == AppEnvironment::Production && internal_token == DEFAULT_INTERNAL_TOKEN {
            return Err(ConfigError::DefaultTokenInProduction);
        }

        let log_level = env::var("SCORER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                request_timeout: Duration::from_secs(request_timeout_secs),
            },
            auth: AuthConfig { internal_token },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Shared secret expected in the `X-Internal-Token` header.
#[derive(Clone)]
pub struct AuthConfig {
    pub internal_token: String,
}

impl AuthConfig {
    pub fn uses_default_token(&self) -> bool {
        self.internal_token == DEFAULT_INTERNAL_TOKEN
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("internal_token", &"<redacted>")
            .finish()
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidTimeout,
    InvalidHost { source: std::net::AddrParseError },
    DefaultTokenInProduction,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "SCORER_PORT must be a valid u16"),
            ConfigError::InvalidTimeout => {
                write!(f, "SCORER_REQUEST_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "SCORER_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::DefaultTokenInProduction => write!(
                f,
                "INTERNAL_SCORER_TOKEN must be set to a non-default value in production"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::DefaultTokenInProduction => None,
        }
    }
}
