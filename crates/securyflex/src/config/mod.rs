use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub platform: PlatformConfig,
    pub finqle: FinqleConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let minimum_uurtarief_cent = env::var("PLATFORM_MINIMUM_UURTARIEF_CENT")
            .unwrap_or_else(|_| "1650".to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidMinimumRate)?;

        let webhook_secret = env::var("FINQLE_WEBHOOK_SECRET").ok().filter(|s| !s.is_empty());

        let dashboard_ttl_seconds = env::var("DASHBOARD_CACHE_TTL_SECONDS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidCacheTtl)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            platform: PlatformConfig {
                minimum_uurtarief_cent,
            },
            finqle: FinqleConfig { webhook_secret },
            cache: CacheConfig {
                dashboard_ttl_seconds,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Marketplace-wide business rules.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Floor for `uurtarief_cent` on new postings, in euro cents.
    pub minimum_uurtarief_cent: u32,
}

/// Settings for the Finqle webhook integration.
#[derive(Debug, Clone)]
pub struct FinqleConfig {
    /// Shared HMAC secret; signature checks are skipped when absent.
    pub webhook_secret: Option<String>,
}

/// Query cache tuning.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub dashboard_ttl_seconds: u64,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMinimumRate,
    InvalidCacheTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMinimumRate => {
                write!(f, "PLATFORM_MINIMUM_UURTARIEF_CENT must be a valid u32")
            }
            ConfigError::InvalidCacheTtl => {
                write!(f, "DASHBOARD_CACHE_TTL_SECONDS must be a valid u64")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
