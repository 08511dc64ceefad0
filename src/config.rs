use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Database connection URL
    #[arg(long, env = "TIMECLOCK_DATABASE_URL")]
    pub database_url: String,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub cors: CorsConfig,

    #[command(flatten)]
    pub auth: AuthConfig,

    #[command(flatten)]
    pub rate_limit: RateLimitConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "TIMECLOCK_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "TIMECLOCK_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Per-request timeout budget in seconds
    #[arg(long, env = "TIMECLOCK_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Maximum number of pooled connections
    #[arg(long, env = "TIMECLOCK_DB_MAX_CONNECTIONS", default_value_t = 20)]
    pub max_connections: u32,

    /// Upper bound on waiting for a connection from the pool, in seconds
    #[arg(long, env = "TIMECLOCK_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 10)]
    pub acquire_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct CorsConfig {
    /// Origin allowed to call the API ("*" for any)
    #[arg(long, env = "TIMECLOCK_ALLOWED_ORIGIN", default_value = "*")]
    pub allowed_origin: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthConfig {
    /// Shared secret gating administrative user creation.
    /// When unset, /createUser is disabled rather than open.
    #[arg(long, env = "TIMECLOCK_SETUP_TOKEN")]
    pub setup_token: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct RateLimitConfig {
    /// Requests per second allowed for standard endpoints
    #[arg(long, env = "TIMECLOCK_RATE_LIMIT_PER_SECOND", default_value_t = 10)]
    pub per_second: u32,

    /// Burst allowance for standard endpoints
    #[arg(long, env = "TIMECLOCK_RATE_LIMIT_BURST", default_value_t = 20)]
    pub burst: u32,

    /// Stricter rate limit for credential endpoints (login, createUser)
    #[arg(long, env = "TIMECLOCK_AUTH_RATE_LIMIT_PER_SECOND", default_value_t = 1)]
    pub auth_per_second: u32,

    /// Burst allowance for credential endpoints
    #[arg(long, env = "TIMECLOCK_AUTH_RATE_LIMIT_BURST", default_value_t = 3)]
    pub auth_burst: u32,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "TIMECLOCK_LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
