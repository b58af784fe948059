/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, REDIS_URL, JWT_SECRET, CORS 許可など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// HS256 secrets shorter than this are rejected at startup.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub public_base_url: Url,

    pub request_timeout_seconds: u64,
    pub body_limit_bytes: usize,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub jwt_secret: String,
    pub access_token_ttl_seconds: u64,
    pub verify_token_ttl_seconds: u64,
    pub access_token_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env_parse("PORT").unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let database_max_connections = env_parse("DATABASE_MAX_CONNECTIONS").unwrap_or(10);

        let redis_url =
            std::env::var("REDIS_URL").map_err(|_| ConfigError::Missing("REDIS_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}/", port));
        let public_base_url =
            parse_base_url(&public_base_url).ok_or(ConfigError::Invalid("PUBLIC_BASE_URL"))?;

        let request_timeout_seconds = env_parse("REQUEST_TIMEOUT_SECONDS").unwrap_or(30);
        let body_limit_bytes = env_parse("BODY_LIMIT_BYTES").unwrap_or(1024 * 1024);

        let auth_issuer =
            std::env::var("AUTH_ISSUER").unwrap_or_else(|_| "barefoot-nomad".to_string());
        let auth_audience =
            std::env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "barefoot-nomad-api".to_string());

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let access_token_ttl_seconds = env_parse("ACCESS_TOKEN_TTL_SECONDS").unwrap_or(86_400);
        let verify_token_ttl_seconds = env_parse("VERIFY_TOKEN_TTL_SECONDS").unwrap_or(86_400);
        let access_token_leeway_seconds = env_parse("ACCESS_TOKEN_LEEWAY_SECONDS").unwrap_or(60);

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            redis_url,
            app_env,
            cors_allowed_origins,
            public_base_url,
            request_timeout_seconds,
            body_limit_bytes,
            auth_issuer,
            auth_audience,
            jwt_secret,
            access_token_ttl_seconds,
            verify_token_ttl_seconds,
            access_token_leeway_seconds,
        })
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

/// Parses a base URL and forces a trailing slash so `Url::join` appends
/// instead of replacing the last path segment.
pub fn parse_base_url(raw: &str) -> Option<Url> {
    let mut url = Url::parse(raw.trim()).ok()?;
    if url.cannot_be_a_base() {
        return None;
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Some(url)
}
