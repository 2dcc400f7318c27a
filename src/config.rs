/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, JWT_SECRET, AUTH_*, HTTP_* など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::middleware::http::HttpLimits;
use crate::services::auth::options::MAX_LEEWAY_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("AUTH_BYPASS is not allowed when APP_ENV=production")]
    BypassInProduction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageConfig {
    pub no_token: Option<String>,
    pub malformed_token: Option<String>,
    pub expired_token: Option<String>,
    pub invalid_token: Option<String>,
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub jwt_secret: String,
    pub auth_bypass: bool,
    pub auth_identity_field: Option<String>,
    pub auth_leeway_seconds: u64,
    pub auth_messages: MessageConfig,

    pub http_body_limit_bytes: usize,
    pub http_request_timeout_seconds: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("auth_bypass", &self.auth_bypass)
            .field("auth_identity_field", &self.auth_identity_field)
            .field("auth_leeway_seconds", &self.auth_leeway_seconds)
            .field("http_body_limit_bytes", &self.http_body_limit_bytes)
            .field("http_request_timeout_seconds", &self.http_request_timeout_seconds)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup` instead of the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let auth_bypass = match lookup("AUTH_BYPASS") {
            Some(v) => parse_flag(&v).ok_or(ConfigError::Invalid("AUTH_BYPASS"))?,
            None => false,
        };
        if auth_bypass && app_env.is_production() {
            return Err(ConfigError::BypassInProduction);
        }

        let auth_identity_field = lookup("AUTH_IDENTITY_FIELD")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let auth_leeway_seconds = match lookup("AUTH_LEEWAY_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|leeway| *leeway <= MAX_LEEWAY_SECONDS)
                .ok_or(ConfigError::Invalid("AUTH_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let auth_messages = MessageConfig {
            no_token: lookup("AUTH_MESSAGE_NO_TOKEN"),
            malformed_token: lookup("AUTH_MESSAGE_MALFORMED_TOKEN"),
            expired_token: lookup("AUTH_MESSAGE_EXPIRED_TOKEN"),
            invalid_token: lookup("AUTH_MESSAGE_INVALID_TOKEN"),
        };

        let defaults = HttpLimits::default();

        let http_body_limit_bytes = match lookup("HTTP_BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::Invalid("HTTP_BODY_LIMIT_BYTES"))?,
            None => defaults.body_limit_bytes,
        };

        let http_request_timeout_seconds = match lookup("HTTP_REQUEST_TIMEOUT_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("HTTP_REQUEST_TIMEOUT_SECONDS"))?,
            None => defaults.request_timeout.as_secs(),
        };

        Ok(Self {
            addr,
            app_env,
            jwt_secret,
            auth_bypass,
            auth_identity_field,
            auth_leeway_seconds,
            auth_messages,
            http_body_limit_bytes,
            http_request_timeout_seconds,
        })
    }

    pub fn http_limits(&self) -> HttpLimits {
        HttpLimits {
            body_limit_bytes: self.http_body_limit_bytes,
            request_timeout: Duration::from_secs(self.http_request_timeout_seconds),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
