/*
 * Responsibility
 * - embedding 側が渡す GateOptions (すべて任意) の受け口
 * - resolve() で検証 + デフォルト適用し、不変の GateConfig を作る
 * - 設定ミスは構築時に ConfigurationError で止める (リクエストまで持ち込まない)
 */

use std::{fmt, sync::Arc};

use jsonwebtoken::Algorithm;

use crate::error::ConfigurationError;
use crate::services::auth::extractor::{BearerHeader, TokenExtractor};
use crate::services::auth::logger::{GateLogger, TracingLogger};
use crate::services::auth::verifier::TokenVerifier;

pub const DEFAULT_IDENTITY_FIELD: &str = "user";

// exp/nbf の許容誤差の上限 (1 日)。jsonwebtoken は `now - leeway` を計算するため
// now を超える値は overflow する。
pub const MAX_LEEWAY_SECONDS: u64 = 24 * 60 * 60;

pub const DEFAULT_NO_TOKEN_MESSAGE: &str = "Access denied. No token provided";
pub const DEFAULT_MALFORMED_TOKEN_MESSAGE: &str = "Malformed token";
pub const DEFAULT_EXPIRED_TOKEN_MESSAGE: &str = "Session expired. Please login";
pub const DEFAULT_INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// クライアントに返す拒否メッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub no_token: String,
    pub malformed_token: String,
    pub expired_token: String,
    pub invalid_token: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_token: DEFAULT_NO_TOKEN_MESSAGE.to_string(),
            malformed_token: DEFAULT_MALFORMED_TOKEN_MESSAGE.to_string(),
            expired_token: DEFAULT_EXPIRED_TOKEN_MESSAGE.to_string(),
            invalid_token: DEFAULT_INVALID_TOKEN_MESSAGE.to_string(),
        }
    }
}

/// 部分上書き。None のフィールドはデフォルトのまま
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOverrides {
    pub no_token: Option<String>,
    pub malformed_token: Option<String>,
    pub expired_token: Option<String>,
    pub invalid_token: Option<String>,
}

impl MessageOverrides {
    fn merge_into(self, defaults: Messages) -> Messages {
        Messages {
            no_token: self.no_token.unwrap_or(defaults.no_token),
            malformed_token: self.malformed_token.unwrap_or(defaults.malformed_token),
            expired_token: self.expired_token.unwrap_or(defaults.expired_token),
            invalid_token: self.invalid_token.unwrap_or(defaults.invalid_token),
        }
    }
}

/// embedding 側が渡す生のオプション
///
/// ```ignore
/// let gate = AuthGate::new(
///     GateOptions::new()
///         .secret(std::env::var("JWT_SECRET")?)
///         .identity_field("account")
///         .expired_token_message("Please sign in again"),
/// )?;
/// ```
#[derive(Clone, Default)]
pub struct GateOptions {
    pub secret: Option<String>,
    pub bypass: Option<bool>,
    pub identity_field: Option<String>,
    pub messages: MessageOverrides,
    pub extractor: Option<Arc<dyn TokenExtractor>>,
    pub logger: Option<Arc<dyn GateLogger>>,
    pub algorithms: Option<Vec<Algorithm>>,
    pub leeway_seconds: Option<u64>,
}

impl fmt::Debug for GateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateOptions")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("bypass", &self.bypass)
            .field("identity_field", &self.identity_field)
            .field("messages", &self.messages)
            .field("extractor", &self.extractor.as_ref().map(|_| "<custom>"))
            .field("logger", &self.logger.as_ref().map(|_| "<custom>"))
            .field("algorithms", &self.algorithms)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl GateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn bypass(mut self, bypass: bool) -> Self {
        self.bypass = Some(bypass);
        self
    }

    pub fn identity_field(mut self, field: impl Into<String>) -> Self {
        self.identity_field = Some(field.into());
        self
    }

    pub fn messages(mut self, messages: MessageOverrides) -> Self {
        self.messages = messages;
        self
    }

    pub fn no_token_message(mut self, message: impl Into<String>) -> Self {
        self.messages.no_token = Some(message.into());
        self
    }

    pub fn malformed_token_message(mut self, message: impl Into<String>) -> Self {
        self.messages.malformed_token = Some(message.into());
        self
    }

    pub fn expired_token_message(mut self, message: impl Into<String>) -> Self {
        self.messages.expired_token = Some(message.into());
        self
    }

    pub fn invalid_token_message(mut self, message: impl Into<String>) -> Self {
        self.messages.invalid_token = Some(message.into());
        self
    }

    pub fn extractor(mut self, extractor: impl TokenExtractor + 'static) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    pub fn logger(mut self, logger: impl GateLogger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn shared_logger(mut self, logger: Arc<dyn GateLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = Some(algorithms);
        self
    }

    pub fn leeway_seconds(mut self, leeway: u64) -> Self {
        self.leeway_seconds = Some(leeway);
        self
    }

    /// 検証 + デフォルト適用。secret が空なら失敗する
    pub fn resolve(self) -> Result<GateConfig, ConfigurationError> {
        let secret = self
            .secret
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigurationError::MissingSecret)?;

        let identity_field = match self.identity_field {
            Some(field) if field.trim().is_empty() => {
                return Err(ConfigurationError::EmptyIdentityField);
            }
            Some(field) => field,
            None => DEFAULT_IDENTITY_FIELD.to_string(),
        };

        let algorithms = self.algorithms.unwrap_or_else(|| vec![Algorithm::HS256]);
        if algorithms.is_empty() || !algorithms.iter().all(is_hmac) {
            return Err(ConfigurationError::UnsupportedAlgorithm(format!(
                "{algorithms:?}"
            )));
        }

        let leeway_seconds = self.leeway_seconds.unwrap_or(0);
        if leeway_seconds > MAX_LEEWAY_SECONDS {
            return Err(ConfigurationError::InvalidLeeway {
                got: leeway_seconds,
                max: MAX_LEEWAY_SECONDS,
            });
        }

        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger) as Arc<dyn GateLogger>);

        let verifier = TokenVerifier::new(
            secret.as_bytes(),
            algorithms,
            leeway_seconds,
            logger.clone(),
        );

        Ok(GateConfig {
            bypass: self.bypass.unwrap_or(false),
            identity_field,
            messages: self.messages.merge_into(Messages::default()),
            extractor: self
                .extractor
                .unwrap_or_else(|| Arc::new(BearerHeader) as Arc<dyn TokenExtractor>),
            logger,
            verifier,
        })
    }
}

fn is_hmac(alg: &Algorithm) -> bool {
    matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

/// 解決済みの設定。構築後は変更しない
pub struct GateConfig {
    pub bypass: bool,
    pub identity_field: String,
    pub messages: Messages,
    pub extractor: Arc<dyn TokenExtractor>,
    pub logger: Arc<dyn GateLogger>,
    pub verifier: TokenVerifier,
}

impl fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("bypass", &self.bypass)
            .field("identity_field", &self.identity_field)
            .field("messages", &self.messages)
            .field("verifier", &self.verifier)
            .finish()
    }
}
