/*
 * Responsibility
 * - HMAC (共有 secret) で JWT を検証する
 * - 結果を Valid / Expired / Invalid に分類し、失敗は warn ログに詳細を出す
 */
use std::{fmt, sync::Arc};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde_json::{Map, Value};

use crate::services::auth::logger::GateLogger;

/// 署名されたままの payload
pub type Claims = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    Valid(Claims),
    /// 署名は正しいが exp を過ぎている
    Expired,
    /// それ以外すべて (署名不一致、許可外 alg、構造不正、未来の nbf など)
    Invalid(String),
}

/// - registered claim は必須にしない。exp / nbf はあるときだけ検証
/// - aud / iss は見ない。claims はそのまま渡す
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    logger: Arc<dyn GateLogger>,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 鍵は出さない
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// algorithms は空でない HMAC のみ。leeway は MAX_LEEWAY_SECONDS 以下 (resolve で検証済み)
    pub fn new(
        secret: &[u8],
        algorithms: Vec<Algorithm>,
        leeway_seconds: u64,
        logger: Arc<dyn GateLogger>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = algorithms;
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            logger,
        }
    }

    pub fn verify(&self, token: &str) -> VerificationOutcome {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => VerificationOutcome::Valid(data.claims),
            Err(err) => {
                self.logger
                    .warn(&format!("token verification failed: {err}"));

                match err.kind() {
                    ErrorKind::ExpiredSignature => VerificationOutcome::Expired,
                    _ => VerificationOutcome::Invalid(err.to_string()),
                }
            }
        }
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.validation.algorithms
    }
}
