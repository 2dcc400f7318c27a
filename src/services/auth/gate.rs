/*
 * Responsibility
 * - AuthGate: 起動時に一度だけ作り、Arc<GateConfig> を全リクエストで共有する
 * - decide(): bypass → 抽出 → 検証 の順で Decision を返す
 * - request extensions への書き込みは middleware 側 (middleware::auth::access)
 */
use std::sync::Arc;

use axum::http::request::Parts;

use crate::error::ConfigurationError;
use crate::services::auth::decision::Decision;
use crate::services::auth::options::{GateConfig, GateOptions, Messages};

#[derive(Clone, Debug)]
pub struct AuthGate {
    config: Arc<GateConfig>,
}

impl AuthGate {
    /// 設定ミスはここで失敗させる (リクエストは受けない)
    pub fn new(options: GateOptions) -> Result<Self, ConfigurationError> {
        let config = options.resolve()?;

        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn decide(&self, parts: &Parts) -> Decision {
        let config = &self.config;

        if config.bypass {
            config
                .logger
                .info("authentication bypass enabled; request passed through unverified");
            return Decision::Continue(None);
        }

        let extraction = config.extractor.extract(parts);
        let token = match Decision::from_extraction(extraction, &config.messages) {
            Ok(token) => token,
            Err(decision) => {
                if let Decision::Reject(err) = &decision {
                    config.logger.warn(&format!("{err}: {}", err.message()));
                }
                return decision;
            }
        };

        Decision::from_outcome(config.verifier.verify(&token), &config.messages)
    }

    pub fn identity_field(&self) -> &str {
        &self.config.identity_field
    }

    pub fn is_bypass(&self) -> bool {
        self.config.bypass
    }

    pub fn messages(&self) -> &Messages {
        &self.config.messages
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Request, header::AUTHORIZATION};
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::{Value, json};

    use super::*;
    use crate::error::AuthError;
    use crate::services::auth::extractor::Extraction;
    use crate::services::auth::logger::testing::{Level, RecordingLogger};

    const SECRET: &str = "s3cret";

    fn sign(claims: &Value, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn parts(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/me");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn gate_with(options: GateOptions) -> (AuthGate, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::default());
        let gate = AuthGate::new(options.secret(SECRET).shared_logger(logger.clone())).unwrap();
        (gate, logger)
    }

    #[test]
    fn construction_without_secret_fails() {
        assert_eq!(
            AuthGate::new(GateOptions::new()).unwrap_err(),
            ConfigurationError::MissingSecret
        );
    }

    #[test]
    fn no_header_rejects_with_no_token_and_warns() {
        let (gate, logger) = gate_with(GateOptions::new());

        let decision = gate.decide(&parts(None));

        assert_eq!(
            decision,
            Decision::Reject(AuthError::NoCredential(gate.messages().no_token.clone()))
        );
        assert_eq!(logger.count(Level::Warn), 1);
        assert!(logger.entries()[0].1.contains(&gate.messages().no_token));
    }

    #[test]
    fn non_bearer_scheme_is_same_as_missing() {
        let (gate, _) = gate_with(GateOptions::new());
        let token = sign(&json!({"sub": "u1"}), SECRET);

        let decision = gate.decide(&parts(Some(&format!("Token {token}"))));

        assert_eq!(
            decision,
            Decision::Reject(AuthError::NoCredential(gate.messages().no_token.clone()))
        );
    }

    #[test]
    fn valid_token_continues_with_claims() {
        let (gate, logger) = gate_with(GateOptions::new());
        let token = sign(&json!({"sub": "u1"}), SECRET);

        match gate.decide(&parts(Some(&format!("Bearer {token}")))) {
            Decision::Continue(Some(claims)) => assert_eq!(claims["sub"], "u1"),
            other => panic!("expected continue, got {other:?}"),
        }
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn expired_token_rejects_with_expired_message() {
        let (gate, _) = gate_with(GateOptions::new());
        let issued = Utc::now() - Duration::hours(1);
        let exp = issued + Duration::minutes(10);
        let token = sign(
            &json!({"sub": "u1", "iat": issued.timestamp(), "exp": exp.timestamp()}),
            SECRET,
        );

        let decision = gate.decide(&parts(Some(&format!("Bearer {token}"))));

        assert_eq!(
            decision,
            Decision::Reject(AuthError::ExpiredCredential(
                "Session expired. Please login".into()
            ))
        );
    }

    #[test]
    fn foreign_secret_rejects_with_invalid_message() {
        let (gate, logger) = gate_with(GateOptions::new());
        let token = sign(&json!({"sub": "u1"}), "someone-else");

        let decision = gate.decide(&parts(Some(&format!("Bearer {token}"))));

        assert_eq!(
            decision,
            Decision::Reject(AuthError::InvalidCredential(gate.messages().invalid_token.clone()))
        );
        assert_eq!(logger.count(Level::Warn), 1);
    }

    #[test]
    fn bypass_continues_without_identity_whatever_the_header() {
        let (gate, logger) = gate_with(GateOptions::new().bypass(true));

        for auth in [None, Some("Bearer garbage"), Some("Basic abc")] {
            assert_eq!(gate.decide(&parts(auth)), Decision::Continue(None));
        }
        assert_eq!(logger.count(Level::Info), 3);
        assert_eq!(logger.count(Level::Warn), 0);
    }

    #[test]
    fn custom_extractor_replaces_bearer_logic() {
        let (gate, _) = gate_with(GateOptions::new().extractor(|parts: &Parts| {
            parts
                .headers
                .get("x-session")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        }));
        let token = sign(&json!({"sub": "u2"}), SECRET);

        let mut req = parts(Some(&format!("Bearer {token}")));
        assert!(!gate.decide(&req).is_continue());

        req.headers.insert("x-session", token.parse().unwrap());
        req.headers.remove(AUTHORIZATION);
        assert!(gate.decide(&req).is_continue());
    }

    #[test]
    fn malformed_extraction_uses_malformed_message() {
        let (gate, _) = gate_with(
            GateOptions::new()
                .extractor(|_: &Parts| Extraction::Malformed)
                .malformed_token_message("Bad Authorization header"),
        );

        assert_eq!(
            gate.decide(&parts(None)),
            Decision::Reject(AuthError::MalformedCredential(
                "Bad Authorization header".into()
            ))
        );
    }
}
