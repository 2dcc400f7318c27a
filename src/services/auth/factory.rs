/*
 * Responsibility
 * - アプリの Config → GateOptions → AuthGate の組み立て
 */
use crate::config::Config;
use crate::error::ConfigurationError;
use crate::services::auth::{AuthGate, GateOptions, MessageOverrides};

pub fn build_auth_gate(config: &Config) -> Result<AuthGate, ConfigurationError> {
    let messages = &config.auth_messages;

    let mut options = GateOptions::new()
        .secret(config.jwt_secret.clone())
        .bypass(config.auth_bypass)
        .leeway_seconds(config.auth_leeway_seconds)
        .messages(MessageOverrides {
            no_token: messages.no_token.clone(),
            malformed_token: messages.malformed_token.clone(),
            expired_token: messages.expired_token.clone(),
            invalid_token: messages.invalid_token.clone(),
        });

    if let Some(field) = &config.auth_identity_field {
        options = options.identity_field(field.clone());
    }

    AuthGate::new(options)
}
