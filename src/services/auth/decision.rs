/*
 * Responsibility
 * - 抽出結果 / 検証結果 → Decision (Continue / Reject) への対応付け
 * - Reject には設定済みのメッセージを載せる
 */
use crate::error::AuthError;
use crate::services::auth::extractor::Extraction;
use crate::services::auth::options::Messages;
use crate::services::auth::verifier::{Claims, VerificationOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// None は bypass (identity を載せない)
    Continue(Option<Claims>),
    Reject(AuthError),
}

impl Decision {
    /// Ok は検証に回す token
    pub(crate) fn from_extraction(
        extraction: Extraction,
        messages: &Messages,
    ) -> Result<String, Decision> {
        match extraction {
            Extraction::Token(token) => Ok(token),
            Extraction::Missing => Err(Decision::Reject(AuthError::NoCredential(
                messages.no_token.clone(),
            ))),
            Extraction::Malformed => Err(Decision::Reject(AuthError::MalformedCredential(
                messages.malformed_token.clone(),
            ))),
        }
    }

    pub(crate) fn from_outcome(outcome: VerificationOutcome, messages: &Messages) -> Decision {
        match outcome {
            VerificationOutcome::Valid(claims) => Decision::Continue(Some(claims)),
            VerificationOutcome::Expired => Decision::Reject(AuthError::ExpiredCredential(
                messages.expired_token.clone(),
            )),
            VerificationOutcome::Invalid(_) => Decision::Reject(AuthError::InvalidCredential(
                messages.invalid_token.clone(),
            )),
        }
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Decision::Continue(_))
    }
}
