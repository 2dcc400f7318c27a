use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use crate::error::AuthError;
use crate::services::auth::{AuthGate, Claims};

use super::IdentityContext;

/// Handler で、gate が検証した claims を受け取るための extractor
/// middleware が IdentityContext を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（gate 未設定、または bypass 中）
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Claims);

fn lookup(parts: &Parts, gate: &AuthGate) -> Option<Claims> {
    parts
        .extensions
        .get::<IdentityContext>()
        .and_then(|ctx| ctx.get(gate.identity_field()))
        .cloned()
}

impl<S> FromRequestParts<S> for CurrentIdentity
where
    AuthGate: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gate = AuthGate::from_ref(state);

        lookup(parts, &gate)
            .map(CurrentIdentity)
            .ok_or_else(|| AuthError::NoCredential(gate.messages().no_token.clone()))
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentIdentity
where
    AuthGate: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let gate = AuthGate::from_ref(state);
        Ok(lookup(parts, &gate).map(CurrentIdentity))
    }
}
