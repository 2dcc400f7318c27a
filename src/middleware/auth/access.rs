//! Gate middleware: run `AuthGate::decide` and either continue or reject.
//!
//! - Continue: verified claims go into `IdentityContext` under the gate's identity field,
//!   then the next handler runs with the request otherwise unchanged.
//! - Reject: the `AuthError` becomes `401 {"message": ...}` and nothing else runs.

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::IdentityContext;
use crate::error::AuthError;
use crate::services::auth::{AuthGate, Decision};

/// ルーターに gate を掛ける。
///
/// 例：
/// ```ignore
/// let gate = AuthGate::new(GateOptions::new().secret(secret))?;
/// let v1 = middleware::auth::access::apply(api::v1::routes(), gate);
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply<S>(router: Router<S>, gate: AuthGate) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(gate, access_middleware))
}

pub async fn access_middleware(
    State(gate): State<AuthGate>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let (mut parts, body) = req.into_parts();

    match gate.decide(&parts) {
        Decision::Continue(Some(claims)) => {
            // middleware → extractor への受け渡し
            IdentityContext::attach(&mut parts.extensions, gate.identity_field(), claims);
        }
        Decision::Continue(None) => {}
        Decision::Reject(err) => return Err(err),
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
