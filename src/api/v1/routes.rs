/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - gate が必要な範囲はここで apply する
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::me;
use crate::middleware::auth::access;
use crate::services::auth::AuthGate;
use crate::state::AppState;

pub fn routes(gate: AuthGate) -> Router<AppState> {
    let protected = Router::new().route("/me", get(me));

    access::apply(protected, gate)
}
