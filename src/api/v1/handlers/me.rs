/*
 * Responsibility
 * - GET /api/v1/me (gate の内側)
 * - gate が付けた identity をそのまま返す。bypass 中は claims が null になる
 */
use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::api::v1::extractors::CurrentIdentity;
use crate::state::AppState;

pub async fn me(State(state): State<AppState>, identity: Option<CurrentIdentity>) -> Json<Value> {
    let claims = identity.map(|CurrentIdentity(claims)| Value::Object(claims));

    Json(json!({
        "identity_field": state.gate.identity_field(),
        "claims": claims,
    }))
}
