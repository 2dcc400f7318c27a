/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (AuthGate の中身は Arc)
 */
use axum::extract::FromRef;

use crate::services::auth::AuthGate;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: AuthGate,
}

impl AppState {
    pub fn new(gate: AuthGate) -> Self {
        Self { gate }
    }
}

impl FromRef<AppState> for AuthGate {
    fn from_ref(state: &AppState) -> Self {
        state.gate.clone()
    }
}
